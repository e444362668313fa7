//! Threat Ranker
//!
//! Input: technique profiles, optional cluster assignment, risk assessment
//! Output: techniques ordered by composite score

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::rules::*;
use super::types::{FactorContribution, PrioritizedThreat, PriorityFactor, PriorityTier};
use crate::logic::clustering::{Cluster, ClusterAssignment};
use crate::logic::mitre;
use crate::logic::risk::RiskAssessment;
use crate::logic::signals::TechniqueProfile;

/// Active factor weights; sophistication only when clusters exist
pub fn factor_weights(with_sophistication: bool) -> Vec<(PriorityFactor, f64)> {
    let mut weights = vec![
        (PriorityFactor::Frequency, FREQUENCY_WEIGHT),
        (PriorityFactor::GeographicSpread, SPREAD_WEIGHT),
        (PriorityFactor::Recency, RECENCY_WEIGHT),
    ];
    if with_sophistication {
        weights.push((PriorityFactor::Sophistication, SOPHISTICATION_WEIGHT));
    }
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    weights.iter_mut().for_each(|(_, w)| *w /= total);
    weights
}

fn ratio(value: usize, max: usize) -> f64 {
    if max == 0 {
        0.0
    } else {
        value as f64 / max as f64
    }
}

/// Rank every profiled technique.
///
/// `as_of` is the newest report date of the batch; recency decays from it.
pub fn prioritize_threats(
    profiles: &BTreeMap<String, TechniqueProfile>,
    clusters: Option<&ClusterAssignment>,
    risk: &RiskAssessment,
    as_of: NaiveDate,
    recency_half_life_days: f64,
) -> Vec<PrioritizedThreat> {
    let max_frequency = profiles.values().map(|p| p.frequency).max().unwrap_or(0);
    let max_spread = profiles.values().map(|p| p.countries.len()).max().unwrap_or(0);
    let weights = factor_weights(clusters.is_some());
    let promote = risk.max_score() > TIER_PROMOTION_RISK;
    let half_life = if recency_half_life_days > 0.0 { recency_half_life_days } else { 1.0 };

    let mut ranked: Vec<PrioritizedThreat> = profiles
        .values()
        .map(|profile| {
            let days = (as_of - profile.last_seen).num_days().max(0) as f64;

            let factors: Vec<FactorContribution> = weights
                .iter()
                .map(|&(factor, weight)| {
                    let (raw, normalized) = match factor {
                        PriorityFactor::Frequency => {
                            (profile.frequency as f64, ratio(profile.frequency, max_frequency))
                        }
                        PriorityFactor::GeographicSpread => (
                            profile.countries.len() as f64,
                            ratio(profile.countries.len(), max_spread),
                        ),
                        PriorityFactor::Recency => (days, (-days / half_life).exp()),
                        PriorityFactor::Sophistication => {
                            let s = sophistication(&profile.technique, clusters);
                            (s, s)
                        }
                    };
                    FactorContribution {
                        factor,
                        raw,
                        normalized,
                        weight,
                        contribution: weight * normalized * 100.0,
                    }
                })
                .collect();

            let composite_score = factors.iter().map(|f| f.contribution).sum::<f64>().clamp(0.0, 100.0);
            let base_tier = PriorityTier::from_score(composite_score);

            PrioritizedThreat {
                rank: 0,
                technique: profile.technique.clone(),
                display_name: mitre::display_name(&profile.technique),
                tactic: mitre::tactic_of(&profile.technique),
                composite_score,
                tier: if promote { base_tier.promoted() } else { base_tier },
                frequency: profile.frequency,
                countries: profile.countries.iter().cloned().collect(),
                last_seen: profile.last_seen,
                factors,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.composite_score
            .total_cmp(&a.composite_score)
            .then(b.frequency.cmp(&a.frequency))
            .then_with(|| a.technique.cmp(&b.technique))
    });
    for (i, threat) in ranked.iter_mut().enumerate() {
        threat.rank = i + 1;
    }

    if let Some(top) = ranked.first() {
        log::debug!(
            "Prioritized {} techniques, top {} ({:.1}, {})",
            ranked.len(),
            top.technique,
            top.composite_score,
            top.tier
        );
    }
    ranked
}

/// Rare, tight patterns score high (0 - 1)
pub fn cluster_sophistication(cluster: &Cluster) -> f64 {
    (RARITY_WEIGHT * (1.0 - cluster.share()) + TIGHTNESS_WEIGHT * cluster.tightness()).clamp(0.0, 1.0)
}

fn sophistication(technique: &str, clusters: Option<&ClusterAssignment>) -> f64 {
    clusters
        .and_then(|c| c.cluster_of(technique))
        .map_or(0.0, cluster_sophistication)
}
