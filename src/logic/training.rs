//! Training Recommendations
//!
//! Groups prioritized techniques by tactic and maps each tactic to a
//! training topic. Urgent when a contributing technique ranks in the top
//! three or is projected to increase.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::logic::forecast::TechniqueForecasts;
use crate::logic::mitre::MitreTactic;
use crate::logic::outcome::MlOutcome;
use crate::logic::priority::PrioritizedThreat;

/// Ranks at or above this make a recommendation urgent
const URGENT_RANK: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Urgency {
    Standard,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecommendation {
    /// None for techniques outside the catalog
    pub tactic: Option<MitreTactic>,
    pub topic: String,
    pub techniques: Vec<String>,
    pub urgency: Urgency,
    pub rationale: String,
}

fn topic(tactic: Option<MitreTactic>) -> &'static str {
    match tactic {
        Some(MitreTactic::Reconnaissance) => "Reducing public exposure to reconnaissance",
        Some(MitreTactic::ResourceDevelopment) => "Tracking adversary infrastructure",
        Some(MitreTactic::InitialAccess) => "Phishing and social engineering awareness",
        Some(MitreTactic::Execution) => "Script control and application allow-listing",
        Some(MitreTactic::Persistence) => "Hunting for persistence mechanisms",
        Some(MitreTactic::PrivilegeEscalation) => "Patch and privilege management",
        Some(MitreTactic::DefenseEvasion) => "Detection engineering for evasion techniques",
        Some(MitreTactic::CredentialAccess) => "Credential hygiene and MFA hardening",
        Some(MitreTactic::Discovery) => "Detecting internal discovery activity",
        Some(MitreTactic::LateralMovement) => "Network segmentation and lateral movement detection",
        Some(MitreTactic::Collection) => "Protecting sensitive data stores",
        Some(MitreTactic::CommandAndControl) => "Network traffic analysis for C2",
        Some(MitreTactic::Exfiltration) => "Data loss prevention",
        Some(MitreTactic::Impact) => "Ransomware readiness and recovery exercises",
        None => "General threat awareness",
    }
}

pub fn recommend_training(
    priorities: &[PrioritizedThreat],
    technique_forecasts: &MlOutcome<TechniqueForecasts>,
) -> Vec<TrainingRecommendation> {
    let rising: Vec<&str> = technique_forecasts
        .ready()
        .map(|f| f.increasing().map(|e| e.technique.as_str()).collect())
        .unwrap_or_default();

    // tactic -> threats in rank order
    let mut by_tactic: BTreeMap<Option<MitreTactic>, Vec<&PrioritizedThreat>> = BTreeMap::new();
    for threat in priorities {
        by_tactic.entry(threat.tactic).or_default().push(threat);
    }

    let mut recommendations: Vec<(usize, TrainingRecommendation)> = by_tactic
        .into_iter()
        .map(|(tactic, threats)| {
            let best_rank = threats.iter().map(|t| t.rank).min().unwrap_or(usize::MAX);
            let trending: Vec<&str> = threats
                .iter()
                .map(|t| t.technique.as_str())
                .filter(|t| rising.contains(t))
                .collect();

            let urgency = if best_rank <= URGENT_RANK || !trending.is_empty() {
                Urgency::High
            } else {
                Urgency::Standard
            };

            let mut reasons = vec![format!("best-ranked technique at #{}", best_rank)];
            if !trending.is_empty() {
                reasons.push(format!("projected to increase: {}", trending.join(", ")));
            }

            let recommendation = TrainingRecommendation {
                tactic,
                topic: topic(tactic).to_string(),
                techniques: threats.iter().map(|t| t.technique.clone()).collect(),
                urgency,
                rationale: reasons.join("; "),
            };
            (best_rank, recommendation)
        })
        .collect();

    recommendations.sort_by(|a, b| b.1.urgency.cmp(&a.1.urgency).then(a.0.cmp(&b.0)));
    recommendations.into_iter().map(|(_, r)| r).collect()
}
