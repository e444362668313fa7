//! Allocation Optimizer
//!
//! Deterministic: interpolate between the proactive and reactive profiles
//! by intensity, then renormalize to exactly 100.

use super::rules::*;
use super::types::{AllocationLine, AllocationPlan, ResourceCategory};
use crate::logic::mitre::MitreTactic;
use crate::logic::priority::{PrioritizedThreat, PriorityFactor, PriorityTier};
use crate::logic::risk::RiskAssessment;

/// (intensity, R, P), each clamped to [0, 1]
pub fn allocation_intensity(risk: &RiskAssessment, priorities: &[PrioritizedThreat]) -> (f64, f64, f64) {
    let r = ((RISK_MAX_WEIGHT * risk.max_score() + RISK_MIN_WEIGHT * risk.min_score()) / 100.0).clamp(0.0, 1.0);

    let window: Vec<f64> = priorities
        .iter()
        .take(PRIORITY_WINDOW)
        .map(|t| t.composite_score)
        .collect();
    let p = if window.is_empty() {
        0.0
    } else {
        (window.iter().sum::<f64>() / window.len() as f64 / 100.0).clamp(0.0, 1.0)
    };

    let intensity = (RISK_INTENSITY_WEIGHT * r + PRIORITY_INTENSITY_WEIGHT * p).clamp(0.0, 1.0);
    (intensity, r, p)
}

pub fn optimize_allocation(risk: &RiskAssessment, priorities: &[PrioritizedThreat]) -> AllocationPlan {
    let (intensity, risk_component, priority_component) = allocation_intensity(risk, priorities);

    let raw: Vec<f64> = PROACTIVE_PROFILE
        .iter()
        .zip(REACTIVE_PROFILE.iter())
        .map(|(pro, re)| pro + (re - pro) * intensity)
        .collect();
    let total: f64 = raw.iter().sum();

    let lines = ResourceCategory::ALL
        .iter()
        .zip(raw)
        .map(|(&category, share)| {
            let share = share / total * 100.0;
            AllocationLine {
                category,
                share,
                rationale: rationale(category, share, intensity),
                focus_techniques: focus(category, priorities),
            }
        })
        .collect();

    log::debug!(
        "Allocation intensity {:.2} (R {:.2}, P {:.2})",
        intensity,
        risk_component,
        priority_component
    );

    AllocationPlan {
        intensity,
        risk_component,
        priority_component,
        lines,
    }
}

fn posture(intensity: f64) -> &'static str {
    if intensity >= 0.66 {
        "reactive"
    } else if intensity >= 0.33 {
        "balanced"
    } else {
        "proactive"
    }
}

fn rationale(category: ResourceCategory, share: f64, intensity: f64) -> String {
    let reason = match category {
        ResourceCategory::Monitoring => "continuous detection coverage for the top-ranked techniques",
        ResourceCategory::IncidentResponse => "containment readiness for techniques in the high and immediate tiers",
        ResourceCategory::Training => "awareness for user-facing initial access and execution techniques",
        ResourceCategory::TechnicalControls => "hardening against the most widespread techniques",
    };
    format!(
        "{:.1}% to {} under a {} posture (intensity {:.2}): {}",
        share,
        category,
        posture(intensity),
        intensity,
        reason
    )
}

/// Techniques each line should concentrate on
fn focus(category: ResourceCategory, priorities: &[PrioritizedThreat]) -> Vec<String> {
    let pick = |filter: &dyn Fn(&PrioritizedThreat) -> bool| -> Vec<String> {
        let chosen: Vec<String> = priorities
            .iter()
            .filter(|t| filter(t))
            .take(FOCUS_TECHNIQUES)
            .map(|t| t.technique.clone())
            .collect();
        if chosen.is_empty() {
            priorities
                .iter()
                .take(FOCUS_TECHNIQUES)
                .map(|t| t.technique.clone())
                .collect()
        } else {
            chosen
        }
    };

    match category {
        ResourceCategory::Monitoring => pick(&|_| true),
        ResourceCategory::IncidentResponse => pick(&|t| t.tier >= PriorityTier::High),
        ResourceCategory::Training => pick(&|t| {
            matches!(t.tactic, Some(MitreTactic::InitialAccess) | Some(MitreTactic::Execution))
        }),
        ResourceCategory::TechnicalControls => {
            let mut by_spread: Vec<&PrioritizedThreat> = priorities.iter().collect();
            by_spread.sort_by(|a, b| {
                let spread = |t: &PrioritizedThreat| t.factor(PriorityFactor::GeographicSpread).map_or(0.0, |f| f.raw);
                spread(b).total_cmp(&spread(a)).then(a.rank.cmp(&b.rank))
            });
            by_spread
                .into_iter()
                .take(FOCUS_TECHNIQUES)
                .map(|t| t.technique.clone())
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::risk::{assess, RiskInputs};
    use chrono::NaiveDate;

    fn threat(rank: usize, technique: &str, score: f64, tier: PriorityTier) -> PrioritizedThreat {
        PrioritizedThreat {
            rank,
            technique: technique.to_string(),
            display_name: technique.to_string(),
            tactic: crate::logic::mitre::tactic_of(technique),
            composite_score: score,
            tier,
            frequency: 1,
            countries: Vec::new(),
            last_seen: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            factors: Vec::new(),
        }
    }

    fn risk(total: usize, unique: usize, countries: usize, sources: usize) -> RiskAssessment {
        assess(&RiskInputs {
            total_techniques: total,
            unique_techniques: unique,
            country_count: countries,
            source_count: sources,
            regional_focus: false,
        })
    }

    #[test]
    fn test_shares_sum_to_100() {
        let priorities = vec![
            threat(1, "T1566", 92.0, PriorityTier::Immediate),
            threat(2, "T1486", 55.0, PriorityTier::High),
        ];
        for r in [risk(0, 0, 0, 0), risk(5, 3, 1, 1), risk(500, 200, 40, 30)] {
            let empty: &[PrioritizedThreat] = &[];
            for p in [&priorities[..], empty] {
                let plan = optimize_allocation(&r, p);
                assert!((plan.total_share() - 100.0).abs() < 1e-9);
                assert_eq!(plan.lines.len(), 4);
            }
        }
    }

    #[test]
    fn test_higher_risk_shifts_to_reactive() {
        let low = optimize_allocation(&risk(0, 0, 0, 0), &[]);
        let high = optimize_allocation(&risk(500, 200, 40, 30), &[threat(1, "T1566", 95.0, PriorityTier::Immediate)]);

        assert!(high.intensity > low.intensity);
        assert!(high.share(ResourceCategory::IncidentResponse) > low.share(ResourceCategory::IncidentResponse));
        assert!(high.share(ResourceCategory::Training) < low.share(ResourceCategory::Training));

        let reactive = |plan: &AllocationPlan| -> f64 {
            plan.lines.iter().filter(|l| l.category.is_reactive()).map(|l| l.share).sum()
        };
        assert!(reactive(&high) > reactive(&low));
    }

    #[test]
    fn test_floor_risk_intensity() {
        // Floor scores are 10 / 10 -> R = 0.1, no threats -> P = 0
        let (intensity, r, p) = allocation_intensity(&risk(0, 0, 0, 0), &[]);
        assert!((r - 0.1).abs() < 1e-12);
        assert_eq!(p, 0.0);
        assert!((intensity - 0.07).abs() < 1e-12);
    }

    #[test]
    fn test_focus_techniques() {
        let priorities = vec![
            threat(1, "T1486", 80.0, PriorityTier::Immediate),
            threat(2, "T1566", 60.0, PriorityTier::High),
            threat(3, "T1110", 20.0, PriorityTier::Routine),
        ];
        let plan = optimize_allocation(&risk(10, 3, 1, 1), &priorities);
        let line = |c: ResourceCategory| plan.lines.iter().find(|l| l.category == c).unwrap();

        assert_eq!(line(ResourceCategory::Training).focus_techniques, vec!["T1566"]);
        assert_eq!(
            line(ResourceCategory::IncidentResponse).focus_techniques,
            vec!["T1486", "T1566"]
        );
        assert!(line(ResourceCategory::Monitoring).rationale.contains("Monitoring"));
    }

    #[test]
    fn test_apply_budget() {
        let plan = optimize_allocation(&risk(0, 0, 0, 0), &[]);
        let budget = plan.apply_budget(200_000.0);
        let total: f64 = budget.iter().map(|b| b.amount).sum();
        assert!((total - 200_000.0).abs() < 1e-6);
    }
}
