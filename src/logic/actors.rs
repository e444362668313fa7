//! Activity-Group Profiling
//!
//! Treats every attack-pattern cluster as one activity group and profiles
//! it: techniques, dominant tactics, countries, reporting sources,
//! sophistication and activity level.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::logic::clustering::ClusterAssignment;
use crate::logic::mitre::{self, MitreTactic};
use crate::logic::outcome::MlOutcome;
use crate::logic::priority::cluster_sophistication;
use crate::logic::signals::TechniqueProfile;

const DOMINANT_TACTICS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActivityLevel {
    Low,
    Moderate,
    High,
}

impl ActivityLevel {
    /// By share of all technique tokens: >= 40% High, >= 20% Moderate
    pub fn from_share(share: f64) -> Self {
        if share >= 0.4 {
            ActivityLevel::High
        } else if share >= 0.2 {
            ActivityLevel::Moderate
        } else {
            ActivityLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "Low",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityGroup {
    pub cluster_id: usize,
    pub name: String,
    pub techniques: Vec<String>,
    pub dominant_tactics: Vec<MitreTactic>,
    pub countries: Vec<String>,
    pub sources: Vec<String>,
    /// 0.0 - 1.0
    pub sophistication: f64,
    /// 0.0 - 1.0
    pub share: f64,
    pub activity_level: ActivityLevel,
}

pub fn profile_activity_groups(
    clusters: &MlOutcome<ClusterAssignment>,
    profiles: &BTreeMap<String, TechniqueProfile>,
) -> MlOutcome<Vec<ActivityGroup>> {
    let assignment = match clusters {
        MlOutcome::Ready(assignment) => assignment,
        other => {
            return MlOutcome::not_applicable(format!(
                "Insufficient data for activity-group profiling: pattern clustering unavailable ({})",
                other.reason().unwrap_or("no clusters")
            ))
        }
    };

    let groups = assignment
        .by_size()
        .into_iter()
        .map(|cluster| {
            let mut tactic_weight: BTreeMap<MitreTactic, usize> = BTreeMap::new();
            let mut countries = BTreeSet::new();
            let mut sources = BTreeSet::new();

            for technique in &cluster.members {
                let profile = profiles.get(technique);
                let weight = profile.map_or(1, |p| p.frequency);
                if let Some(tactic) = mitre::tactic_of(technique) {
                    *tactic_weight.entry(tactic).or_insert(0) += weight;
                }
                if let Some(p) = profile {
                    countries.extend(p.countries.iter().cloned());
                    sources.extend(p.sources.iter().cloned());
                }
            }

            let mut tactics: Vec<(MitreTactic, usize)> = tactic_weight.into_iter().collect();
            tactics.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
            let dominant_tactics: Vec<MitreTactic> =
                tactics.into_iter().take(DOMINANT_TACTICS).map(|(t, _)| t).collect();

            let name = match dominant_tactics.first() {
                Some(tactic) => format!("Activity group {} ({})", cluster.id + 1, tactic),
                None => format!("Activity group {}", cluster.id + 1),
            };

            ActivityGroup {
                cluster_id: cluster.id,
                name,
                techniques: cluster.members.clone(),
                dominant_tactics,
                countries: countries.into_iter().collect(),
                sources: sources.into_iter().collect(),
                sophistication: cluster_sophistication(cluster),
                share: cluster.share(),
                activity_level: ActivityLevel::from_share(cluster.share()),
            }
        })
        .collect();

    MlOutcome::Ready(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::clustering::Cluster;
    use chrono::NaiveDate;

    fn profile(technique: &str, frequency: usize, country: &str, source: &str) -> TechniqueProfile {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        TechniqueProfile {
            technique: technique.into(),
            frequency,
            countries: [country.to_string()].into_iter().collect(),
            sources: [source.to_string()].into_iter().collect(),
            report_dates: [day].into_iter().collect(),
            last_seen: day,
        }
    }

    fn assignment() -> ClusterAssignment {
        ClusterAssignment {
            k: 2,
            silhouette: 0.5,
            tokens: vec!["T1566".into(), "T1204".into(), "T1486".into(), "T1566".into()],
            labels: vec![0, 0, 1, 0],
            clusters: vec![
                Cluster {
                    id: 0,
                    members: vec!["T1566".into(), "T1204".into()],
                    size: 3,
                    percentage: 75.0,
                    top_terms: vec!["t1566".into()],
                    cohesion: 0.2,
                },
                Cluster {
                    id: 1,
                    members: vec!["T1486".into()],
                    size: 1,
                    percentage: 25.0,
                    top_terms: vec!["t1486".into()],
                    cohesion: 0.0,
                },
            ],
        }
    }

    #[test]
    fn test_groups_from_clusters() {
        let profiles: BTreeMap<String, TechniqueProfile> = [
            profile("T1566", 2, "Finland", "feed-a"),
            profile("T1204", 1, "Estonia", "feed-b"),
            profile("T1486", 1, "Sweden", "feed-a"),
        ]
        .into_iter()
        .map(|p| (p.technique.clone(), p))
        .collect();

        let groups = profile_activity_groups(&MlOutcome::Ready(assignment()), &profiles)
            .into_ready()
            .unwrap();

        assert_eq!(groups.len(), 2);
        let big = &groups[0];
        assert_eq!(big.cluster_id, 0);
        assert_eq!(big.activity_level, ActivityLevel::High);
        assert_eq!(big.dominant_tactics[0], MitreTactic::InitialAccess);
        assert_eq!(big.countries, vec!["Estonia", "Finland"]);
        assert!(big.name.contains("Initial Access"));

        let small = &groups[1];
        assert_eq!(small.activity_level, ActivityLevel::Moderate);
        assert!(small.sophistication > big.sophistication);
    }

    #[test]
    fn test_not_applicable_without_clusters() {
        let outcome = profile_activity_groups(&MlOutcome::not_applicable("too few"), &BTreeMap::new());
        assert!(matches!(outcome, MlOutcome::NotApplicable { .. }));
        assert!(outcome.reason().unwrap().contains("too few"));
    }
}
