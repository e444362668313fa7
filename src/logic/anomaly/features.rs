//! Technique profile features
//!
//! frequency, country spread, source spread, active periods,
//! days since last seen (relative to the newest report in the batch)

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ndarray::Array2;

use super::types::FeatureMatrix;
use crate::logic::signals::TechniqueProfile;

pub const PROFILE_FEATURES: [&str; 5] = [
    "frequency",
    "country_spread",
    "source_spread",
    "active_periods",
    "days_since_last_seen",
];

/// One row per profile, in technique order
pub fn profile_features(profiles: &BTreeMap<String, TechniqueProfile>, reference_date: NaiveDate) -> FeatureMatrix {
    let mut values = Array2::<f64>::zeros((profiles.len(), PROFILE_FEATURES.len()));
    let mut row_labels = Vec::with_capacity(profiles.len());

    for (row, profile) in profiles.values().enumerate() {
        let age = (reference_date - profile.last_seen).num_days().max(0);
        values[[row, 0]] = profile.frequency as f64;
        values[[row, 1]] = profile.countries.len() as f64;
        values[[row, 2]] = profile.sources.len() as f64;
        values[[row, 3]] = profile.report_dates.len() as f64;
        values[[row, 4]] = age as f64;
        row_labels.push(profile.technique.clone());
    }

    FeatureMatrix {
        row_labels,
        columns: PROFILE_FEATURES.iter().map(|s| s.to_string()).collect(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_profile_row() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        let profile = TechniqueProfile {
            technique: "T1566".into(),
            frequency: 4,
            countries: ["Finland", "Sweden"].iter().map(|s| s.to_string()).collect(),
            sources: ["feed-a".to_string()].into_iter().collect(),
            report_dates: [d(1), d(8)].into_iter().collect::<BTreeSet<_>>(),
            last_seen: d(8),
        };
        let profiles: BTreeMap<_, _> = [("T1566".to_string(), profile)].into_iter().collect();

        let m = profile_features(&profiles, d(15));
        assert_eq!(m.row_labels, vec!["T1566"]);
        assert_eq!(m.values.row(0).to_vec(), vec![4.0, 2.0, 1.0, 2.0, 7.0]);
    }
}
