//! Anomaly Detector
//!
//! Standardize -> isolation forest -> flag rows below the 10th percentile.

use super::types::{AnomalousRow, AnomalyReport, FeatureMatrix};
use crate::error::{EngineError, EngineResult};
use crate::logic::config::EngineConfig;
use crate::logic::ml::{percentile, standardize, IsolationForest};
use crate::logic::outcome::MlOutcome;

/// Fewer rows than this -> not applicable
pub const MIN_ANOMALY_ROWS: usize = 10;

/// Expected share of anomalous rows
pub const CONTAMINATION: f64 = 0.1;

pub fn detect_anomalies(features: &FeatureMatrix, config: &EngineConfig) -> MlOutcome<AnomalyReport> {
    if !config.ml_enabled {
        return MlOutcome::disabled();
    }
    if features.n_rows() < MIN_ANOMALY_ROWS {
        return MlOutcome::not_applicable(format!(
            "Insufficient data for anomaly detection: {} rows (need at least {})",
            features.n_rows(),
            MIN_ANOMALY_ROWS
        ));
    }

    MlOutcome::from_fit("Anomaly detection", score_rows(features, config))
}

fn score_rows(features: &FeatureMatrix, config: &EngineConfig) -> EngineResult<AnomalyReport> {
    let scaled = standardize(&features.values)?;
    let forest = IsolationForest::new(config.isolation_trees, config.random_seed).fit(&scaled)?;
    let scores = forest.score_samples(&scaled)?;

    let threshold = percentile(&scores, CONTAMINATION * 100.0)
        .ok_or_else(|| EngineError::model_fit("scores are not finite"))?;

    let flagged: Vec<usize> = scores
        .iter()
        .enumerate()
        .filter(|(_, s)| **s < threshold)
        .map(|(i, _)| i)
        .collect();

    let mut anomalies: Vec<AnomalousRow> = flagged
        .iter()
        .map(|&i| AnomalousRow {
            index: i,
            label: features.row_labels.get(i).cloned().unwrap_or_else(|| format!("row {}", i)),
            score: scores[i],
        })
        .collect();
    anomalies.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.index.cmp(&b.index)));

    log::info!(
        "Anomaly detection: {} of {} rows flagged (threshold {:.4})",
        flagged.len(),
        scores.len(),
        threshold
    );

    Ok(AnomalyReport {
        scores,
        threshold,
        flagged,
        anomalies,
        feature_names: features.columns.clone(),
    })
}
