//! Anomaly Types

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Numeric rows with labels and column names
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub row_labels: Vec<String>,
    pub columns: Vec<String>,
    pub values: Array2<f64>,
}

impl FeatureMatrix {
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }
}

/// One flagged row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalousRow {
    pub index: usize,
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    /// Per-row score, higher = more typical
    pub scores: Vec<f64>,
    /// Rows scoring strictly below this are flagged
    pub threshold: f64,
    /// Flagged row indices, ascending
    pub flagged: Vec<usize>,
    /// Flagged rows, most anomalous first
    pub anomalies: Vec<AnomalousRow>,
    pub feature_names: Vec<String>,
}

impl AnomalyReport {
    pub fn flagged_count(&self) -> usize {
        self.flagged.len()
    }

    pub fn is_flagged(&self, label: &str) -> bool {
        self.anomalies.iter().any(|a| a.label == label)
    }
}
