//! Clustering Types

use serde::{Deserialize, Serialize};

/// One attack pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: usize,
    /// Distinct member techniques, first appearance first
    pub members: Vec<String>,
    /// Tokens assigned (duplicates counted)
    pub size: usize,
    /// Share of all tokens, 0 - 100
    pub percentage: f64,
    /// Highest-weighted centroid terms
    pub top_terms: Vec<String>,
    /// Mean euclidean distance of member vectors to the centroid
    pub cohesion: f64,
}

impl Cluster {
    /// Share of all tokens, 0 - 1
    pub fn share(&self) -> f64 {
        self.percentage / 100.0
    }

    /// 1 for a single point, 0 at the widest spread unit vectors allow
    pub fn tightness(&self) -> f64 {
        (1.0 - self.cohesion / std::f64::consts::SQRT_2).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    pub k: usize,
    pub silhouette: f64,
    /// Input tokens, in order
    pub tokens: Vec<String>,
    /// Cluster id per token, parallel to `tokens`
    pub labels: Vec<usize>,
    pub clusters: Vec<Cluster>,
}

impl ClusterAssignment {
    /// Cluster holding `technique`; the first one when duplicates split
    pub fn cluster_of(&self, technique: &str) -> Option<&Cluster> {
        let idx = self.tokens.iter().position(|t| t == technique)?;
        self.clusters.get(self.labels[idx])
    }

    /// Clusters by size, largest first
    pub fn by_size(&self) -> Vec<&Cluster> {
        let mut sorted: Vec<&Cluster> = self.clusters.iter().collect();
        sorted.sort_by(|a, b| b.size.cmp(&a.size).then(a.id.cmp(&b.id)));
        sorted
    }
}
