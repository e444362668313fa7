//! k-means and silhouette score, backed by `linfa-clustering`

use linfa::metrics::SilhouetteScore;
use linfa::prelude::*;
use linfa::DatasetBase;
use linfa_clustering::KMeans as LinfaKMeans;
use linfa_nn::distance::L2Dist;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{EngineError, EngineResult};

const DEFAULT_MAX_ITER: u64 = 300;
const DEFAULT_TOLERANCE: f64 = 1e-4;

#[derive(Debug, Clone)]
pub struct KMeans {
    pub n_clusters: usize,
    /// Independent k-means++ runs; the lowest inertia wins
    pub n_init: usize,
    pub max_iter: u64,
    pub tolerance: f64,
    pub seed: u64,
}

#[derive(Debug, Clone)]
pub struct KMeansFit {
    /// Cluster per row, contiguous from 0
    pub labels: Vec<usize>,
    /// One row per (non-empty) cluster
    pub centroids: Array2<f64>,
    pub inertia: f64,
}

impl KMeansFit {
    pub fn n_clusters(&self) -> usize {
        self.centroids.nrows()
    }
}

/// Number of pairwise distinct rows
pub fn distinct_rows(x: &Array2<f64>) -> usize {
    let mut seen: Vec<Array1<f64>> = Vec::new();
    for row in x.rows() {
        if !seen.iter().any(|s| s.view() == row) {
            seen.push(row.to_owned());
        }
    }
    seen.len()
}

impl KMeans {
    pub fn new(n_clusters: usize, seed: u64) -> Self {
        Self {
            n_clusters,
            n_init: 10,
            max_iter: DEFAULT_MAX_ITER,
            tolerance: DEFAULT_TOLERANCE,
            seed,
        }
    }

    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init.max(1);
        self
    }

    pub fn fit(&self, x: &Array2<f64>) -> EngineResult<KMeansFit> {
        let n = x.nrows();
        if self.n_clusters == 0 || self.n_clusters > n {
            return Err(EngineError::model_fit(format!(
                "n_clusters={} must be in 1..={}",
                self.n_clusters, n
            )));
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(EngineError::model_fit("input contains non-finite values"));
        }
        // k-means++ cannot seed more centroids than there are distinct points
        let distinct = distinct_rows(x);
        if self.n_clusters > distinct {
            return Err(EngineError::model_fit(format!(
                "n_clusters={} exceeds {} distinct points",
                self.n_clusters, distinct
            )));
        }

        let rng = StdRng::seed_from_u64(self.seed);
        let dataset = DatasetBase::from(x.clone());
        let model = LinfaKMeans::params_with(self.n_clusters, rng, L2Dist)
            .n_runs(self.n_init)
            .max_n_iterations(self.max_iter)
            .tolerance(self.tolerance)
            .fit(&dataset)
            .map_err(|e| EngineError::model_fit(format!("k-means: {}", e)))?;

        let labels: Array1<usize> = model.predict(x);
        let fit = KMeansFit {
            labels: labels.to_vec(),
            centroids: model.centroids().to_owned(),
            inertia: model.inertia(),
        };
        Ok(compact(fit))
    }
}

/// Drop empty clusters and renumber labels 0..m in centroid order
fn compact(fit: KMeansFit) -> KMeansFit {
    let k = fit.centroids.nrows();
    let mut used = vec![false; k];
    for &l in &fit.labels {
        used[l] = true;
    }
    if used.iter().all(|u| *u) {
        return fit;
    }

    let mut remap = vec![usize::MAX; k];
    let mut kept = Vec::new();
    for (c, &u) in used.iter().enumerate() {
        if u {
            remap[c] = kept.len();
            kept.push(c);
        }
    }

    KMeansFit {
        labels: fit.labels.iter().map(|&l| remap[l]).collect(),
        centroids: fit.centroids.select(Axis(0), &kept),
        inertia: fit.inertia,
    }
}

/// Mean silhouette coefficient (euclidean).
///
/// Defined only for 2 <= distinct labels <= n - 1.
pub fn silhouette_score(x: &Array2<f64>, labels: &[usize]) -> EngineResult<f64> {
    let n = x.nrows();
    if labels.len() != n {
        return Err(EngineError::model_fit("labels do not match rows"));
    }
    let mut distinct: Vec<usize> = labels.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() < 2 || distinct.len() > n.saturating_sub(1) {
        return Err(EngineError::model_fit(format!(
            "silhouette needs 2..={} labels, got {}",
            n.saturating_sub(1),
            distinct.len()
        )));
    }

    let dataset = DatasetBase::new(x.clone(), Array1::from(labels.to_vec()));
    let score = dataset
        .silhouette_score()
        .map_err(|e| EngineError::model_fit(format!("silhouette: {}", e)))?;
    if !score.is_finite() {
        return Err(EngineError::model_fit("silhouette is not finite"));
    }
    Ok(score)
}
