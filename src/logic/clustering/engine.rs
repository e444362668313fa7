//! Pattern Clustering Engine
//!
//! Input: technique tokens (duplicates are separate documents)
//! Output: `MlOutcome<ClusterAssignment>`

use ndarray::{Array1, Array2, Axis};

use super::types::{Cluster, ClusterAssignment};
use crate::error::{EngineError, EngineResult};
use crate::logic::config::EngineConfig;
use crate::logic::ml::{distinct_rows, silhouette_score, KMeans, TfidfVectorizer};
use crate::logic::outcome::MlOutcome;

/// Fewer tokens than this -> not applicable
pub const MIN_CLUSTER_TOKENS: usize = 5;

/// Largest k tried
pub const MAX_CANDIDATE_K: usize = 6;

pub const TOP_TERMS_PER_CLUSTER: usize = 3;

const MAX_FEATURES: usize = 50;

/// Cluster technique tokens into attack patterns
pub fn cluster_techniques(tokens: &[String], config: &EngineConfig) -> MlOutcome<ClusterAssignment> {
    if !config.ml_enabled {
        return MlOutcome::disabled();
    }
    if tokens.len() < MIN_CLUSTER_TOKENS {
        return MlOutcome::not_applicable(format!(
            "Insufficient data for clustering: {} technique tokens (need at least {})",
            tokens.len(),
            MIN_CLUSTER_TOKENS
        ));
    }

    MlOutcome::from_fit("Pattern clustering", fit_clusters(tokens, config))
}

fn fit_clusters(tokens: &[String], config: &EngineConfig) -> EngineResult<ClusterAssignment> {
    let tfidf = TfidfVectorizer::new(MAX_FEATURES).fit_transform(tokens)?;
    let x = &tfidf.matrix;
    let max_k = MAX_CANDIDATE_K.min(tokens.len() - 1).min(distinct_rows(x));
    if max_k < 2 {
        return Err(EngineError::model_fit("fewer than 2 distinct technique vectors"));
    }

    // (k, silhouette, labels); first k with strictly greater silhouette wins
    let mut best: Option<(usize, f64, Vec<usize>)> = None;
    for k in 2..=max_k {
        let fit = match KMeans::new(k, config.random_seed)
            .with_n_init(config.kmeans_restarts)
            .fit(x)
        {
            Ok(fit) => fit,
            Err(e) => {
                log::debug!("k={} skipped: {}", k, e);
                continue;
            }
        };
        let score = match silhouette_score(x, &fit.labels) {
            Ok(score) => score,
            Err(e) => {
                log::debug!("k={} skipped: {}", k, e);
                continue;
            }
        };
        log::debug!("k={} silhouette={:.4} inertia={:.4}", k, score, fit.inertia);

        if best.as_ref().map_or(true, |(_, s, _)| score > *s) {
            best = Some((fit.n_clusters(), score, fit.labels));
        }
    }

    let (k, silhouette, labels) = best.ok_or_else(|| {
        EngineError::model_fit("no candidate k produced a valid silhouette score")
    })?;

    let clusters = (0..k)
        .map(|id| summarize(id, tokens, &labels, x, &tfidf.vocabulary))
        .collect();

    log::info!(
        "Clustered {} tokens into {} patterns (silhouette {:.3})",
        tokens.len(),
        k,
        silhouette
    );

    Ok(ClusterAssignment {
        k,
        silhouette,
        tokens: tokens.to_vec(),
        labels,
        clusters,
    })
}

fn summarize(id: usize, tokens: &[String], labels: &[usize], x: &Array2<f64>, vocabulary: &[String]) -> Cluster {
    let rows: Vec<usize> = (0..tokens.len()).filter(|&i| labels[i] == id).collect();

    let mut members: Vec<String> = Vec::new();
    for &i in &rows {
        if !members.contains(&tokens[i]) {
            members.push(tokens[i].clone());
        }
    }

    let centroid: Array1<f64> = x
        .select(Axis(0), &rows)
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::zeros(x.ncols()));

    let cohesion = if rows.is_empty() {
        0.0
    } else {
        rows.iter()
            .map(|&i| (&x.row(i) - &centroid).mapv(|v| v * v).sum().sqrt())
            .sum::<f64>()
            / rows.len() as f64
    };

    let mut weighted: Vec<(usize, f64)> = centroid
        .iter()
        .enumerate()
        .filter(|(_, w)| **w > 0.0)
        .map(|(i, w)| (i, *w))
        .collect();
    weighted.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    let top_terms = weighted
        .into_iter()
        .take(TOP_TERMS_PER_CLUSTER)
        .map(|(i, _)| vocabulary[i].clone())
        .collect();

    Cluster {
        id,
        members,
        size: rows.len(),
        percentage: rows.len() as f64 / tokens.len() as f64 * 100.0,
        top_terms,
        cohesion,
    }
}
