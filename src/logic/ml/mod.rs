//! ML Primitives
//!
//! Seeded estimators the analytics components need. Clustering goes through
//! `linfa`, least squares through `nalgebra`. Every fit returns
//! `EngineResult`; components turn errors into `MlOutcome::Degraded`.
//!
//! ## Structure
//! - `tfidf`: Text vectorizer (unigrams + bigrams)
//! - `kmeans`: linfa k-means and the silhouette score
//! - `isolation_forest`: Outlier scores
//! - `scaler`: Column standardization
//! - `regression`: Degree-2 polynomial least squares

pub mod tfidf;
pub mod kmeans;
pub mod isolation_forest;
pub mod scaler;
pub mod regression;

pub use tfidf::{TfidfMatrix, TfidfVectorizer};
pub use kmeans::{distinct_rows, silhouette_score, KMeans, KMeansFit};
pub use isolation_forest::{IsolationForest, IsolationForestFit};
pub use scaler::standardize;
pub use regression::{PolynomialFit, QuadraticRegression};

/// Percentile with linear interpolation between closest ranks.
///
/// `q` in [0, 100]. Returns `None` for an empty slice or non-finite values.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = (q.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&values, 0.0), Some(1.0));
        assert_eq!(percentile(&values, 50.0), Some(3.0));
        assert_eq!(percentile(&values, 100.0), Some(5.0));
        // 10th percentile of 1..=5: position 0.4 -> 1.4
        assert!((percentile(&values, 10.0).unwrap() - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_rejects_empty_and_nan() {
        assert_eq!(percentile(&[], 10.0), None);
        assert_eq!(percentile(&[1.0, f64::NAN], 10.0), None);
    }
}
