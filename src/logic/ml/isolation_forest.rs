//! Isolation Forest
//!
//! Random axis-aligned partitioning; outliers isolate in fewer splits.
//! Scores use the `-(2^(-E[h(x)] / c(psi)))` convention: values near -1
//! are anomalous, values near -0.5 and above are typical.

use ndarray::{Array2, ArrayView1};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::error::{EngineError, EngineResult};

const EULER_GAMMA: f64 = 0.577_215_664_9;
const DEFAULT_MAX_SAMPLES: usize = 256;

/// Average path length of an unsuccessful BST search over `n` points
fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn path_length(&self, point: ArrayView1<f64>, depth: usize) -> f64 {
        match self {
            Node::Leaf { size } => depth as f64 + average_path_length(*size),
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if point[*feature] <= *threshold {
                    left.path_length(point, depth + 1)
                } else {
                    right.path_length(point, depth + 1)
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct IsolationForest {
    pub n_trees: usize,
    pub max_samples: usize,
    pub seed: u64,
}

/// Trained forest
#[derive(Debug, Clone)]
pub struct IsolationForestFit {
    trees: Vec<Node>,
    sample_size: usize,
    n_features: usize,
}

impl IsolationForest {
    pub fn new(n_trees: usize, seed: u64) -> Self {
        Self {
            n_trees,
            max_samples: DEFAULT_MAX_SAMPLES,
            seed,
        }
    }

    pub fn fit(&self, x: &Array2<f64>) -> EngineResult<IsolationForestFit> {
        let n = x.nrows();
        if n < 2 {
            return Err(EngineError::model_fit("isolation forest needs at least 2 rows"));
        }
        if x.ncols() == 0 {
            return Err(EngineError::model_fit("feature matrix has no columns"));
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(EngineError::model_fit("input contains non-finite values"));
        }
        if self.n_trees == 0 {
            return Err(EngineError::model_fit("n_trees must be positive"));
        }

        let sample_size = self.max_samples.min(n);
        let height_limit = (sample_size as f64).log2().ceil() as usize;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let trees = (0..self.n_trees)
            .map(|_| {
                let rows = index::sample(&mut rng, n, sample_size).into_vec();
                grow(x, rows, 0, height_limit, &mut rng)
            })
            .collect();

        log::debug!(
            "Isolation forest: {} trees, subsample {}, height limit {}",
            self.n_trees,
            sample_size,
            height_limit
        );

        Ok(IsolationForestFit {
            trees,
            sample_size,
            n_features: x.ncols(),
        })
    }
}

fn grow(x: &Array2<f64>, rows: Vec<usize>, depth: usize, height_limit: usize, rng: &mut StdRng) -> Node {
    if depth >= height_limit || rows.len() <= 1 {
        return Node::Leaf { size: rows.len() };
    }

    // Features that still vary inside this node
    let ranges: Vec<(usize, f64, f64)> = (0..x.ncols())
        .filter_map(|f| {
            let (lo, hi) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
                (lo.min(x[[r, f]]), hi.max(x[[r, f]]))
            });
            (hi > lo).then_some((f, lo, hi))
        })
        .collect();

    if ranges.is_empty() {
        return Node::Leaf { size: rows.len() };
    }

    let (feature, lo, hi) = ranges[rng.gen_range(0..ranges.len())];
    let threshold = rng.gen_range(lo..hi);
    let (left, right): (Vec<usize>, Vec<usize>) = rows.into_iter().partition(|&r| x[[r, feature]] <= threshold);

    Node::Split {
        feature,
        threshold,
        left: Box::new(grow(x, left, depth + 1, height_limit, rng)),
        right: Box::new(grow(x, right, depth + 1, height_limit, rng)),
    }
}

impl IsolationForestFit {
    /// Mean path length of one point over all trees
    pub fn mean_path_length(&self, point: ArrayView1<f64>) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.path_length(point, 0)).sum();
        total / self.trees.len() as f64
    }

    /// Score every row (lower = more anomalous)
    pub fn score_samples(&self, x: &Array2<f64>) -> EngineResult<Vec<f64>> {
        if x.ncols() != self.n_features {
            return Err(EngineError::model_fit(format!(
                "expected {} features, got {}",
                self.n_features,
                x.ncols()
            )));
        }
        let c = average_path_length(self.sample_size);
        Ok(x.rows()
            .into_iter()
            .map(|row| {
                let h = self.mean_path_length(row);
                -(2f64.powf(-h / c))
            })
            .collect())
    }
}
