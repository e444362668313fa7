//! Clustering Module
//!
//! Groups technique tokens into attack patterns: TF-IDF vectors, k-means
//! over k = 2..=6, best silhouette wins.
//!
//! ## Structure
//! - `types`: Cluster assignment and per-cluster summaries
//! - `engine`: Preconditions, model selection, summarization
//!
//! ## Usage
//! ```ignore
//! use crate::logic::clustering::cluster_techniques;
//!
//! match cluster_techniques(&signals.techniques, &config) {
//!     MlOutcome::Ready(assignment) => println!("k = {}", assignment.k),
//!     other => println!("no clusters: {:?}", other.reason()),
//! }
//! ```

pub mod types;
pub mod engine;

pub use types::{Cluster, ClusterAssignment};
pub use engine::{
    cluster_techniques, MAX_CANDIDATE_K, MIN_CLUSTER_TOKENS, TOP_TERMS_PER_CLUSTER,
};
