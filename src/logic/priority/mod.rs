//! Priority Module
//!
//! Ranks unique techniques by a weighted composite of frequency,
//! geographic spread, recency and (when clustering is ready)
//! sophistication. Every entry keeps its per-factor breakdown.
//!
//! ## Structure
//! - `types`: Prioritized threat, factor contributions, tiers
//! - `rules`: Weights and tier thresholds
//! - `ranker`: Scoring and ordering

pub mod types;
pub mod rules;
pub mod ranker;

pub use types::{FactorContribution, PrioritizedThreat, PriorityFactor, PriorityTier};
pub use ranker::{cluster_sophistication, factor_weights, prioritize_threats};
