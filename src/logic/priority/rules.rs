//! Prioritization Weights & Thresholds
//!
//! Constants only, scoring lives in `ranker`.

// ============================================================================
// FACTOR WEIGHTS (sum to 1.0)
// ============================================================================

pub const FREQUENCY_WEIGHT: f64 = 0.35;
pub const SPREAD_WEIGHT: f64 = 0.25;
pub const RECENCY_WEIGHT: f64 = 0.20;

/// Dropped (and the rest renormalized) when clustering is not ready
pub const SOPHISTICATION_WEIGHT: f64 = 0.20;

// ============================================================================
// SOPHISTICATION
// ============================================================================

/// Rarer patterns weigh more
pub const RARITY_WEIGHT: f64 = 0.6;

/// Tighter clusters weigh more
pub const TIGHTNESS_WEIGHT: f64 = 0.4;

// ============================================================================
// TIERS (composite score, 0 - 100)
// ============================================================================

pub const IMMEDIATE_THRESHOLD: f64 = 70.0;
pub const HIGH_THRESHOLD: f64 = 50.0;
pub const ELEVATED_THRESHOLD: f64 = 30.0;

/// Tiers move up one step when the higher risk score exceeds this
pub const TIER_PROMOTION_RISK: f64 = 75.0;
