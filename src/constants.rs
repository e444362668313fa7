//! Central Configuration Constants
//!
//! Single source of truth for all engine defaults.
//! `EngineConfig::default()` and `EngineConfig::from_env()` read from here.

/// Seed shared by k-means++ initialisation and isolation trees
pub const DEFAULT_RANDOM_SEED: u64 = 42;

/// Number of future weekly buckets projected by the forecaster
pub const DEFAULT_FORECAST_PERIODS: usize = 4;

/// Number of most frequent techniques forecast individually
pub const DEFAULT_FORECAST_TOP_N: usize = 5;

/// k-means restarts per candidate k (best inertia wins)
pub const DEFAULT_KMEANS_RESTARTS: usize = 10;

/// Trees in the isolation forest
pub const DEFAULT_ISOLATION_TREES: usize = 100;

/// Days after which recency weight has decayed to 1/e
pub const DEFAULT_RECENCY_HALF_LIFE_DAYS: f64 = 30.0;

/// App version
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Check if the ML pipelines are enabled
pub fn is_ml_enabled() -> bool {
    std::env::var("THREAT_ENGINE_ML_ENABLED")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}

/// Get random seed from environment or use default
pub fn get_random_seed() -> u64 {
    std::env::var("THREAT_ENGINE_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RANDOM_SEED)
}

/// Get forecast horizon from environment or use default
pub fn get_forecast_periods() -> usize {
    std::env::var("THREAT_ENGINE_FORECAST_PERIODS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FORECAST_PERIODS)
}

/// Get per-technique forecast count from environment or use default
pub fn get_forecast_top_n() -> usize {
    std::env::var("THREAT_ENGINE_FORECAST_TOP_N")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FORECAST_TOP_N)
}

/// Get recency half-life (days) from environment or use default
pub fn get_recency_half_life_days() -> f64 {
    std::env::var("THREAT_ENGINE_RECENCY_DAYS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RECENCY_HALF_LIFE_DAYS)
}
