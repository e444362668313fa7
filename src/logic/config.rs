//! Engine Configuration
//!
//! Fixed at engine construction. The ML capability is a plain flag here,
//! every statistical component checks it once at entry.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{EngineError, EngineResult};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Enable clustering / anomaly detection / forecasting
    pub ml_enabled: bool,

    /// Seed for k-means++ and isolation trees
    pub random_seed: u64,

    /// Weekly buckets projected by the forecaster
    pub forecast_periods: usize,

    /// Techniques forecast individually
    pub forecast_top_n: usize,

    /// k-means restarts per candidate k
    pub kmeans_restarts: usize,

    /// Trees in the isolation forest
    pub isolation_trees: usize,

    /// Recency decay constant for prioritization (days)
    pub recency_half_life_days: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ml_enabled: true,
            random_seed: constants::DEFAULT_RANDOM_SEED,
            forecast_periods: constants::DEFAULT_FORECAST_PERIODS,
            forecast_top_n: constants::DEFAULT_FORECAST_TOP_N,
            kmeans_restarts: constants::DEFAULT_KMEANS_RESTARTS,
            isolation_trees: constants::DEFAULT_ISOLATION_TREES,
            recency_half_life_days: constants::DEFAULT_RECENCY_HALF_LIFE_DAYS,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> EngineResult<Self> {
        let config = Self {
            ml_enabled: constants::is_ml_enabled(),
            random_seed: constants::get_random_seed(),
            forecast_periods: constants::get_forecast_periods(),
            forecast_top_n: constants::get_forecast_top_n(),
            recency_half_life_days: constants::get_recency_half_life_days(),
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file (missing keys take defaults)
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        log::debug!("Engine config loaded from {}", path.as_ref().display());
        Ok(config)
    }

    /// Config with every ML component switched off
    pub fn without_ml() -> Self {
        Self {
            ml_enabled: false,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.forecast_periods == 0 {
            return Err(EngineError::InvalidConfig("forecast_periods must be at least 1".into()));
        }
        if self.forecast_top_n == 0 {
            return Err(EngineError::InvalidConfig("forecast_top_n must be at least 1".into()));
        }
        if self.kmeans_restarts == 0 {
            return Err(EngineError::InvalidConfig("kmeans_restarts must be at least 1".into()));
        }
        if self.isolation_trees == 0 {
            return Err(EngineError::InvalidConfig("isolation_trees must be at least 1".into()));
        }
        if !(self.recency_half_life_days.is_finite() && self.recency_half_life_days > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "recency_half_life_days must be positive, got {}",
                self.recency_half_life_days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.ml_enabled);
        assert_eq!(config.random_seed, 42);
        assert_eq!(config.forecast_periods, 4);
        assert_eq!(config.forecast_top_n, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "ml_enabled": false, "forecast_periods": 8 }}"#).unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert!(!config.ml_enabled);
        assert_eq!(config.forecast_periods, 8);
        assert_eq!(config.forecast_top_n, 5);
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "forecast_periods": 0 }}"#).unwrap();

        match EngineConfig::from_file(file.path()) {
            Err(EngineError::InvalidConfig(msg)) => assert!(msg.contains("forecast_periods")),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_from_file_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            EngineConfig::from_file(file.path()),
            Err(EngineError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            EngineConfig::from_file("/nonexistent/engine.json"),
            Err(EngineError::ConfigIo(_))
        ));
    }
}
