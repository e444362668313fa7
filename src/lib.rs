//! Threat Analytics Engine
//!
//! Risk scoring (ISO 27005 / NIST SP 800-30 style) and ML analytics over
//! batches of threat intelligence reports: pattern clustering, anomaly flags,
//! trend forecasts, prioritization, resource allocation and an executive
//! summary.
//!
//! ```ignore
//! use threat_analytics_core::{AnalysisRequest, EngineConfig, FieldMapping, ThreatAnalyticsEngine};
//!
//! let engine = ThreatAnalyticsEngine::new(EngineConfig::from_env()?);
//! let mapping = FieldMapping::new(["ttp_1", "ttp_2"], ["country_1"]);
//! let report = engine.analyze(&AnalysisRequest::new(&records, &mapping));
//! println!("{}", report.summary.threat_level);
//! ```

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{EngineError, EngineResult};
pub use logic::config::EngineConfig;
pub use logic::engine::{AnalysisReport, AnalysisRequest, ThreatAnalyticsEngine};
pub use logic::outcome::MlOutcome;
pub use logic::signals::{FieldMapping, FieldValue, ReportRecord, SignalSet};

/// Install `env_logger` as the `log` backend (defaults to `info`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
