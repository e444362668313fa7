//! Engine Module
//!
//! Runs one analysis request end to end:
//! signals -> risk -> clustering / anomalies / forecasts -> priorities
//! -> allocation -> activity groups, intel, training -> summary.
//!
//! Every component failure stays local; `analyze` itself never fails.

pub mod types;
pub mod pipeline;


pub use types::{AnalysisReport, AnalysisRequest, SignalSummary};
pub use pipeline::{batch_fingerprint, ThreatAnalyticsEngine};
