//! Anomaly Module
//!
//! Isolation-forest outlier flags over a standardized feature matrix.
//! By default one row per technique profile.
//!
//! ## Structure
//! - `types`: Feature matrix and anomaly report
//! - `features`: Technique profile -> feature row
//! - `detector`: Preconditions, scoring, 10th-percentile flagging

pub mod types;
pub mod features;
pub mod detector;

pub use types::{AnomalousRow, AnomalyReport, FeatureMatrix};
pub use features::{profile_features, PROFILE_FEATURES};
pub use detector::{detect_anomalies, CONTAMINATION, MIN_ANOMALY_ROWS};
