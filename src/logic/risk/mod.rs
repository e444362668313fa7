//! Risk Module
//!
//! Deterministic ISO 27005 / NIST SP 800-30 style scoring of a signal set.
//!
//! ## Structure
//! - `types`: RiskLevel, RiskScore, RiskInputs, RiskAssessment
//! - `rules`: Weights, scales and level thresholds
//! - `scoring`: The two formulas
//!
//! ## Usage
//! ```ignore
//! use crate::logic::risk::{assess, RiskInputs};
//!
//! let assessment = assess(&RiskInputs::from_signals(&signals, &scope));
//! println!("{} / {}", assessment.iso.level, assessment.nist.level);
//! ```

pub mod types;
pub mod rules;
pub mod scoring;

pub use types::{GaugeBand, RiskAssessment, RiskFramework, RiskInputs, RiskLevel, RiskScore, GAUGE_BANDS};
pub use rules::{CRITICAL_THRESHOLD, HIGH_THRESHOLD, MEDIUM_THRESHOLD, SCORE_FLOOR};
pub use scoring::{assess, calculate_iso_risk_score, calculate_nist_risk_score};
