//! Signals Module
//!
//! Flattens technique / country / source columns of a report batch into
//! the signal set every other component consumes.
//!
//! ## Structure
//! - `types`: Report records, field values, signal set, technique profiles
//! - `extract`: Normalization and aggregation logic

pub mod types;
pub mod extract;

#[cfg(test)]
mod tests;

pub use types::{CountryScope, FieldMapping, FieldValue, ReportRecord, SignalSet, TechniqueProfile};
pub use extract::{
    extract_signals, is_placeholder, report_periods, select_period, technique_observations,
    technique_profiles,
};
