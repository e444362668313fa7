//! Risk Scoring Rules & Thresholds
//!
//! Weights and level thresholds for the two scoring frameworks.
//! Constants only, the formulas live in `scoring`.

// ============================================================================
// LEVEL THRESHOLDS (shared with the gauge renderer)
// ============================================================================

/// Scores at or above this are at least Medium
pub const MEDIUM_THRESHOLD: f64 = 50.0;

/// Scores above this are at least High
pub const HIGH_THRESHOLD: f64 = 75.0;

/// Scores at or above this are Critical
pub const CRITICAL_THRESHOLD: f64 = 90.0;

/// Every score starts here, even with no signals
pub const SCORE_FLOOR: f64 = 10.0;

pub const SCORE_MAX: f64 = 100.0;

// ============================================================================
// ISO 27005 STYLE (likelihood from volume, exposure, corroboration)
// ============================================================================

pub const ISO_VOLUME_WEIGHT: f64 = 40.0;
pub const ISO_VOLUME_SCALE: f64 = 15.0;

pub const ISO_COUNTRY_WEIGHT: f64 = 25.0;
pub const ISO_COUNTRY_SCALE: f64 = 5.0;

pub const ISO_SOURCE_WEIGHT: f64 = 25.0;
pub const ISO_SOURCE_SCALE: f64 = 3.0;

/// Multiplier when the selection touches the reference region
pub const ISO_REGIONAL_BOOST: f64 = 1.20;

// ============================================================================
// NIST SP 800-30 STYLE (adversary capability from technique diversity)
// ============================================================================

pub const NIST_VOLUME_WEIGHT: f64 = 25.0;
pub const NIST_VOLUME_SCALE: f64 = 20.0;

pub const NIST_COUNTRY_WEIGHT: f64 = 20.0;
pub const NIST_COUNTRY_SCALE: f64 = 5.0;

pub const NIST_DIVERSITY_WEIGHT: f64 = 45.0;
pub const NIST_DIVERSITY_SCALE: f64 = 8.0;

pub const NIST_REGIONAL_BOOST: f64 = 1.15;
