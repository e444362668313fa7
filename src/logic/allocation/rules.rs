//! Allocation Profiles & Weights
//!
//! Shares are percentages in category order:
//! Monitoring, Incident Response, Training, Technical Controls.

/// Low-risk posture
pub const PROACTIVE_PROFILE: [f64; 4] = [25.0, 15.0, 30.0, 30.0];

/// High-risk posture
pub const REACTIVE_PROFILE: [f64; 4] = [30.0, 40.0, 10.0, 20.0];

// ============================================================================
// INTENSITY = 0.7 * R + 0.3 * P
// ============================================================================

/// Weight of the higher risk score inside R
pub const RISK_MAX_WEIGHT: f64 = 0.6;

/// Weight of the lower risk score inside R
pub const RISK_MIN_WEIGHT: f64 = 0.4;

pub const RISK_INTENSITY_WEIGHT: f64 = 0.7;
pub const PRIORITY_INTENSITY_WEIGHT: f64 = 0.3;

/// Top prioritized threats averaged into P
pub const PRIORITY_WINDOW: usize = 5;

/// Techniques named per allocation line
pub const FOCUS_TECHNIQUES: usize = 3;
