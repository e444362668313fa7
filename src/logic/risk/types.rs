//! Risk Types
//!
//! Scores, levels and the presentation bands attached to them.

use serde::{Deserialize, Serialize};

use super::rules::{CRITICAL_THRESHOLD, HIGH_THRESHOLD, MEDIUM_THRESHOLD};
use crate::logic::signals::{CountryScope, SignalSet};

// ============================================================================
// RISK LEVEL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Low < 50 <= Medium <= 75 < High < 90 <= Critical
    pub fn from_score(score: f64) -> Self {
        if score >= CRITICAL_THRESHOLD {
            RiskLevel::Critical
        } else if score > HIGH_THRESHOLD {
            RiskLevel::High
        } else if score >= MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#44ff44",      // Green
            RiskLevel::Medium => "#ffaa00",   // Orange
            RiskLevel::High => "#ff4444",     // Red
            RiskLevel::Critical => "#ff0000", // Deep red
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RISK FRAMEWORK / SCORE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFramework {
    Iso27005,
    NistSp80030,
}

impl RiskFramework {
    pub fn label(&self) -> &'static str {
        match self {
            RiskFramework::Iso27005 => "ISO 27005",
            RiskFramework::NistSp80030 => "NIST SP 800-30",
        }
    }
}

/// Gauge band for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeBand {
    pub from: f64,
    pub to: f64,
    pub color: &'static str,
}

/// Gauge bands: [0,50) green, [50,75] orange, (75,100] red
pub const GAUGE_BANDS: [GaugeBand; 3] = [
    GaugeBand { from: 0.0, to: MEDIUM_THRESHOLD, color: "rgba(68, 255, 68, 0.2)" },
    GaugeBand { from: MEDIUM_THRESHOLD, to: HIGH_THRESHOLD, color: "rgba(255, 170, 0, 0.2)" },
    GaugeBand { from: HIGH_THRESHOLD, to: 100.0, color: "rgba(255, 68, 68, 0.2)" },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    pub framework: RiskFramework,
    /// 0.0 - 100.0
    pub score: f64,
    pub level: RiskLevel,
    pub color: String,
}

impl RiskScore {
    pub fn new(framework: RiskFramework, score: f64) -> Self {
        let level = RiskLevel::from_score(score);
        Self {
            framework,
            score,
            level,
            color: level.color().to_string(),
        }
    }
}

// ============================================================================
// INPUTS
// ============================================================================

/// Counts the formulas consume
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskInputs {
    pub total_techniques: usize,
    pub unique_techniques: usize,
    pub country_count: usize,
    pub source_count: usize,
    pub regional_focus: bool,
}

impl RiskInputs {
    pub fn from_signals(signals: &SignalSet, scope: &CountryScope) -> Self {
        Self {
            total_techniques: signals.total_techniques(),
            unique_techniques: signals.unique_count(),
            country_count: scope.country_count,
            source_count: signals.source_count,
            regional_focus: scope.regional_focus,
        }
    }

    pub fn with_regional_focus(mut self, regional_focus: bool) -> Self {
        self.regional_focus = regional_focus;
        self
    }
}

/// Both framework scores for one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub iso: RiskScore,
    pub nist: RiskScore,
    pub inputs: RiskInputs,
}

impl RiskAssessment {
    /// The higher of the two scores
    pub fn max_score(&self) -> f64 {
        self.iso.score.max(self.nist.score)
    }

    pub fn min_score(&self) -> f64 {
        self.iso.score.min(self.nist.score)
    }

    /// Level of the higher score
    pub fn overall_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.max_score())
    }
}
