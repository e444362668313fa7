//! Prioritization Types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::rules::{ELEVATED_THRESHOLD, HIGH_THRESHOLD, IMMEDIATE_THRESHOLD};
use crate::logic::mitre::MitreTactic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityFactor {
    Frequency,
    GeographicSpread,
    Recency,
    Sophistication,
}

impl PriorityFactor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityFactor::Frequency => "frequency",
            PriorityFactor::GeographicSpread => "geographic_spread",
            PriorityFactor::Recency => "recency",
            PriorityFactor::Sophistication => "sophistication",
        }
    }
}

/// One factor's share of the composite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    pub factor: PriorityFactor,
    /// Raw value (count, country count, days since last seen, 0-1 index)
    pub raw: f64,
    /// 0.0 - 1.0
    pub normalized: f64,
    pub weight: f64,
    /// weight * normalized * 100
    pub contribution: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriorityTier {
    Routine,
    Elevated,
    High,
    Immediate,
}

impl PriorityTier {
    pub fn from_score(composite: f64) -> Self {
        if composite >= IMMEDIATE_THRESHOLD {
            PriorityTier::Immediate
        } else if composite >= HIGH_THRESHOLD {
            PriorityTier::High
        } else if composite >= ELEVATED_THRESHOLD {
            PriorityTier::Elevated
        } else {
            PriorityTier::Routine
        }
    }

    /// One step up, saturating at Immediate
    pub fn promoted(self) -> Self {
        match self {
            PriorityTier::Routine => PriorityTier::Elevated,
            PriorityTier::Elevated => PriorityTier::High,
            PriorityTier::High | PriorityTier::Immediate => PriorityTier::Immediate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTier::Routine => "Routine",
            PriorityTier::Elevated => "Elevated",
            PriorityTier::High => "High",
            PriorityTier::Immediate => "Immediate",
        }
    }
}

impl std::fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedThreat {
    /// 1-based
    pub rank: usize,
    pub technique: String,
    pub display_name: String,
    pub tactic: Option<MitreTactic>,
    /// 0.0 - 100.0
    pub composite_score: f64,
    pub tier: PriorityTier,
    pub frequency: usize,
    pub countries: Vec<String>,
    pub last_seen: NaiveDate,
    pub factors: Vec<FactorContribution>,
}

impl PrioritizedThreat {
    pub fn factor(&self, factor: PriorityFactor) -> Option<&FactorContribution> {
        self.factors.iter().find(|f| f.factor == factor)
    }
}
