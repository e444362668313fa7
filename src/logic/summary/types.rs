//! Summary Types

use serde::{Deserialize, Serialize};

use crate::logic::risk::RiskLevel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    /// Level of the higher risk score
    pub threat_level: RiskLevel,
    pub threat_color: String,
    /// 0.4 - 1.0
    pub confidence: f64,
    /// ML outputs that were ready (of 4)
    pub ready_components: usize,
    pub key_insights: Vec<String>,
    pub attack_patterns: Vec<String>,
}

impl ExecutiveSummary {
    pub fn confidence_percentage(&self) -> f64 {
        self.confidence * 100.0
    }

    /// Insights flagging a missing sub-result
    pub fn gaps(&self) -> impl Iterator<Item = &String> {
        self.key_insights.iter().filter(|i| i.starts_with("Insufficient data"))
    }
}
