//! Allocation Types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceCategory {
    Monitoring,
    IncidentResponse,
    Training,
    TechnicalControls,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 4] = [
        ResourceCategory::Monitoring,
        ResourceCategory::IncidentResponse,
        ResourceCategory::Training,
        ResourceCategory::TechnicalControls,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceCategory::Monitoring => "Monitoring",
            ResourceCategory::IncidentResponse => "Incident Response",
            ResourceCategory::Training => "Training",
            ResourceCategory::TechnicalControls => "Technical Controls",
        }
    }

    /// Reactive categories gain share as risk rises
    pub fn is_reactive(&self) -> bool {
        matches!(self, ResourceCategory::Monitoring | ResourceCategory::IncidentResponse)
    }
}

impl std::fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationLine {
    pub category: ResourceCategory,
    /// Percent of the total, lines sum to 100
    pub share: f64,
    pub rationale: String,
    pub focus_techniques: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    /// 0.0 (proactive) - 1.0 (reactive)
    pub intensity: f64,
    /// R: blended risk pair, 0 - 1
    pub risk_component: f64,
    /// P: mean composite of the top threats, 0 - 1
    pub priority_component: f64,
    pub lines: Vec<AllocationLine>,
}

/// Amount for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: ResourceCategory,
    pub share: f64,
    pub amount: f64,
}

impl AllocationPlan {
    pub fn share(&self, category: ResourceCategory) -> f64 {
        self.lines
            .iter()
            .find(|l| l.category == category)
            .map_or(0.0, |l| l.share)
    }

    pub fn total_share(&self) -> f64 {
        self.lines.iter().map(|l| l.share).sum()
    }

    /// Split `total` by share
    pub fn apply_budget(&self, total: f64) -> Vec<BudgetLine> {
        self.lines
            .iter()
            .map(|l| BudgetLine {
                category: l.category,
                share: l.share,
                amount: total * l.share / 100.0,
            })
            .collect()
    }
}
