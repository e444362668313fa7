//! Engine request / report types

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::logic::actors::ActivityGroup;
use crate::logic::allocation::AllocationPlan;
use crate::logic::anomaly::AnomalyReport;
use crate::logic::clustering::ClusterAssignment;
use crate::logic::forecast::{ForecastResult, GeographicForecast, TechniqueForecasts};
use crate::logic::intel::IntelExtraction;
use crate::logic::outcome::MlOutcome;
use crate::logic::priority::PrioritizedThreat;
use crate::logic::risk::{GaugeBand, RiskAssessment};
use crate::logic::signals::{CountryScope, FieldMapping, ReportRecord, SignalSet};
use crate::logic::summary::ExecutiveSummary;
use crate::logic::training::TrainingRecommendation;

// ============================================================================
// REQUEST
// ============================================================================

/// One report batch plus the columns ingestion discovered
#[derive(Debug, Clone)]
pub struct AnalysisRequest<'a> {
    pub records: &'a [ReportRecord],
    pub mapping: &'a FieldMapping,
    /// Country filter; `None` selects the reference-region countries present
    pub selected_countries: Option<BTreeSet<String>>,
}

impl<'a> AnalysisRequest<'a> {
    pub fn new(records: &'a [ReportRecord], mapping: &'a FieldMapping) -> Self {
        Self {
            records,
            mapping,
            selected_countries: None,
        }
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_countries = Some(countries.into_iter().map(Into::into).collect());
        self
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// Signal counts shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalSummary {
    pub record_count: usize,
    pub total_techniques: usize,
    pub unique_techniques: usize,
    pub countries: Vec<String>,
    pub source_count: usize,
}

impl SignalSummary {
    pub fn new(record_count: usize, signals: &SignalSet) -> Self {
        Self {
            record_count,
            total_techniques: signals.total_techniques(),
            unique_techniques: signals.unique_count(),
            countries: signals.countries.iter().cloned().collect(),
            source_count: signals.source_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub engine_version: &'static str,
    /// SHA-256 of the request inputs (hex)
    pub batch_fingerprint: String,

    pub signals: SignalSummary,
    pub scope: CountryScope,
    pub risk: RiskAssessment,
    pub gauge_bands: &'static [GaugeBand],

    pub clusters: MlOutcome<ClusterAssignment>,
    pub anomalies: MlOutcome<AnomalyReport>,
    pub forecast: MlOutcome<ForecastResult>,
    pub technique_forecasts: MlOutcome<TechniqueForecasts>,
    pub geographic_forecast: MlOutcome<Vec<GeographicForecast>>,

    pub priorities: Vec<PrioritizedThreat>,
    pub allocation: AllocationPlan,
    pub activity_groups: MlOutcome<Vec<ActivityGroup>>,
    pub intel: IntelExtraction,
    pub training: Vec<TrainingRecommendation>,

    pub summary: ExecutiveSummary,
}

impl AnalysisReport {
    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::Serialization(e.to_string()))
    }

    /// Statistical components that produced output
    pub fn ready_components(&self) -> Vec<&'static str> {
        let mut ready = Vec::new();
        if self.clusters.is_ready() {
            ready.push("clustering");
        }
        if self.anomalies.is_ready() {
            ready.push("anomaly_detection");
        }
        if self.forecast.is_ready() {
            ready.push("forecast");
        }
        if self.technique_forecasts.is_ready() {
            ready.push("technique_forecasts");
        }
        if self.geographic_forecast.is_ready() {
            ready.push("geographic_forecast");
        }
        if self.activity_groups.is_ready() {
            ready.push("activity_groups");
        }
        ready
    }
}
