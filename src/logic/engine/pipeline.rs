//! Analysis Pipeline

use std::collections::BTreeSet;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::types::{AnalysisReport, AnalysisRequest, SignalSummary};
use crate::constants::ENGINE_VERSION;
use crate::logic::actors::profile_activity_groups;
use crate::logic::allocation::optimize_allocation;
use crate::logic::anomaly::{detect_anomalies, profile_features};
use crate::logic::clustering::cluster_techniques;
use crate::logic::config::EngineConfig;
use crate::logic::forecast::{forecast_records, forecast_regions, forecast_techniques};
use crate::logic::intel::extract_intel;
use crate::logic::priority::prioritize_threats;
use crate::logic::risk::{assess, RiskInputs, GAUGE_BANDS};
use crate::logic::signals::{extract_signals, technique_profiles, FieldMapping, ReportRecord};
use crate::logic::summary::{synthesize_summary, SummaryInputs};
use crate::logic::training::recommend_training;

#[derive(Serialize)]
struct FingerprintPayload<'a> {
    records: &'a [ReportRecord],
    mapping: &'a FieldMapping,
    selected_countries: &'a Option<BTreeSet<String>>,
}

/// Deterministic SHA-256 (hex) of the request inputs, for caller-side memoization
pub fn batch_fingerprint(request: &AnalysisRequest<'_>) -> String {
    let payload = FingerprintPayload {
        records: request.records,
        mapping: request.mapping,
        selected_countries: &request.selected_countries,
    };

    let mut hasher = Sha256::new();
    match serde_json::to_vec(&payload) {
        Ok(bytes) => hasher.update(&bytes),
        Err(e) => log::warn!("Batch fingerprint over partial input: {}", e),
    }
    hex::encode(hasher.finalize())
}

/// Threat analytics engine; configuration is fixed at construction
#[derive(Debug, Clone)]
pub struct ThreatAnalyticsEngine {
    config: EngineConfig,
}

impl Default for ThreatAnalyticsEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ThreatAnalyticsEngine {
    pub fn new(config: EngineConfig) -> Self {
        log::debug!(
            "Engine created (ML {}, seed {})",
            if config.ml_enabled { "enabled" } else { "disabled" },
            config.random_seed
        );
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze one report batch
    pub fn analyze(&self, request: &AnalysisRequest<'_>) -> AnalysisReport {
        let started = Instant::now();
        let config = &self.config;
        let records = request.records;
        let mapping = request.mapping;
        let analysis_id = Uuid::new_v4();

        // 1. Signals and country scope
        let signals = extract_signals(records, mapping);
        let scope = signals.scope_countries(request.selected_countries.as_ref());
        let profiles = technique_profiles(records, mapping);
        let as_of = records
            .iter()
            .map(|r| r.report_date)
            .max()
            .unwrap_or(NaiveDate::MIN);
        log::debug!(
            "[{}] {} records, {} technique tokens, {} unique, {} countries in scope",
            analysis_id,
            records.len(),
            signals.total_techniques(),
            signals.unique_count(),
            scope.country_count
        );

        // 2. Deterministic risk pair
        let risk = assess(&RiskInputs::from_signals(&signals, &scope));

        // 3. Statistical components, each contained
        let clusters = cluster_techniques(&signals.techniques, config);
        let anomalies = detect_anomalies(&profile_features(&profiles, as_of), config);
        let forecast = forecast_records(records, config);
        let technique_forecasts = forecast_techniques(records, mapping, config);
        let geographic_forecast = forecast_regions(records, mapping, config);

        // 4. Ranking and allocation
        let priorities = prioritize_threats(
            &profiles,
            clusters.ready(),
            &risk,
            as_of,
            config.recency_half_life_days,
        );
        let allocation = optimize_allocation(&risk, &priorities);

        // 5. Supplementary analytics
        let activity_groups = profile_activity_groups(&clusters, &profiles);
        let intel = extract_intel(records, mapping);
        let training = recommend_training(&priorities, &technique_forecasts);

        // 6. Executive summary
        let summary = synthesize_summary(&SummaryInputs {
            signals: &signals,
            scope: &scope,
            risk: &risk,
            priorities: &priorities,
            clusters: &clusters,
            anomalies: &anomalies,
            forecast: &forecast,
            technique_forecasts: &technique_forecasts,
        });

        let report = AnalysisReport {
            analysis_id,
            generated_at: Utc::now(),
            engine_version: ENGINE_VERSION,
            batch_fingerprint: batch_fingerprint(request),
            signals: SignalSummary::new(records.len(), &signals),
            scope,
            risk,
            gauge_bands: &GAUGE_BANDS,
            clusters,
            anomalies,
            forecast,
            technique_forecasts,
            geographic_forecast,
            priorities,
            allocation,
            activity_groups,
            intel,
            training,
            summary,
        };

        log::info!(
            "[{}] Analysis complete in {:?}: threat level {}, ready components [{}]",
            analysis_id,
            started.elapsed(),
            report.summary.threat_level,
            report.ready_components().join(", ")
        );
        report
    }
}
