//! Executive Summary Synthesizer

use super::types::ExecutiveSummary;
use crate::logic::anomaly::AnomalyReport;
use crate::logic::clustering::ClusterAssignment;
use crate::logic::forecast::{ForecastResult, TechniqueForecasts};
use crate::logic::geo;
use crate::logic::mitre;
use crate::logic::outcome::MlOutcome;
use crate::logic::priority::PrioritizedThreat;
use crate::logic::risk::RiskAssessment;
use crate::logic::signals::{CountryScope, SignalSet};

/// Confidence with no ML output ready
pub const BASE_CONFIDENCE: f64 = 0.4;

/// Added per ready ML output (clustering, anomalies, both forecasts)
pub const CONFIDENCE_PER_COMPONENT: f64 = 0.15;

const TOP_THREATS_IN_SUMMARY: usize = 3;
const TERMS_PER_PATTERN: usize = 3;

/// Everything the summary reads
#[derive(Debug, Clone, Copy)]
pub struct SummaryInputs<'a> {
    pub signals: &'a SignalSet,
    pub scope: &'a CountryScope,
    pub risk: &'a RiskAssessment,
    pub priorities: &'a [PrioritizedThreat],
    pub clusters: &'a MlOutcome<ClusterAssignment>,
    pub anomalies: &'a MlOutcome<AnomalyReport>,
    pub forecast: &'a MlOutcome<ForecastResult>,
    pub technique_forecasts: &'a MlOutcome<TechniqueForecasts>,
}

impl SummaryInputs<'_> {
    fn ready_components(&self) -> usize {
        [
            self.clusters.is_ready(),
            self.anomalies.is_ready(),
            self.forecast.is_ready(),
            self.technique_forecasts.is_ready(),
        ]
        .iter()
        .filter(|r| **r)
        .count()
    }
}

/// "Insufficient data ..." line for a missing sub-result
fn gap<T>(component: &str, outcome: &MlOutcome<T>) -> String {
    match outcome.reason() {
        Some(reason) if reason.starts_with("Insufficient data") => reason.to_string(),
        Some(reason) => format!("Insufficient data for {}: {}", component, reason),
        None => format!("Insufficient data for {}", component),
    }
}

pub fn synthesize_summary(inputs: &SummaryInputs<'_>) -> ExecutiveSummary {
    let threat_level = inputs.risk.overall_level();
    let ready_components = inputs.ready_components();
    let confidence = (BASE_CONFIDENCE + CONFIDENCE_PER_COMPONENT * ready_components as f64).min(1.0);

    let mut key_insights = Vec::new();

    // Risk pair
    key_insights.push(format!(
        "Overall threat level {}: {} {:.1} ({}), {} {:.1} ({})",
        threat_level,
        inputs.risk.iso.framework.label(),
        inputs.risk.iso.score,
        inputs.risk.iso.level,
        inputs.risk.nist.framework.label(),
        inputs.risk.nist.score,
        inputs.risk.nist.level
    ));

    key_insights.push(format!(
        "{} technique observations across {} unique techniques from {} sources",
        inputs.signals.total_techniques(),
        inputs.signals.unique_count(),
        inputs.signals.source_count
    ));

    if inputs.scope.regional_focus {
        let in_region: Vec<&String> = inputs
            .scope
            .selected
            .iter()
            .filter(|c| geo::is_reference_country(c))
            .collect();
        key_insights.push(format!(
            "{} focus: {} in scope, regional weighting applied to both scores",
            geo::REFERENCE_REGION_NAME,
            join(in_region.iter().map(|c| c.as_str()))
        ));
    }

    // Top threats
    if inputs.priorities.is_empty() {
        key_insights.push("Insufficient data for threat prioritization: no techniques reported".to_string());
    } else {
        let top: Vec<String> = inputs
            .priorities
            .iter()
            .take(TOP_THREATS_IN_SUMMARY)
            .map(|t| format!("{} ({:.1}, {})", t.display_name, t.composite_score, t.tier))
            .collect();
        key_insights.push(format!("Top priority threats: {}", top.join("; ")));
    }

    // Aggregate trend
    match inputs.forecast {
        MlOutcome::Ready(forecast) => key_insights.push(format!(
            "Report volume is {} ({:+.1} reports per bucket by {})",
            forecast.direction,
            forecast.trend_delta,
            forecast
                .points
                .last()
                .map_or_else(|| "the horizon".to_string(), |p| p.date.to_string())
        )),
        other => key_insights.push(gap("trend forecasting", other)),
    }

    // Per-technique trends
    match inputs.technique_forecasts {
        MlOutcome::Ready(forecasts) => {
            let rising: Vec<String> = forecasts
                .increasing()
                .map(|f| format!("{} ({:+.0}%)", mitre::display_name(&f.technique), f.change_percentage))
                .collect();
            if rising.is_empty() {
                key_insights.push("No top technique is projected to increase".to_string());
            } else {
                key_insights.push(format!("Techniques projected to increase: {}", rising.join(", ")));
            }
        }
        other => key_insights.push(gap("per-technique forecasting", other)),
    }

    // Anomalies
    match inputs.anomalies {
        MlOutcome::Ready(report) if report.anomalies.is_empty() => {
            key_insights.push("No anomalous technique activity profiles detected".to_string());
        }
        MlOutcome::Ready(report) => key_insights.push(format!(
            "{} technique(s) with anomalous activity profiles: {}",
            report.flagged_count(),
            join(report.anomalies.iter().map(|a| a.label.as_str()))
        )),
        other => key_insights.push(gap("anomaly detection", other)),
    }

    // Clusters
    let attack_patterns = match inputs.clusters {
        MlOutcome::Ready(assignment) => {
            key_insights.push(format!(
                "{} distinct attack patterns identified (silhouette {:.2})",
                assignment.k, assignment.silhouette
            ));
            describe_patterns(assignment)
        }
        other => {
            key_insights.push(gap("pattern clustering", other));
            Vec::new()
        }
    };

    log::info!(
        "Executive summary: {} threat level, {:.0}% confidence",
        threat_level,
        confidence * 100.0
    );

    ExecutiveSummary {
        threat_level,
        threat_color: threat_level.color().to_string(),
        confidence,
        ready_components,
        key_insights,
        attack_patterns,
    }
}

fn describe_patterns(assignment: &ClusterAssignment) -> Vec<String> {
    assignment
        .by_size()
        .into_iter()
        .map(|cluster| {
            let members = join(cluster.members.iter().map(|m| m.as_str()));
            let terms: Vec<&str> = cluster
                .top_terms
                .iter()
                .take(TERMS_PER_PATTERN)
                .map(String::as_str)
                .collect();
            format!(
                "Pattern {} ({:.1}% of observations): {}; key terms: {}",
                cluster.id + 1,
                cluster.percentage,
                members,
                if terms.is_empty() { "-".to_string() } else { terms.join(", ") }
            )
        })
        .collect()
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::risk::{assess, RiskInputs, RiskLevel};

    fn empty_inputs<'a>(
        signals: &'a SignalSet,
        scope: &'a CountryScope,
        risk: &'a RiskAssessment,
        na: &'a (
            MlOutcome<ClusterAssignment>,
            MlOutcome<AnomalyReport>,
            MlOutcome<ForecastResult>,
            MlOutcome<TechniqueForecasts>,
        ),
    ) -> SummaryInputs<'a> {
        SummaryInputs {
            signals,
            scope,
            risk,
            priorities: &[],
            clusters: &na.0,
            anomalies: &na.1,
            forecast: &na.2,
            technique_forecasts: &na.3,
        }
    }

    #[test]
    fn test_all_missing_is_explicit() {
        let signals = SignalSet::default();
        let scope = CountryScope::default();
        let risk = assess(&RiskInputs::default());
        let na = (
            MlOutcome::not_applicable("Insufficient data for clustering: 0 technique tokens"),
            MlOutcome::degraded("Model fit failed: boom"),
            MlOutcome::disabled(),
            MlOutcome::not_applicable("Insufficient data for per-technique forecasting"),
        );
        let summary = synthesize_summary(&empty_inputs(&signals, &scope, &risk, &na));

        assert_eq!(summary.threat_level, RiskLevel::Low);
        assert_eq!(summary.ready_components, 0);
        assert!((summary.confidence - BASE_CONFIDENCE).abs() < 1e-12);
        assert!((summary.confidence_percentage() - 40.0).abs() < 1e-9);
        assert!(summary.attack_patterns.is_empty());
        // clustering, anomalies, forecast, per-technique, prioritization
        assert_eq!(summary.gaps().count(), 5);
        assert!(summary
            .key_insights
            .iter()
            .any(|i| i.starts_with("Insufficient data for anomaly detection: Model fit failed")));
    }

    #[test]
    fn test_regional_focus_insight() {
        let signals = SignalSet::default();
        let scope = CountryScope {
            selected: ["Finland".to_string(), "Germany".to_string()].into_iter().collect(),
            country_count: 2,
            regional_focus: true,
        };
        let risk = assess(&RiskInputs::default().with_regional_focus(true));
        let na = (
            MlOutcome::disabled(),
            MlOutcome::disabled(),
            MlOutcome::disabled(),
            MlOutcome::disabled(),
        );
        let summary = synthesize_summary(&empty_inputs(&signals, &scope, &risk, &na));
        let regional = summary
            .key_insights
            .iter()
            .find(|i| i.starts_with("Nordic-Baltic focus"))
            .unwrap();
        assert!(regional.contains("Finland"));
        assert!(!regional.contains("Germany"));
    }
}
