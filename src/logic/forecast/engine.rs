//! Trend Forecasting Engine
//!
//! Fit `count ~ d + d^2` over day offsets, project `periods` buckets spaced
//! `PERIOD_DAYS` apart after the last observed bucket.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use super::series::CountSeries;
use super::types::{ForecastPoint, ForecastResult, TechniqueForecast, TechniqueForecasts, TrendDirection};
use crate::error::{EngineError, EngineResult};
use crate::logic::config::EngineConfig;
use crate::logic::ml::QuadraticRegression;
use crate::logic::outcome::MlOutcome;
use crate::logic::signals::{technique_observations, FieldMapping, ReportRecord};

/// Fewer underlying observations than this -> not applicable
pub const MIN_OBSERVATIONS: usize = 3;

/// Fewer distinct buckets than this -> not applicable
pub const MIN_BUCKETS: usize = 2;

pub const PERIOD_DAYS: i64 = 7;

/// Two-sided 95% normal quantile
pub const CONFIDENCE_Z: f64 = 1.96;

/// Band spread for an exactly-determined two-bucket fit, as a share of the mean count
const TWO_BUCKET_SPREAD: f64 = 0.3;

// ============================================================================
// AGGREGATE
// ============================================================================

/// Forecast a prepared series
pub fn forecast_counts(series: &CountSeries, config: &EngineConfig) -> MlOutcome<ForecastResult> {
    if !config.ml_enabled {
        return MlOutcome::disabled();
    }
    if let Some(reason) = insufficient(series) {
        return MlOutcome::not_applicable(format!("Insufficient data for trend forecasting: {}", reason));
    }
    MlOutcome::from_fit("Trend forecasting", project(series, config.forecast_periods, None))
}

/// Forecast report volume (records per report date)
pub fn forecast_records(records: &[ReportRecord], config: &EngineConfig) -> MlOutcome<ForecastResult> {
    let series = CountSeries::from_dates(records.iter().map(|r| r.report_date));
    forecast_counts(&series, config)
}

fn insufficient(series: &CountSeries) -> Option<String> {
    if series.observations() < MIN_OBSERVATIONS {
        Some(format!(
            "{} observations (need at least {})",
            series.observations(),
            MIN_OBSERVATIONS
        ))
    } else if series.bucket_count() < MIN_BUCKETS {
        Some(format!(
            "{} distinct report dates (need at least {})",
            series.bucket_count(),
            MIN_BUCKETS
        ))
    } else {
        None
    }
}

/// Fit and project. `spread` overrides the residual standard deviation.
pub(crate) fn project(series: &CountSeries, periods: usize, spread: Option<f64>) -> EngineResult<ForecastResult> {
    let (first, last) = match (series.first_date(), series.last_date()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(EngineError::model_fit("empty series")),
    };
    let (x, y) = series.design();
    let model = QuadraticRegression.fit(&x, &y)?;
    let spread = spread.unwrap_or(model.residual_std);
    let margin = CONFIDENCE_Z * spread;

    let last_offset = (last - first).num_days();
    let points: Vec<ForecastPoint> = (1..=periods as i64)
        .map(|i| {
            let step = PERIOD_DAYS * i;
            let predicted = model.predict((last_offset + step) as f64).max(0.0);
            ForecastPoint {
                date: last + Duration::days(step),
                predicted,
                lower: (predicted - margin).max(0.0),
                upper: predicted + margin,
            }
        })
        .collect();

    if points.iter().any(|p| !p.predicted.is_finite() || !p.upper.is_finite()) {
        return Err(EngineError::model_fit("projection is not finite"));
    }

    let last_observed = y.last().copied().unwrap_or(0.0);
    let trend_delta = points.last().map_or(0.0, |p| p.predicted - last_observed);

    Ok(ForecastResult {
        history: series.points(),
        points,
        trend_delta,
        direction: TrendDirection::from_delta(trend_delta),
        spread,
        model,
    })
}

// ============================================================================
// PER TECHNIQUE
// ============================================================================

/// Individual forecasts for the most frequent techniques
pub fn forecast_techniques(
    records: &[ReportRecord],
    mapping: &FieldMapping,
    config: &EngineConfig,
) -> MlOutcome<TechniqueForecasts> {
    if !config.ml_enabled {
        return MlOutcome::disabled();
    }

    let observations = technique_observations(records, mapping);
    if observations.len() < MIN_OBSERVATIONS {
        return MlOutcome::not_applicable(format!(
            "Insufficient data for per-technique forecasting: {} technique observations (need at least {})",
            observations.len(),
            MIN_OBSERVATIONS
        ));
    }

    let mut dates_by_technique: BTreeMap<&str, Vec<NaiveDate>> = BTreeMap::new();
    for (date, technique) in &observations {
        dates_by_technique.entry(technique.as_str()).or_default().push(*date);
    }

    // Frequency desc, then technique asc (BTreeMap order + stable sort)
    let mut ranked: Vec<(&str, Vec<NaiveDate>)> = dates_by_technique.into_iter().collect();
    ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    ranked.truncate(config.forecast_top_n);

    let mut result = TechniqueForecasts::default();
    for (idx, (technique, dates)) in ranked.into_iter().enumerate() {
        let frequency = dates.len();
        let series = CountSeries::from_dates(dates);

        if series.bucket_count() < MIN_BUCKETS {
            log::debug!("{}: single report date, no forecast", technique);
            result.omitted.push(technique.to_string());
            continue;
        }

        let spread = (series.bucket_count() == MIN_BUCKETS).then(|| TWO_BUCKET_SPREAD * series.mean_count());
        match project(&series, config.forecast_periods, spread) {
            Ok(forecast) => {
                let avg_historical = forecast.mean_historical();
                let avg_forecast = forecast.mean_forecast();
                let change_percentage = if avg_historical > 0.0 {
                    (avg_forecast - avg_historical) / avg_historical * 100.0
                } else {
                    0.0
                };
                result.entries.push(TechniqueForecast {
                    technique: technique.to_string(),
                    rank: idx + 1,
                    frequency,
                    forecast,
                    avg_historical,
                    avg_forecast,
                    change_percentage,
                });
            }
            Err(e) => {
                log::warn!("Forecast for {} unavailable: {}", technique, e);
                result.omitted.push(technique.to_string());
            }
        }
    }

    if result.is_empty() {
        return MlOutcome::not_applicable(
            "Insufficient data for per-technique forecasting: no top technique spans two report dates",
        );
    }

    log::debug!(
        "Per-technique forecasts: {} ready, {} omitted",
        result.entries.len(),
        result.omitted.len()
    );
    MlOutcome::Ready(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::signals::FieldValue;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_linear_series_projection() {
        let series = CountSeries::from_counts((1..=5).map(|i| (d(i), i as usize)));
        let forecast = forecast_counts(&series, &EngineConfig::default()).into_ready().unwrap();

        assert_eq!(forecast.points.len(), 4);
        assert_eq!(forecast.points[0].date, d(5) + Duration::days(7));
        for pair in forecast.points.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::days(7));
        }
        for p in &forecast.points {
            assert!(p.predicted >= 0.0 && p.lower >= 0.0);
            assert!(p.lower <= p.predicted && p.predicted <= p.upper);
        }
        // Day 4 -> 5 so day 32 -> 33
        assert!((forecast.points[3].predicted - 33.0).abs() < 1e-6);
        assert_eq!(forecast.direction, TrendDirection::Increasing);
    }

    #[test]
    fn test_declining_series_clamped() {
        let series = CountSeries::from_counts([(d(1), 9), (d(2), 6), (d(3), 3)]);
        let forecast = forecast_counts(&series, &EngineConfig::default()).into_ready().unwrap();

        assert!(forecast.points.iter().all(|p| p.predicted == 0.0 && p.lower == 0.0));
        assert!(forecast.trend_delta < 0.0);
        assert_eq!(forecast.direction, TrendDirection::Decreasing);
    }

    #[test]
    fn test_preconditions() {
        let config = EngineConfig::default();
        let few = CountSeries::from_counts([(d(1), 1), (d(2), 1)]);
        assert!(matches!(forecast_counts(&few, &config), MlOutcome::NotApplicable { .. }));

        let one_bucket = CountSeries::from_counts([(d(1), 10)]);
        assert!(matches!(forecast_counts(&one_bucket, &config), MlOutcome::NotApplicable { .. }));

        assert_eq!(forecast_counts(&few, &EngineConfig::without_ml()), MlOutcome::disabled());
    }

    fn technique_batch() -> (Vec<ReportRecord>, FieldMapping) {
        let rec = |day, ttps: &[&str]| {
            ReportRecord::new(d(day)).with_field("ttps", FieldValue::many(ttps.iter().copied()))
        };
        let records = vec![
            rec(1, &["T1566", "T1059"]),
            rec(8, &["T1566"]),
            rec(15, &["T1566", "T1486"]),
            rec(22, &["T1566", "T1059"]),
            rec(22, &["T1110"]),
        ];
        (records, FieldMapping::new(["ttps"], Vec::<String>::new()))
    }

    #[test]
    fn test_per_technique_ranking_and_omission() {
        let (records, mapping) = technique_batch();
        let forecasts = forecast_techniques(&records, &mapping, &EngineConfig::default())
            .into_ready()
            .unwrap();

        assert_eq!(forecasts.entries[0].technique, "T1566");
        assert_eq!(forecasts.entries[0].rank, 1);
        assert_eq!(forecasts.entries[0].frequency, 4);

        // T1059 has exactly two buckets -> spread from the mean count
        let t1059 = forecasts.get("T1059").unwrap();
        assert!((t1059.forecast.spread - 0.3).abs() < 1e-12);

        // Single-date techniques are omitted, not failed
        assert!(forecasts.get("T1486").is_none());
        assert!(forecasts.omitted.contains(&"T1486".to_string()));
        assert!(forecasts.omitted.contains(&"T1110".to_string()));
    }

    #[test]
    fn test_per_technique_top_n() {
        let (records, mapping) = technique_batch();
        let config = EngineConfig {
            forecast_top_n: 1,
            ..EngineConfig::default()
        };
        let forecasts = forecast_techniques(&records, &mapping, &config).into_ready().unwrap();
        assert_eq!(forecasts.entries.len(), 1);
        assert!(forecasts.omitted.is_empty());
    }

    #[test]
    fn test_per_technique_too_few_observations() {
        let records = vec![ReportRecord::new(d(1)).with_field("ttps", FieldValue::single("T1566"))];
        let mapping = FieldMapping::new(["ttps"], Vec::<String>::new());
        assert!(matches!(
            forecast_techniques(&records, &mapping, &EngineConfig::default()),
            MlOutcome::NotApplicable { .. }
        ));
    }
}
