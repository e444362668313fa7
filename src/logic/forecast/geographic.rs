//! Reference-region geographic forecast
//!
//! Per reference-region country in the batch: records mentioning it per
//! report date, projected with the same forecaster.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::engine::{project, MIN_BUCKETS, MIN_OBSERVATIONS};
use super::series::CountSeries;
use super::types::GeographicForecast;
use crate::logic::config::EngineConfig;
use crate::logic::geo;
use crate::logic::outcome::MlOutcome;
use crate::logic::signals::{FieldMapping, ReportRecord};

pub fn forecast_regions(
    records: &[ReportRecord],
    mapping: &FieldMapping,
    config: &EngineConfig,
) -> MlOutcome<Vec<GeographicForecast>> {
    if !config.ml_enabled {
        return MlOutcome::disabled();
    }

    // A record counts once per country, however many fields name it
    let mut dates_by_country: BTreeMap<String, Vec<NaiveDate>> = BTreeMap::new();
    for record in records {
        let mut named: Vec<String> = record
            .countries(mapping)
            .into_iter()
            .filter(|c| geo::is_reference_country(c))
            .collect();
        named.sort_unstable();
        named.dedup();
        for country in named {
            dates_by_country
                .entry(country)
                .or_default()
                .push(record.report_date);
        }
    }

    let mut forecasts = Vec::new();
    for (country, dates) in dates_by_country {
        let series = CountSeries::from_dates(dates);
        if series.observations() < MIN_OBSERVATIONS || series.bucket_count() < MIN_BUCKETS {
            log::debug!(
                "{}: {} mentions over {} dates, no forecast",
                country,
                series.observations(),
                series.bucket_count()
            );
            continue;
        }
        match project(&series, config.forecast_periods, None) {
            Ok(forecast) => forecasts.push(GeographicForecast {
                mentions: series.observations(),
                country,
                forecast,
            }),
            Err(e) => log::warn!("Geographic forecast for {} unavailable: {}", country, e),
        }
    }

    if forecasts.is_empty() {
        return MlOutcome::not_applicable(format!(
            "Insufficient data for {} geographic forecasting: no country with {} mentions over {} report dates",
            geo::REFERENCE_REGION_NAME,
            MIN_OBSERVATIONS,
            MIN_BUCKETS
        ));
    }
    MlOutcome::Ready(forecasts)
}
