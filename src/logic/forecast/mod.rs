//! Forecast Module
//!
//! Degree-2 polynomial trend projection over date-bucketed counts, for the
//! whole batch, per top technique and per reference-region country.
//!
//! ## Structure
//! - `types`: Forecast points, trend direction, per-technique entries
//! - `series`: Date -> count buckets
//! - `engine`: Aggregate and per-technique forecasts
//! - `geographic`: Reference-region country forecasts

pub mod types;
pub mod series;
pub mod engine;
pub mod geographic;

pub use types::{
    ForecastPoint, ForecastResult, GeographicForecast, TechniqueForecast, TechniqueForecasts,
    TrendDirection,
};
pub use series::CountSeries;
pub use engine::{
    forecast_counts, forecast_records, forecast_techniques, CONFIDENCE_Z, MIN_BUCKETS,
    MIN_OBSERVATIONS, PERIOD_DAYS,
};
pub use geographic::forecast_regions;
