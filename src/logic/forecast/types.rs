//! Forecast Types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::logic::ml::PolynomialFit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    /// Strict sign of the delta
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            TrendDirection::Increasing
        } else if delta < 0.0 {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One projected bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted: f64,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Observed buckets, oldest first
    pub history: Vec<(NaiveDate, f64)>,
    pub points: Vec<ForecastPoint>,
    /// Last prediction minus last observation
    pub trend_delta: f64,
    pub direction: TrendDirection,
    /// Spread used for the confidence band
    pub spread: f64,
    pub model: PolynomialFit,
}

impl ForecastResult {
    pub fn last_observed(&self) -> Option<f64> {
        self.history.last().map(|(_, c)| *c)
    }

    pub fn mean_historical(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.history.iter().map(|(_, c)| c).sum::<f64>() / self.history.len() as f64
    }

    pub fn mean_forecast(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.points.iter().map(|p| p.predicted).sum::<f64>() / self.points.len() as f64
    }
}

/// Forecast of one technique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechniqueForecast {
    pub technique: String,
    /// 1-based frequency rank in the batch
    pub rank: usize,
    pub frequency: usize,
    pub forecast: ForecastResult,
    pub avg_historical: f64,
    pub avg_forecast: f64,
    pub change_percentage: f64,
}

impl TechniqueForecast {
    pub fn direction(&self) -> TrendDirection {
        self.forecast.direction
    }
}

/// Per-technique forecasts, most frequent technique first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechniqueForecasts {
    pub entries: Vec<TechniqueForecast>,
    /// Top techniques without an entry (too few buckets or failed fit)
    pub omitted: Vec<String>,
}

impl TechniqueForecasts {
    pub fn get(&self, technique: &str) -> Option<&TechniqueForecast> {
        self.entries.iter().find(|e| e.technique == technique)
    }

    pub fn increasing(&self) -> impl Iterator<Item = &TechniqueForecast> {
        self.entries
            .iter()
            .filter(|e| e.direction() == TrendDirection::Increasing)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Forecast of report volume mentioning one reference-region country
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographicForecast {
    pub country: String,
    pub mentions: usize,
    pub forecast: ForecastResult,
}
