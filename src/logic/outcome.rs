//! Typed outcome of a statistical component
//!
//! `NotApplicable` = precondition not met (too few samples, ML disabled).
//! `Degraded` = the computation itself failed and was contained.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum MlOutcome<T> {
    Ready(T),
    NotApplicable { reason: String },
    Degraded { reason: String },
}

impl<T> MlOutcome<T> {
    pub fn not_applicable(reason: impl Into<String>) -> Self {
        MlOutcome::NotApplicable { reason: reason.into() }
    }

    pub fn degraded(reason: impl Into<String>) -> Self {
        MlOutcome::Degraded { reason: reason.into() }
    }

    /// Outcome for a component skipped because ML is switched off
    pub fn disabled() -> Self {
        Self::not_applicable("machine-learning capability disabled")
    }

    /// Contain a fit error: log it and degrade
    pub fn from_fit(component: &str, result: Result<T, EngineError>) -> Self {
        match result {
            Ok(value) => MlOutcome::Ready(value),
            Err(e) => {
                log::warn!("{} unavailable: {}", component, e);
                Self::degraded(e.to_string())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, MlOutcome::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            MlOutcome::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            MlOutcome::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Why there is no value (None when ready)
    pub fn reason(&self) -> Option<&str> {
        match self {
            MlOutcome::Ready(_) => None,
            MlOutcome::NotApplicable { reason } | MlOutcome::Degraded { reason } => Some(reason),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MlOutcome::Ready(_) => "ready",
            MlOutcome::NotApplicable { .. } => "not_applicable",
            MlOutcome::Degraded { .. } => "degraded",
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> MlOutcome<U> {
        match self {
            MlOutcome::Ready(value) => MlOutcome::Ready(f(value)),
            MlOutcome::NotApplicable { reason } => MlOutcome::NotApplicable { reason },
            MlOutcome::Degraded { reason } => MlOutcome::Degraded { reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fit_degrades() {
        let outcome: MlOutcome<u32> =
            MlOutcome::from_fit("clustering", Err(EngineError::model_fit("empty vocabulary")));
        assert_eq!(outcome.as_str(), "degraded");
        assert!(outcome.reason().unwrap().contains("empty vocabulary"));
        assert!(outcome.ready().is_none());
    }

    #[test]
    fn test_map_keeps_reason() {
        let outcome: MlOutcome<u32> = MlOutcome::not_applicable("too few rows");
        let mapped = outcome.map(|v| v * 2);
        assert_eq!(mapped.reason(), Some("too few rows"));

        let ready = MlOutcome::Ready(21).map(|v| v * 2);
        assert_eq!(ready.into_ready(), Some(42));
    }

    #[test]
    fn test_serialized_status_tag() {
        let outcome: MlOutcome<Vec<u32>> = MlOutcome::disabled();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "not_applicable");

        let ready: MlOutcome<Vec<u32>> = MlOutcome::Ready(vec![1, 2]);
        let json = serde_json::to_value(&ready).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["value"][1], 2);
    }
}
