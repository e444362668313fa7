//! Logic Module - Analytics Engines
//!
//! Pipeline: signals -> {risk, clustering, anomaly, forecast} -> priority
//! -> allocation -> summary.
//!
//! ## Layout
//! - `signals/` - Field normalization, signal sets, technique profiles
//! - `risk/` - ISO / NIST style scoring
//! - `ml/` - Numerical primitives (TF-IDF, k-means, isolation forest, least squares)
//! - `clustering/`, `anomaly/`, `forecast/` - Statistical components
//! - `priority/`, `allocation/`, `summary/` - Synthesis
//! - `engine/` - Orchestration for one analysis request

// Shared
pub mod config;
pub mod outcome;
pub mod geo;
pub mod mitre;

// Signals & scoring
pub mod signals;
pub mod risk;

// Statistical components
pub mod ml;
pub mod clustering;
pub mod anomaly;
pub mod forecast;

// Synthesis
pub mod priority;
pub mod allocation;
pub mod summary;
pub mod intel;
pub mod actors;
pub mod training;

pub mod engine;
