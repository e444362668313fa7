//! Risk Scoring
//!
//! Two independent, total formulas. ISO weighs volume and corroboration
//! (sources), NIST weighs technique diversity, so repeated sightings of
//! one technique raise ISO far more than NIST.

use super::rules::*;
use super::types::{RiskAssessment, RiskFramework, RiskInputs, RiskScore};

/// Saturating growth: 0 at x = 0, strictly increasing, tends to 1
fn saturate(x: usize, scale: f64) -> f64 {
    1.0 - (-(x as f64) / scale).exp()
}

fn finish(raw: f64, regional_focus: bool, boost: f64) -> f64 {
    let boosted = if regional_focus { raw * boost } else { raw };
    boosted.clamp(0.0, SCORE_MAX)
}

/// ISO 27005 style score
pub fn calculate_iso_risk_score(inputs: &RiskInputs) -> RiskScore {
    let volume = ISO_VOLUME_WEIGHT * saturate(inputs.total_techniques, ISO_VOLUME_SCALE);
    let exposure = ISO_COUNTRY_WEIGHT * saturate(inputs.country_count, ISO_COUNTRY_SCALE);
    let corroboration = ISO_SOURCE_WEIGHT * saturate(inputs.source_count, ISO_SOURCE_SCALE);

    let score = finish(
        SCORE_FLOOR + volume + exposure + corroboration,
        inputs.regional_focus,
        ISO_REGIONAL_BOOST,
    );
    RiskScore::new(RiskFramework::Iso27005, score)
}

/// NIST SP 800-30 style score
pub fn calculate_nist_risk_score(inputs: &RiskInputs) -> RiskScore {
    let volume = NIST_VOLUME_WEIGHT * saturate(inputs.total_techniques, NIST_VOLUME_SCALE);
    let exposure = NIST_COUNTRY_WEIGHT * saturate(inputs.country_count, NIST_COUNTRY_SCALE);
    let diversity = NIST_DIVERSITY_WEIGHT * saturate(inputs.unique_techniques, NIST_DIVERSITY_SCALE);

    let score = finish(
        SCORE_FLOOR + volume + exposure + diversity,
        inputs.regional_focus,
        NIST_REGIONAL_BOOST,
    );
    RiskScore::new(RiskFramework::NistSp80030, score)
}

/// Score a batch under both frameworks
pub fn assess(inputs: &RiskInputs) -> RiskAssessment {
    let iso = calculate_iso_risk_score(inputs);
    let nist = calculate_nist_risk_score(inputs);
    log::debug!(
        "Risk scores: ISO {:.1} ({}), NIST {:.1} ({})",
        iso.score,
        iso.level,
        nist.score,
        nist.level
    );
    RiskAssessment { iso, nist, inputs: *inputs }
}
