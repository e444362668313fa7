//! Signal Extraction
//!
//! One normalization path for every technique / country cell:
//! absent or placeholder -> nothing, scalar -> one token, list -> one token
//! per usable element.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::types::{CountryScope, FieldMapping, FieldValue, ReportRecord, SignalSet, TechniqueProfile};
use crate::logic::geo;

/// Literal markers ingestion uses for "no value"
const PLACEHOLDERS: &[&str] = &["none", "null", "nan", "n/a"];

/// True for empty strings and null markers
pub fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || PLACEHOLDERS.iter().any(|p| trimmed.eq_ignore_ascii_case(p))
}

fn usable(value: &str) -> Option<&str> {
    if is_placeholder(value) {
        None
    } else {
        Some(value.trim())
    }
}

impl FieldValue {
    /// Flat token sequence of this cell
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            FieldValue::Absent | FieldValue::Other(_) => Vec::new(),
            FieldValue::Single(value) => usable(value).into_iter().collect(),
            FieldValue::Many(values) => values
                .iter()
                .filter_map(|v| v.as_deref())
                .filter_map(usable)
                .collect(),
        }
    }
}

impl ReportRecord {
    /// Technique tokens of this record, in field order
    pub fn techniques<'a>(&'a self, mapping: &FieldMapping) -> Vec<&'a str> {
        mapping
            .technique_fields
            .iter()
            .flat_map(|f| self.field(f).tokens())
            .collect()
    }

    /// Canonical country names of this record, in field order
    pub fn countries(&self, mapping: &FieldMapping) -> Vec<String> {
        mapping
            .country_fields
            .iter()
            .flat_map(|f| self.field(f).tokens())
            .map(geo::canonical_country)
            .collect()
    }

    /// Source identifier, if usable
    pub fn source_id(&self) -> Option<&str> {
        self.source.as_deref().and_then(usable)
    }
}

// ============================================================================
// SIGNAL SET
// ============================================================================

/// Build the signal set of a batch
pub fn extract_signals(records: &[ReportRecord], mapping: &FieldMapping) -> SignalSet {
    if mapping.is_empty() {
        log::debug!("No technique/country fields configured - empty signal set");
        return SignalSet::default();
    }

    let mut techniques = Vec::new();
    let mut countries = BTreeSet::new();
    let mut sources = BTreeSet::new();

    for record in records {
        techniques.extend(record.techniques(mapping).into_iter().map(str::to_string));
        for country in record.countries(mapping) {
            geo::insert_country(&mut countries, &country);
        }
        if let Some(source) = record.source_id() {
            sources.insert(source);
        }
    }

    let unique_techniques = techniques.iter().cloned().collect();

    SignalSet {
        techniques,
        unique_techniques,
        countries,
        source_count: sources.len(),
    }
}

impl SignalSet {
    /// Resolve the country filter.
    ///
    /// Without an explicit selection, the reference-region countries present
    /// in the batch are selected.
    pub fn scope_countries(&self, requested: Option<&BTreeSet<String>>) -> CountryScope {
        let selected: BTreeSet<String> = match requested {
            Some(selection) => {
                let mut canonical = BTreeSet::new();
                for country in selection {
                    geo::insert_country(&mut canonical, country);
                }
                canonical
            }
            None => geo::reference_countries_in(&self.countries),
        };

        let selected_keys: BTreeSet<String> = selected.iter().map(|c| geo::country_key(c)).collect();
        let country_count = if selected.is_empty() {
            self.countries.len()
        } else {
            self.countries
                .iter()
                .filter(|c| selected_keys.contains(&geo::country_key(c)))
                .count()
        };

        CountryScope {
            regional_focus: geo::has_regional_focus(&selected),
            selected,
            country_count,
        }
    }
}

// ============================================================================
// TECHNIQUE PROFILES
// ============================================================================

/// Per-technique frequency, co-occurring countries, sources and dates
pub fn technique_profiles(
    records: &[ReportRecord],
    mapping: &FieldMapping,
) -> BTreeMap<String, TechniqueProfile> {
    let mut profiles: BTreeMap<String, TechniqueProfile> = BTreeMap::new();

    for record in records {
        let countries = record.countries(mapping);
        let source = record.source_id();

        for technique in record.techniques(mapping) {
            let profile = profiles
                .entry(technique.to_string())
                .or_insert_with(|| TechniqueProfile {
                    technique: technique.to_string(),
                    frequency: 0,
                    countries: BTreeSet::new(),
                    sources: BTreeSet::new(),
                    report_dates: BTreeSet::new(),
                    last_seen: record.report_date,
                });

            profile.frequency += 1;
            for country in &countries {
                geo::insert_country(&mut profile.countries, country);
            }
            if let Some(source) = source {
                profile.sources.insert(source.to_string());
            }
            profile.report_dates.insert(record.report_date);
            profile.last_seen = profile.last_seen.max(record.report_date);
        }
    }

    profiles
}

/// Melted (date, technique) pairs, one per token
pub fn technique_observations(
    records: &[ReportRecord],
    mapping: &FieldMapping,
) -> Vec<(NaiveDate, String)> {
    records
        .iter()
        .flat_map(|r| {
            r.techniques(mapping)
                .into_iter()
                .map(move |t| (r.report_date, t.to_string()))
        })
        .collect()
}

// ============================================================================
// REPORT PERIODS
// ============================================================================

/// Distinct report dates, newest first
pub fn report_periods(records: &[ReportRecord]) -> Vec<NaiveDate> {
    let dates: BTreeSet<NaiveDate> = records.iter().map(|r| r.report_date).collect();
    dates.into_iter().rev().collect()
}

/// Records of one report period
pub fn select_period(records: &[ReportRecord], period: NaiveDate) -> Vec<ReportRecord> {
    records
        .iter()
        .filter(|r| r.report_date == period)
        .cloned()
        .collect()
}
