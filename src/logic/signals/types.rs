//! Signal Types
//!
//! Report records as handed over by ingestion, and the signal set derived
//! from them. No extraction logic here.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// FIELD VALUE
// ============================================================================

/// A technique / country cell: nothing, one value, or a list.
///
/// Columns of any other shape (numeric severity, flags, objects) land in
/// `Other` and yield no tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Absent,
    Single(String),
    Many(Vec<Option<String>>),
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn single(value: impl Into<String>) -> Self {
        FieldValue::Single(value.into())
    }

    pub fn many<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::Many(values.into_iter().map(|v| Some(v.into())).collect())
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Absent
    }
}

// ============================================================================
// REPORT RECORD
// ============================================================================

/// One intelligence item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub report_date: NaiveDate,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Technique / country columns, keyed by column name
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl ReportRecord {
    pub fn new(report_date: NaiveDate) -> Self {
        Self {
            report_date,
            source: None,
            description: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Field value, `Absent` when the column is missing
    pub fn field(&self, name: &str) -> &FieldValue {
        static ABSENT: FieldValue = FieldValue::Absent;
        self.fields.get(name).unwrap_or(&ABSENT)
    }
}

// ============================================================================
// FIELD MAPPING
// ============================================================================

/// Which columns carry techniques and countries (discovered by ingestion)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub technique_fields: Vec<String>,
    pub country_fields: Vec<String>,
}

impl FieldMapping {
    pub fn new<T, C>(technique_fields: T, country_fields: C) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            technique_fields: technique_fields.into_iter().map(Into::into).collect(),
            country_fields: country_fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.technique_fields.is_empty() && self.country_fields.is_empty()
    }
}

// ============================================================================
// SIGNAL SET
// ============================================================================

/// Signals of one analysis batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalSet {
    /// Technique tokens in record order, duplicates kept
    pub techniques: Vec<String>,
    pub unique_techniques: BTreeSet<String>,
    pub countries: BTreeSet<String>,
    pub source_count: usize,
}

impl SignalSet {
    pub fn total_techniques(&self) -> usize {
        self.techniques.len()
    }

    pub fn unique_count(&self) -> usize {
        self.unique_techniques.len()
    }

    pub fn is_empty(&self) -> bool {
        self.techniques.is_empty() && self.countries.is_empty() && self.source_count == 0
    }
}

/// Country selection resolved against a signal set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryScope {
    pub selected: BTreeSet<String>,
    pub country_count: usize,
    pub regional_focus: bool,
}

/// Per-technique occurrence statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechniqueProfile {
    pub technique: String,
    /// Token count across the batch
    pub frequency: usize,
    /// Countries named in the same records
    pub countries: BTreeSet<String>,
    pub sources: BTreeSet<String>,
    pub report_dates: BTreeSet<NaiveDate>,
    pub last_seen: NaiveDate,
}
