//! Intelligence Extraction
//!
//! Pulls ATT&CK technique ids and tactic keywords out of free-text report
//! descriptions, and lists the ids the text names that the structured
//! technique fields missed.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::logic::mitre::{self, MitreTactic};
use crate::logic::signals::{FieldMapping, ReportRecord};

static TECHNIQUE_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bT\d{4}(?:\.\d{3})?\b").expect("technique id pattern is valid"));

/// Lower-case phrases that indicate a tactic
const TACTIC_KEYWORDS: &[(MitreTactic, &[&str])] = &[
    (MitreTactic::Reconnaissance, &["reconnaissance", "scanning", "osint"]),
    (MitreTactic::InitialAccess, &["phishing", "spearphishing", "exploit", "drive-by", "vpn"]),
    (MitreTactic::Execution, &["powershell", "macro", "script", "command line"]),
    (MitreTactic::Persistence, &["scheduled task", "autostart", "backdoor", "web shell"]),
    (MitreTactic::PrivilegeEscalation, &["privilege escalation", "elevation"]),
    (MitreTactic::DefenseEvasion, &["obfuscat", "evasion", "masquerad", "disable security"]),
    (MitreTactic::CredentialAccess, &["credential", "password", "brute force", "mfa fatigue"]),
    (MitreTactic::LateralMovement, &["lateral movement", "rdp", "smb"]),
    (MitreTactic::CommandAndControl, &["command and control", "c2", "beacon"]),
    (MitreTactic::Exfiltration, &["exfiltrat", "data theft", "data leak"]),
    (MitreTactic::Impact, &["ransomware", "encrypt", "wiper", "ddos", "denial of service"]),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechniqueMention {
    pub technique_id: String,
    pub name: Option<String>,
    /// Occurrences across all descriptions
    pub mentions: usize,
    /// Also present in a structured technique field
    pub in_structured_fields: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntelExtraction {
    pub records_with_text: usize,
    /// Most mentioned first
    pub technique_mentions: Vec<TechniqueMention>,
    pub tactic_keyword_hits: BTreeMap<MitreTactic, usize>,
    /// Ids named in text but absent from structured fields
    pub unlisted_techniques: Vec<String>,
}

impl IntelExtraction {
    /// Tactic with the most keyword hits
    pub fn dominant_tactic(&self) -> Option<MitreTactic> {
        self.tactic_keyword_hits
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(t, _)| *t)
    }
}

/// Technique ids in `text`, upper-cased, in order of appearance
pub fn technique_ids_in(text: &str) -> Vec<String> {
    TECHNIQUE_ID_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_uppercase())
        .collect()
}

pub fn extract_intel(records: &[ReportRecord], mapping: &FieldMapping) -> IntelExtraction {
    let structured: BTreeSet<String> = records
        .iter()
        .flat_map(|r| r.techniques(mapping))
        .filter_map(mitre::technique_id)
        .collect();

    let mut mentions: BTreeMap<String, usize> = BTreeMap::new();
    let mut tactic_keyword_hits: BTreeMap<MitreTactic, usize> = BTreeMap::new();
    let mut records_with_text = 0;

    for text in records.iter().filter_map(|r| r.description.as_deref()) {
        if text.trim().is_empty() {
            continue;
        }
        records_with_text += 1;

        for id in technique_ids_in(text) {
            *mentions.entry(id).or_insert(0) += 1;
        }

        let lowered = text.to_lowercase();
        for (tactic, keywords) in TACTIC_KEYWORDS {
            let hits: usize = keywords.iter().map(|k| lowered.matches(k).count()).sum();
            if hits > 0 {
                *tactic_keyword_hits.entry(*tactic).or_insert(0) += hits;
            }
        }
    }

    let mut technique_mentions: Vec<TechniqueMention> = mentions
        .into_iter()
        .map(|(id, count)| TechniqueMention {
            name: mitre::lookup(&id).map(|t| t.name.to_string()),
            in_structured_fields: structured.contains(&id),
            technique_id: id,
            mentions: count,
        })
        .collect();
    technique_mentions.sort_by(|a, b| b.mentions.cmp(&a.mentions).then_with(|| a.technique_id.cmp(&b.technique_id)));

    let unlisted_techniques: Vec<String> = technique_mentions
        .iter()
        .filter(|m| !m.in_structured_fields)
        .map(|m| m.technique_id.clone())
        .collect();

    if !unlisted_techniques.is_empty() {
        log::debug!(
            "{} technique id(s) found only in descriptions: {}",
            unlisted_techniques.len(),
            unlisted_techniques.join(", ")
        );
    }

    IntelExtraction {
        records_with_text,
        technique_mentions,
        tactic_keyword_hits,
        unlisted_techniques,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::signals::FieldValue;
    use chrono::NaiveDate;

    fn record(ttp: &str, text: &str) -> ReportRecord {
        ReportRecord::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
            .with_field("ttp", FieldValue::single(ttp))
            .with_description(text)
    }

    #[test]
    fn test_ids_in_text() {
        assert_eq!(
            technique_ids_in("Actors used t1566.001 then T1059; not T12345 or XT1000"),
            vec!["T1566.001", "T1059"]
        );
    }

    #[test]
    fn test_unlisted_and_keywords() {
        let records = vec![
            record("T1566", "Spearphishing (T1566) led to ransomware, see T1486."),
            record("T1566", "Phishing wave; T1486 encryption of file shares"),
            record("none", ""),
        ];
        let mapping = FieldMapping::new(["ttp"], Vec::<String>::new());
        let intel = extract_intel(&records, &mapping);

        assert_eq!(intel.records_with_text, 2);
        assert_eq!(intel.technique_mentions[0].technique_id, "T1486");
        assert_eq!(intel.technique_mentions[0].mentions, 2);
        assert_eq!(intel.unlisted_techniques, vec!["T1486"]);
        assert!(intel.tactic_keyword_hits[&MitreTactic::InitialAccess] >= 2);
        assert!(intel.tactic_keyword_hits.contains_key(&MitreTactic::Impact));
    }

    #[test]
    fn test_no_descriptions() {
        let records = vec![ReportRecord::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())];
        let intel = extract_intel(&records, &FieldMapping::default());
        assert_eq!(intel, IntelExtraction::default());
        assert_eq!(intel.dominant_tactic(), None);
    }
}
