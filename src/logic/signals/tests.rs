use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::*;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn mapping() -> FieldMapping {
    FieldMapping::new(["ttp_1", "ttp_2"], ["country_1"])
}

fn sample_batch() -> Vec<ReportRecord> {
    vec![
        ReportRecord::new(day(1))
            .with_source("CERT-FI")
            .with_field("ttp_1", FieldValue::many(["T1566", "T1204"]))
            .with_field("ttp_2", FieldValue::single("None"))
            .with_field("country_1", FieldValue::single("Finland")),
        ReportRecord::new(day(1))
            .with_source("CERT-EE")
            .with_field("ttp_1", FieldValue::Many(vec![Some("T1566".into()), None, Some("null".into())]))
            .with_field("country_1", FieldValue::many(["Estonia", "Germany"])),
        ReportRecord::new(day(8))
            .with_source("CERT-FI")
            .with_field("ttp_1", FieldValue::Absent)
            .with_field("ttp_2", FieldValue::single(" T1110 "))
            .with_field("country_1", FieldValue::single("")),
    ]
}

#[test]
fn test_field_value_tokens() {
    assert!(FieldValue::Absent.tokens().is_empty());
    assert!(FieldValue::single("None").tokens().is_empty());
    assert!(FieldValue::single("   ").tokens().is_empty());
    assert_eq!(FieldValue::single("T1566").tokens(), vec!["T1566"]);

    let many = FieldValue::Many(vec![Some("T1".into()), None, Some("NaN".into()), Some("T2".into())]);
    assert_eq!(many.tokens(), vec!["T1", "T2"]);
}

#[test]
fn test_extract_preserves_order_and_duplicates() {
    let signals = extract_signals(&sample_batch(), &mapping());

    assert_eq!(signals.techniques, vec!["T1566", "T1204", "T1566", "T1110"]);
    assert_eq!(signals.total_techniques(), 4);
    assert_eq!(signals.unique_count(), 3);
    assert_eq!(signals.countries.len(), 3);
    assert_eq!(signals.source_count, 2);
}

#[test]
fn test_unique_is_subset_of_sequence() {
    let signals = extract_signals(&sample_batch(), &mapping());
    assert!(signals.unique_count() <= signals.total_techniques());
    for t in &signals.unique_techniques {
        assert!(signals.techniques.contains(t));
    }
    assert!(signals.techniques.iter().all(|t| !is_placeholder(t)));
}

#[test]
fn test_no_fields_configured() {
    let signals = extract_signals(&sample_batch(), &FieldMapping::default());
    assert!(signals.techniques.is_empty());
    assert!(signals.countries.is_empty());
    // No mapped fields -> nothing to corroborate either
    assert_eq!(signals.source_count, 0);
    assert!(signals.is_empty());
}

#[test]
fn test_country_names_fold_case() {
    let records = vec![
        ReportRecord::new(day(1))
            .with_field("ttp_1", FieldValue::single("T1566"))
            .with_field("country_1", FieldValue::many(["finland", "Germany"])),
        ReportRecord::new(day(2))
            .with_field("ttp_1", FieldValue::single("T1566"))
            .with_field("country_1", FieldValue::many([" Finland ", "germany", "FINLAND"])),
    ];
    let signals = extract_signals(&records, &mapping());
    assert_eq!(signals.countries.len(), 2);
    assert!(signals.countries.contains("Finland"));

    let default_scope = signals.scope_countries(None);
    assert_eq!(default_scope.country_count, 1);
    assert!(default_scope.regional_focus);

    let explicit: BTreeSet<String> = ["GERMANY".to_string(), "germany".to_string()].into_iter().collect();
    let scope = signals.scope_countries(Some(&explicit));
    assert_eq!(scope.selected.len(), 1);
    assert_eq!(scope.country_count, 1);
    assert!(!scope.regional_focus);

    let profiles = technique_profiles(&records, &mapping());
    assert_eq!(profiles["T1566"].countries.len(), 2);
}

#[test]
fn test_default_country_scope_selects_reference_region() {
    let signals = extract_signals(&sample_batch(), &mapping());
    let scope = signals.scope_countries(None);

    assert!(scope.regional_focus);
    assert_eq!(scope.selected.len(), 2);
    assert_eq!(scope.country_count, 2);
}

#[test]
fn test_explicit_country_scope() {
    let signals = extract_signals(&sample_batch(), &mapping());

    let outside: BTreeSet<String> = ["Germany".to_string()].into_iter().collect();
    let scope = signals.scope_countries(Some(&outside));
    assert!(!scope.regional_focus);
    assert_eq!(scope.country_count, 1);

    let empty = BTreeSet::new();
    let scope = signals.scope_countries(Some(&empty));
    assert!(!scope.regional_focus);
    assert_eq!(scope.country_count, 3);
}

#[test]
fn test_technique_profiles() {
    let profiles = technique_profiles(&sample_batch(), &mapping());

    let phishing = &profiles["T1566"];
    assert_eq!(phishing.frequency, 2);
    assert_eq!(phishing.countries.len(), 3);
    assert_eq!(phishing.sources.len(), 2);
    assert_eq!(phishing.last_seen, day(1));

    let brute = &profiles["T1110"];
    assert_eq!(brute.frequency, 1);
    assert!(brute.countries.is_empty());
    assert_eq!(brute.last_seen, day(8));
}

#[test]
fn test_observations_and_periods() {
    let batch = sample_batch();
    let obs = technique_observations(&batch, &mapping());
    assert_eq!(obs.len(), 4);
    assert_eq!(obs[3], (day(8), "T1110".to_string()));

    assert_eq!(report_periods(&batch), vec![day(8), day(1)]);
    assert_eq!(select_period(&batch, day(1)).len(), 2);
}

#[test]
fn test_record_deserializes_mixed_cells() {
    let json = r#"{
        "report_date": "2024-03-01",
        "source": "CERT-SE",
        "ttp_1": ["T1566", null],
        "ttp_2": "T1059",
        "country_1": null
    }"#;
    let record: ReportRecord = serde_json::from_str(json).unwrap();

    assert_eq!(record.techniques(&mapping()), vec!["T1566", "T1059"]);
    assert!(record.countries(&mapping()).is_empty());
    assert_eq!(record.source_id(), Some("CERT-SE"));
}

#[test]
fn test_record_tolerates_non_text_columns() {
    let json = r#"{
        "report_date": "2024-03-02",
        "severity": 7,
        "verified": true,
        "meta": {"feed": "x"},
        "ttp_1": ["T1566", 12],
        "ttp_2": "T1059",
        "country_1": "Sweden"
    }"#;
    let record: ReportRecord = serde_json::from_str(json).unwrap();

    assert!(matches!(record.field("severity"), FieldValue::Other(_)));
    assert!(matches!(record.field("ttp_1"), FieldValue::Other(_)));
    assert_eq!(record.techniques(&mapping()), vec!["T1059"]);
    assert_eq!(record.countries(&mapping()), vec!["Sweden".to_string()]);
}
