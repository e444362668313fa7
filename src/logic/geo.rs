//! Reference geographic set ("regional focus")
//!
//! One definition shared by risk scoring, country selection and the
//! geographic forecast. Matching is case-insensitive on trimmed names.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;

/// Nordic-Baltic countries
pub const REFERENCE_REGION_NAME: &str = "Nordic-Baltic";

pub static REFERENCE_COUNTRIES: &[&str] = &[
    "Denmark",
    "Estonia",
    "Finland",
    "Iceland",
    "Latvia",
    "Lithuania",
    "Norway",
    "Sweden",
];

static REFERENCE_KEYS: Lazy<BTreeSet<String>> = Lazy::new(|| {
    REFERENCE_COUNTRIES.iter().map(|c| c.to_lowercase()).collect()
});

/// Matching key for a country name: trimmed, lower-cased
pub fn country_key(country: &str) -> String {
    country.trim().to_lowercase()
}

/// Display name: catalog spelling for reference countries, trimmed input otherwise
pub fn canonical_country(country: &str) -> String {
    let key = country_key(country);
    REFERENCE_COUNTRIES
        .iter()
        .find(|c| c.to_lowercase() == key)
        .map(|c| c.to_string())
        .unwrap_or_else(|| country.trim().to_string())
}

/// Insert `country` unless a name with the same key is already present
pub fn insert_country(set: &mut BTreeSet<String>, country: &str) -> bool {
    let key = country_key(country);
    if set.iter().any(|c| country_key(c) == key) {
        return false;
    }
    set.insert(canonical_country(country))
}

/// Is `country` part of the reference region?
pub fn is_reference_country(country: &str) -> bool {
    REFERENCE_KEYS.contains(&country_key(country))
}

/// Reference countries present in `countries`
pub fn reference_countries_in<'a, I>(countries: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    countries
        .into_iter()
        .filter(|c| is_reference_country(c))
        .cloned()
        .collect()
}

/// True if any country in `selection` belongs to the reference region
pub fn has_regional_focus<'a, I>(selection: I) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    selection.into_iter().any(|c| is_reference_country(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_membership() {
        assert!(is_reference_country("Finland"));
        assert!(is_reference_country("  estonia "));
        assert!(!is_reference_country("Germany"));
        assert!(!is_reference_country(""));
    }

    #[test]
    fn test_canonical_names() {
        assert_eq!(canonical_country(" finland "), "Finland");
        assert_eq!(canonical_country("FINLAND"), "Finland");
        assert_eq!(canonical_country(" Germany"), "Germany");

        let mut set = BTreeSet::new();
        assert!(insert_country(&mut set, "finland"));
        assert!(!insert_country(&mut set, "Finland "));
        assert!(insert_country(&mut set, "germany"));
        assert!(!insert_country(&mut set, "GERMANY"));
        assert_eq!(set.len(), 2);
        assert!(set.contains("Finland"));
    }

    #[test]
    fn test_regional_focus() {
        let mixed = vec!["Germany".to_string(), "Latvia".to_string()];
        assert!(has_regional_focus(&mixed));

        let outside = vec!["France".to_string()];
        assert!(!has_regional_focus(&outside));
        assert!(!has_regional_focus(&Vec::<String>::new()));
    }

    #[test]
    fn test_reference_countries_in() {
        let all = vec!["Sweden".to_string(), "Spain".to_string(), "Norway".to_string()];
        let found = reference_countries_in(&all);
        assert_eq!(found.len(), 2);
        assert!(found.contains("Sweden"));
        assert!(found.contains("Norway"));
    }
}
