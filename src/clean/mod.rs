//! Display-text normalization for stop names, route long names and trip
//! headsigns.
//!
//! Each pipeline is a fixed sequence of stages; later stages expect the text
//! shape the earlier ones leave behind (street types are expanded only once
//! bracketed codes and slashes are gone), so the order must not change.

pub mod pattern;
pub mod utils;

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use self::pattern::{PatternRule, replace_first_match};
use self::utils::{
    clean_bounds_fr, clean_et, clean_label, clean_saint, clean_slashes, clean_street_types_fr_ca,
    collapse_whitespace, keep_to_fr,
};

/// Language labels are cleaned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fr" | "fr-ca" | "fr_ca" => Ok(Locale::Fr),
            "en" | "en-ca" | "en_ca" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{other}'")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Fr => f.write_str("fr"),
            Locale::En => f.write_str("en"),
        }
    }
}

/// Internal 5-digit stop code the feed embeds in stop names: `"... [12345]"`.
static STOP_CODE_IN_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[0-9]{5}\]").expect("valid regex"));

// "face à" / "face au" before the bare "face": the general rule would
// otherwise leave a dangling article behind. `à` may arrive decomposed.
static LEADING_FACE: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::literal(r"(?i)^face (?:à|a\x{0300}) ", ""),
        PatternRule::literal(r"(?i)^face au ", ""),
        PatternRule::literal(r"(?i)^face ", ""),
    ]
});

static SPACED_FACE: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::literal(r"(?i) face (?:à|a\x{0300}) ", " "),
        PatternRule::literal(r"(?i) face au ", " "),
        PatternRule::literal(r"(?i) face ", " "),
    ]
});

/// Text pipelines for one target locale. Stateless; share freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    locale: Locale,
}

impl TextNormalizer {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Cleans a stop name.
    ///
    /// 1. drop the bracketed 5-digit stop code, then collapse whitespace
    /// 2. normalize slash-separated alternatives
    /// 3. strip a leading "face à " / "face au " / "face "
    /// 4. collapse the same phrases mid-name to a single space
    /// 5. expand street types
    /// 6. label cleanup
    pub fn clean_stop_name(&self, name: &str) -> String {
        let name = STOP_CODE_IN_NAME.replace_all(name, "");
        let name = collapse_whitespace(&name);
        let name = clean_slashes(&name);
        let name = replace_first_match(&name, &LEADING_FACE);
        let name = replace_first_match(&name, &SPACED_FACE);
        let name = clean_street_types_fr_ca(&name);
        clean_label(self.locale, &name)
    }

    /// Cleans a route long name: whitespace, keep-to, saints, bounds, street
    /// types, label.
    pub fn clean_route_long_name(&self, name: &str) -> String {
        let name = collapse_whitespace(name);
        let name = keep_to_fr(&name);
        let name = clean_saint(&name);
        let name = clean_bounds_fr(&name);
        let name = clean_street_types_fr_ca(&name);
        clean_label(self.locale, &name)
    }

    /// Cleans a trip headsign: whitespace, keep-to, street types, `et` → `&`,
    /// label.
    pub fn clean_trip_headsign(&self, headsign: &str) -> String {
        let headsign = collapse_whitespace(headsign);
        let headsign = keep_to_fr(&headsign);
        let headsign = clean_street_types_fr_ca(&headsign);
        let headsign = clean_et(&headsign);
        clean_label(self.locale, &headsign)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn separator() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            4 => Just(" "),
            1 => Just("  "),
            1 => Just("\t"),
            1 => Just("\u{a0}"),
            1 => Just("\n"),
        ]
    }

    fn word() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("face".to_string()),
            Just("à".to_string()),
            Just("au".to_string()),
            Just("et".to_string()),
            Just("vers".to_string()),
            Just("à destination de".to_string()),
            Just("/".to_string()),
            Just("av.".to_string()),
            Just("boul".to_string()),
            Just("St-Martin".to_string()),
            Just("(direction Nord)".to_string()),
            Just("Est".to_string()),
            Just("l'école".to_string()),
            Just("[12345]".to_string()),
            Just("de".to_string()),
            Just("la".to_string()),
            "[a-zé]{1,8}",
            "[A-Z]{1,6}",
            "[0-9]{1,4}",
        ]
    }

    fn words() -> impl Strategy<Value = String> {
        prop::collection::vec((separator(), word()), 1..8).prop_map(|parts| {
            parts
                .into_iter()
                .map(|(sep, word)| format!("{sep}{word}"))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn stop_name_is_idempotent(name in words()) {
            let normalizer = TextNormalizer::new(Locale::Fr);
            let once = normalizer.clean_stop_name(&name);
            prop_assert_eq!(normalizer.clean_stop_name(&once), once);
        }

        #[test]
        fn route_long_name_is_idempotent(name in words()) {
            let normalizer = TextNormalizer::new(Locale::Fr);
            let once = normalizer.clean_route_long_name(&name);
            prop_assert_eq!(normalizer.clean_route_long_name(&once), once);
        }

        #[test]
        fn trip_headsign_is_idempotent(headsign in words()) {
            let normalizer = TextNormalizer::new(Locale::Fr);
            let once = normalizer.clean_trip_headsign(&headsign);
            prop_assert_eq!(normalizer.clean_trip_headsign(&once), once);
        }
    }
}
