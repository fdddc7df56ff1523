//! Agency configuration.
//!
//! Defaults describe STL (Laval). A JSON file with the same fields can
//! override them:
//! ```json
//! {
//!   "locale": "fr",
//!   "route_id_cleanup_pattern": "^[A-Z]+\\d{2}|[NSEO]$",
//!   "stop_id_cleanup_pattern": "^[A-Z]+\\d{2}|[NSEO]$",
//!   "duplicate_services": {
//!     "service_ids": ["OCTO25SEM", "OCTO25SAM", "OCTO25DIM"],
//!     "cutoff": "2025-11-15"
//!   }
//! }
//! ```
//! Removing `duplicate_services` (or setting it to `null`) retires the
//! calendar workaround.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{CalendarDateRule, DuplicateServiceCutoff};
use crate::clean::Locale;
use crate::ids::ENCODED_ID_CLEANUP_PATTERN;

/// Path of a JSON config file to load instead of the defaults.
pub const CONFIG_PATH_ENV: &str = "STL_RULES_CONFIG";
/// Overrides the configured locale.
pub const LOCALE_ENV: &str = "STL_RULES_LOCALE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgencyConfig {
    pub locale: Locale,
    pub route_id_cleanup_pattern: String,
    pub stop_id_cleanup_pattern: String,
    pub duplicate_services: Option<DuplicateServiceCutoff>,
}

impl Default for AgencyConfig {
    fn default() -> Self {
        Self {
            locale: Locale::Fr,
            route_id_cleanup_pattern: ENCODED_ID_CLEANUP_PATTERN.to_string(),
            stop_id_cleanup_pattern: ENCODED_ID_CLEANUP_PATTERN.to_string(),
            duplicate_services: DuplicateServiceCutoff::stl_october_2025(),
        }
    }
}

impl AgencyConfig {
    /// Loads the config from a JSON file at `path`; missing fields keep
    /// their defaults.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{path}'"))?;
        Self::from_json(&content).with_context(|| format!("invalid config '{path}'"))
    }

    /// Calendar-exception rules the configuration enables.
    pub fn calendar_rules(&self) -> Vec<Box<dyn CalendarDateRule>> {
        let mut rules: Vec<Box<dyn CalendarDateRule>> = Vec::new();
        if let Some(duplicate_services) = &self.duplicate_services {
            rules.push(Box::new(duplicate_services.clone()));
        }
        rules
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Defaults, or the file named by `STL_RULES_CONFIG`, with the locale
    /// overridden by `STL_RULES_LOCALE` when set. Reads `.env` first.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(locale) = std::env::var(LOCALE_ENV) {
            config.locale = locale
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .with_context(|| format!("invalid {LOCALE_ENV}"))?;
        }

        debug!(locale = %config.locale, workaround = config.duplicate_services.is_some(), "Agency config loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_calendar_rules_follow_duplicate_services() {
        assert_eq!(AgencyConfig::default().calendar_rules().len(), 1);

        let retired = AgencyConfig {
            duplicate_services: None,
            ..AgencyConfig::default()
        };
        assert!(retired.calendar_rules().is_empty());
    }

    #[test]
    fn test_default_is_stl() {
        let config = AgencyConfig::default();
        assert_eq!(config.locale, Locale::Fr);
        assert_eq!(config.route_id_cleanup_pattern, r"^[A-Z]+\d{2}|[NSEO]$");
        assert_eq!(config.stop_id_cleanup_pattern, config.route_id_cleanup_pattern);
        let workaround = config.duplicate_services.unwrap();
        assert_eq!(workaround.service_ids.len(), 3);
        assert_eq!(workaround.cutoff.to_string(), "2025-11-15");
    }

    #[test]
    fn test_from_json_keeps_missing_defaults() {
        let config = AgencyConfig::from_json(r#"{"locale": "en"}"#).unwrap();
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.route_id_cleanup_pattern, ENCODED_ID_CLEANUP_PATTERN);
        assert!(config.duplicate_services.is_some());
    }

    #[test]
    fn test_from_json_retires_workaround() {
        let config = AgencyConfig::from_json(r#"{"duplicate_services": null}"#).unwrap();
        assert!(config.duplicate_services.is_none());
    }

    #[test]
    fn test_from_json_rejects_unknown_locale() {
        assert!(AgencyConfig::from_json(r#"{"locale": "de"}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_path("stl_gtfs_rules_test_config.json");
        let _ = fs::remove_file(&path);
        fs::write(
            &path,
            r#"{"duplicate_services": {"service_ids": ["X"], "cutoff": "2026-01-31"}}"#,
        )
        .unwrap();

        let config = AgencyConfig::load(&path).unwrap();
        let workaround = config.duplicate_services.unwrap();
        assert_eq!(workaround.service_ids, vec!["X".to_string()]);
        assert_eq!(workaround.cutoff.to_string(), "2026-01-31");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(AgencyConfig::load(&temp_path("stl_gtfs_rules_missing.json")).is_err());
    }
}
