//! Canonical identifiers for routes and stops.
//!
//! Encoded ids look like `MMMMyy<payload>[NSEO]`, e.g. `JANV2412E` (route 12,
//! eastbound) or `JANV24CP12345` (stop code `CP12345`). The `MMMMyy` batch tag
//! changes with every feed period, so it has to go before ids can be merged.

use regex::Regex;
use tracing::debug;

use crate::error::RuleError;
use crate::gtfs::GStop;

/// Strips the leading batch tag and the trailing direction suffix.
pub const ENCODED_ID_CLEANUP_PATTERN: &str = r"^[A-Z]+\d{2}|[NSEO]$";

/// A compiled id cleanup pattern; every match is removed.
#[derive(Debug, Clone)]
pub struct IdCleanup {
    regex: Regex,
}

impl IdCleanup {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] if the pattern does not compile.
    pub fn new(name: &'static str, pattern: &str) -> Result<Self, RuleError> {
        let regex = Regex::new(pattern).map_err(|e| RuleError::InvalidPattern {
            name,
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Removes every match of the pattern from `raw`.
    pub fn clean(&self, raw: &str) -> String {
        self.regex.replace_all(raw, "").into_owned()
    }
}

/// Recovers the canonical route id from an encoded route id.
///
/// `JANV2412E` and `AOUT2412E` both become `12`: the merge is intended.
///
/// # Errors
///
/// Returns [`RuleError::Format`] if the id is empty or nothing is left once
/// the batch tag and suffix are removed.
pub fn canonicalize_route_id(cleanup: &IdCleanup, raw: &str) -> Result<String, RuleError> {
    canonicalize("route_id", cleanup, raw)
}

/// Strips the batch tag from an encoded stop id (`JANV24CP12345` → `CP12345`).
///
/// The result is informational only; see [`canonicalize_stop_id`].
///
/// # Errors
///
/// Returns [`RuleError::Format`] if the id is empty or nothing is left.
pub fn clean_stop_id(cleanup: &IdCleanup, raw: &str) -> Result<String, RuleError> {
    canonicalize("stop_id", cleanup, raw)
}

/// The stop's true id is its numeric stop code; the encoded id is ignored.
///
/// # Errors
///
/// Returns [`RuleError::Format`] if the stop code is not an unsigned integer.
pub fn canonicalize_stop_id(stop: &GStop) -> Result<u32, RuleError> {
    stop.stop_code
        .parse::<u32>()
        .map_err(|e| RuleError::format("stop_code", &stop.stop_code, e.to_string()))
}

fn canonicalize(field: &'static str, cleanup: &IdCleanup, raw: &str) -> Result<String, RuleError> {
    if raw.is_empty() {
        return Err(RuleError::format(field, raw, "empty identifier"));
    }
    let cleaned = cleanup.clean(raw);
    if cleaned.is_empty() {
        return Err(RuleError::format(field, raw, "no payload after cleanup"));
    }
    debug!(field, raw, cleaned = %cleaned, "Identifier canonicalized");
    Ok(cleaned)
}
