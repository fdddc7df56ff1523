//! Error types raised while applying agency rules to feed records.
//!
//! Every variant is fatal for the record's ingestion batch: a wrong identifier
//! silently carried downstream corrupts route and stop merges.

/// Failures raised by the rule components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// A field does not have the encoded shape the feed is expected to use.
    #[error("malformed {field} '{value}': {reason}")]
    Format {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// No rule applies to the value (e.g. an unknown direction suffix).
    #[error("no {rule} rule applies to '{value}'")]
    PolicyViolation { rule: &'static str, value: String },

    /// A configured cleanup pattern does not compile.
    #[error("invalid {name} pattern '{pattern}': {reason}")]
    InvalidPattern {
        name: &'static str,
        pattern: String,
        reason: String,
    },

    /// Two routes share a canonical id while uniqueness verification is on.
    #[error("duplicate route id '{0}'")]
    DuplicateRouteId(String),
}

impl RuleError {
    pub(crate) fn format(field: &'static str, value: &str, reason: impl Into<String>) -> Self {
        RuleError::Format {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn policy(rule: &'static str, value: &str) -> Self {
        RuleError::PolicyViolation {
            rule,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RuleError::format("stop_code", "CP12", "not an integer");
        assert_eq!(err.to_string(), "malformed stop_code 'CP12': not an integer");

        let err = RuleError::policy("direction", "JANV2412X");
        assert_eq!(err.to_string(), "no direction rule applies to 'JANV2412X'");

        let err = RuleError::DuplicateRouteId("12".to_string());
        assert_eq!(err.to_string(), "duplicate route id '12'");
    }
}
