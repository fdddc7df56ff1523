//! Direction inference from encoded route ids.
//!
//! The feed publishes one route per direction (`JANV2412E`, `JANV2412O`)
//! instead of a `direction_id` column, so the route id's last character is
//! the only direction signal available.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Cardinal travel direction, labelled the way the feed labels it (French).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "E")]
    East,
    /// "Ouest": the feed never uses `W`.
    #[serde(rename = "O")]
    West,
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
}

impl Direction {
    pub fn from_suffix(suffix: char) -> Option<Self> {
        match suffix {
            'E' => Some(Direction::East),
            'O' => Some(Direction::West),
            'N' => Some(Direction::North),
            'S' => Some(Direction::South),
            _ => None,
        }
    }

    /// Single-letter label, used as the placeholder headsign.
    pub fn label(self) -> &'static str {
        match self {
            Direction::East => "E",
            Direction::West => "O",
            Direction::North => "N",
            Direction::South => "S",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Infers the direction from the last character of an encoded route id.
///
/// # Errors
///
/// Returns [`RuleError::PolicyViolation`] for an empty id or a trailing
/// character other than `E`, `O`, `N` or `S`.
pub fn infer_direction(route_id: &str) -> Result<Direction, RuleError> {
    route_id
        .chars()
        .next_back()
        .and_then(Direction::from_suffix)
        .ok_or_else(|| RuleError::policy("direction", route_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_direction_from_suffix() {
        assert_eq!(infer_direction("JANV2412E").unwrap(), Direction::East);
        assert_eq!(infer_direction("JANV2412O").unwrap(), Direction::West);
        assert_eq!(infer_direction("JANV24144N").unwrap(), Direction::North);
        assert_eq!(infer_direction("JANV24144S").unwrap(), Direction::South);
    }

    #[test]
    fn test_infer_direction_rejects_unknown_suffix() {
        assert!(matches!(
            infer_direction("JANV2412W"),
            Err(RuleError::PolicyViolation { .. })
        ));
        assert!(infer_direction("JANV2412").is_err());
        assert!(infer_direction("JANV2412e").is_err());
    }

    #[test]
    fn test_infer_direction_rejects_empty() {
        assert!(matches!(
            infer_direction(""),
            Err(RuleError::PolicyViolation { .. })
        ));
    }

    #[test]
    fn test_label_round_trips_through_suffix() {
        for direction in [
            Direction::East,
            Direction::West,
            Direction::North,
            Direction::South,
        ] {
            let suffix = direction.label().chars().next().unwrap();
            assert_eq!(Direction::from_suffix(suffix), Some(direction));
        }
    }
}
