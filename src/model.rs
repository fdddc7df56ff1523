//! Cleaned records produced for the downstream schedule model.

use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// GTFS `route_type` values used by the agencies this crate configures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteType {
    LightRail,
    Subway,
    Rail,
    Bus,
}

impl RouteType {
    /// The numeric GTFS code.
    pub fn gtfs_code(self) -> u8 {
        match self {
            RouteType::LightRail => 0,
            RouteType::Subway => 1,
            RouteType::Rail => 2,
            RouteType::Bus => 3,
        }
    }
}

/// Kind of headsign a direction is described with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectionType {
    /// Free-text headsign (destination).
    Headsign,
    /// Cardinal direction label, as used by the agency's real-time API.
    Direction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MRoute {
    /// Canonical id; may be shared by several encoded ids.
    pub id: String,
    pub original_id: String,
    pub short_name: String,
    pub long_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MStop {
    pub id: u32,
    /// Encoded id with its batch tag stripped, kept for traceability.
    pub original_id: String,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MTrip {
    pub route_id: String,
    pub headsign: String,
    /// Direction-splitting key, when the agency splits by direction.
    pub direction: Option<Direction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_type_codes() {
        assert_eq!(RouteType::LightRail.gtfs_code(), 0);
        assert_eq!(RouteType::Bus.gtfs_code(), 3);
    }
}
