//! Raw GTFS records as handed over by the feed parser.
//!
//! Only the fields the agency rules read or rewrite are modelled here.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RuleError;

/// GTFS calendar date format (`YYYYMMDD`).
pub const GTFS_DATE_FORMAT: &str = "%Y%m%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GRoute {
    pub route_id: String,
    #[serde(default)]
    pub route_short_name: String,
    #[serde(default)]
    pub route_long_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GStop {
    pub stop_id: String,
    #[serde(default)]
    pub stop_code: String,
    pub stop_name: String,
}

/// A trip, identified through the encoded id of the route it runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GTrip {
    pub route_id: String,
    #[serde(default)]
    pub trip_headsign: String,
}

/// A `calendar_dates.txt` service exception.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GCalendarDate {
    pub service_id: String,
    #[serde(
        serialize_with = "serialize_gtfs_date",
        deserialize_with = "deserialize_gtfs_date"
    )]
    pub date: NaiveDate,
}

impl GCalendarDate {
    pub fn new(service_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            service_id: service_id.into(),
            date,
        }
    }

    /// Builds a calendar date from a `YYYYMMDD` string.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::Format`] if `date` is not a valid GTFS date.
    pub fn parse(service_id: impl Into<String>, date: &str) -> Result<Self, RuleError> {
        Ok(Self::new(service_id, parse_gtfs_date(date)?))
    }

    /// Strictly after `cutoff`; the cutoff day itself is not "after".
    pub fn is_after(&self, cutoff: NaiveDate) -> bool {
        self.date > cutoff
    }
}

/// Parses a GTFS `YYYYMMDD` date.
///
/// # Errors
///
/// Returns [`RuleError::Format`] when the value is not an eight-digit calendar date.
pub fn parse_gtfs_date(value: &str) -> Result<NaiveDate, RuleError> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RuleError::format("date", value, "expected YYYYMMDD"));
    }
    NaiveDate::parse_from_str(value, GTFS_DATE_FORMAT)
        .map_err(|e| RuleError::format("date", value, e.to_string()))
}

fn serialize_gtfs_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(GTFS_DATE_FORMAT))
}

fn deserialize_gtfs_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_gtfs_date(&raw).map_err(serde::de::Error::custom)
}
