//! The capability set an agency plugs into the conversion pipeline.
//!
//! Every operation has a generic default; an agency overrides only what its
//! feed needs. [`DefaultAgencyRules`] is the generic baseline.

use serde::Serialize;

use crate::clean::Locale;
use crate::clean::utils::clean_label;
use crate::direction::Direction;
use crate::error::RuleError;
use crate::gtfs::{GCalendarDate, GRoute, GStop, GTrip};
use crate::ids::{IdCleanup, canonicalize_route_id, clean_stop_id};
use crate::model::{DirectionType, RouteType};

pub trait AgencyRules: Send + Sync {
    fn agency_name(&self) -> &str;

    fn route_type(&self) -> RouteType;

    /// Languages labels are published in; the first one drives cleanup.
    fn supported_languages(&self) -> Vec<Locale> {
        vec![Locale::default()]
    }

    fn first_language(&self) -> Locale {
        self.supported_languages()
            .first()
            .copied()
            .unwrap_or_default()
    }

    // The four flags below, with `direction_finder_enabled`, are declarations
    // for the downstream schedule converter, published through
    // `AgencyProfile`. `RecordProcessor` does not act on them.

    fn default_route_id_enabled(&self) -> bool {
        false
    }

    fn use_route_short_name_for_route_id(&self) -> bool {
        false
    }

    fn default_route_long_name_enabled(&self) -> bool {
        false
    }

    fn default_agency_color_enabled(&self) -> bool {
        false
    }

    /// Whether two routes may not share a canonical id.
    fn verify_route_ids_uniqueness(&self) -> bool {
        true
    }

    fn route_id_cleanup(&self) -> Option<&IdCleanup> {
        None
    }

    fn stop_id_cleanup(&self) -> Option<&IdCleanup> {
        None
    }

    /// Canonical form of an encoded route id; unchanged unless a cleanup
    /// pattern is set.
    fn clean_route_id(&self, raw: &str) -> Result<String, RuleError> {
        match self.route_id_cleanup() {
            Some(cleanup) => canonicalize_route_id(cleanup, raw),
            None => Ok(raw.to_string()),
        }
    }

    fn route_id(&self, route: &GRoute) -> Result<String, RuleError> {
        self.clean_route_id(&route.route_id)
    }

    /// Stop id with the cleanup pattern applied, kept for traceability.
    fn stop_original_id(&self, stop: &GStop) -> Result<String, RuleError> {
        match self.stop_id_cleanup() {
            Some(cleanup) => clean_stop_id(cleanup, &stop.stop_id),
            None => Ok(stop.stop_id.clone()),
        }
    }

    /// Integer stop id; by default the GTFS `stop_id` itself.
    fn stop_id(&self, stop: &GStop) -> Result<u32, RuleError> {
        stop.stop_id
            .parse::<u32>()
            .map_err(|e| RuleError::format("stop_id", &stop.stop_id, e.to_string()))
    }

    /// Headsign for trips the feed leaves blank.
    fn provide_missing_trip_headsign(&self, trip: &GTrip) -> Result<String, RuleError> {
        Err(RuleError::policy("missing trip headsign", &trip.route_id))
    }

    /// Key used to split a route's trips into directions; `None` when the
    /// feed carries no direction signal the rules know about.
    fn trip_direction(&self, _trip: &GTrip) -> Result<Option<Direction>, RuleError> {
        Ok(None)
    }

    fn direction_splitter_enabled(&self, _route_id: &str) -> bool {
        false
    }

    /// Declaration for the downstream converter; best-effort only.
    fn direction_finder_enabled(&self) -> bool {
        false
    }

    fn direction_types(&self) -> Vec<DirectionType> {
        vec![DirectionType::Headsign]
    }

    /// `true` drops the record.
    fn exclude_calendar_date(&self, _calendar_date: &GCalendarDate) -> bool {
        false
    }

    fn clean_stop_name(&self, name: &str) -> String {
        clean_label(self.first_language(), name)
    }

    fn clean_route_long_name(&self, name: &str) -> String {
        clean_label(self.first_language(), name)
    }

    fn clean_trip_headsign(&self, headsign: &str) -> String {
        clean_label(self.first_language(), headsign)
    }
}

/// Generic rules for an agency that needs no special handling.
#[derive(Debug, Clone)]
pub struct DefaultAgencyRules {
    pub agency_name: String,
    pub route_type: RouteType,
}

impl AgencyRules for DefaultAgencyRules {
    fn agency_name(&self) -> &str {
        &self.agency_name
    }

    fn route_type(&self) -> RouteType {
        self.route_type
    }
}

/// Serializable summary of an agency's declared capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgencyProfile {
    pub agency_name: String,
    pub route_type: u8,
    pub supported_languages: Vec<Locale>,
    pub default_route_id_enabled: bool,
    pub use_route_short_name_for_route_id: bool,
    pub default_route_long_name_enabled: bool,
    pub default_agency_color_enabled: bool,
    pub verify_route_ids_uniqueness: bool,
    pub route_id_cleanup_pattern: Option<String>,
    pub stop_id_cleanup_pattern: Option<String>,
    pub direction_finder_enabled: bool,
    pub direction_types: Vec<DirectionType>,
}

impl AgencyProfile {
    pub fn of(rules: &dyn AgencyRules) -> Self {
        Self {
            agency_name: rules.agency_name().to_string(),
            route_type: rules.route_type().gtfs_code(),
            supported_languages: rules.supported_languages(),
            default_route_id_enabled: rules.default_route_id_enabled(),
            use_route_short_name_for_route_id: rules.use_route_short_name_for_route_id(),
            default_route_long_name_enabled: rules.default_route_long_name_enabled(),
            default_agency_color_enabled: rules.default_agency_color_enabled(),
            verify_route_ids_uniqueness: rules.verify_route_ids_uniqueness(),
            route_id_cleanup_pattern: rules.route_id_cleanup().map(|c| c.as_str().to_string()),
            stop_id_cleanup_pattern: rules.stop_id_cleanup().map(|c| c.as_str().to_string()),
            direction_finder_enabled: rules.direction_finder_enabled(),
            direction_types: rules.direction_types(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> DefaultAgencyRules {
        DefaultAgencyRules {
            agency_name: "Generic".to_string(),
            route_type: RouteType::Bus,
        }
    }

    #[test]
    fn test_default_route_id_is_raw() {
        let route = GRoute {
            route_id: "JANV2412E".to_string(),
            route_short_name: "12".to_string(),
            route_long_name: String::new(),
        };
        assert_eq!(rules().route_id(&route).unwrap(), "JANV2412E");
    }

    #[test]
    fn test_default_stop_id_parses_stop_id() {
        let stop = GStop {
            stop_id: "41007".to_string(),
            stop_code: "CP41007".to_string(),
            stop_name: String::new(),
        };
        assert_eq!(rules().stop_id(&stop).unwrap(), 41007);
        assert_eq!(rules().stop_original_id(&stop).unwrap(), "41007");
    }

    #[test]
    fn test_default_cannot_provide_headsign() {
        let trip = GTrip {
            route_id: "JANV2412E".to_string(),
            trip_headsign: String::new(),
        };
        assert!(matches!(
            rules().provide_missing_trip_headsign(&trip),
            Err(RuleError::PolicyViolation { .. })
        ));
        assert_eq!(rules().trip_direction(&trip).unwrap(), None);
    }

    #[test]
    fn test_default_accepts_all_calendar_dates() {
        let date = GCalendarDate::parse("OCTO25SEM", "20251116").unwrap();
        assert!(!rules().exclude_calendar_date(&date));
    }

    #[test]
    fn test_default_text_cleanup_is_label_only() {
        assert_eq!(rules().clean_stop_name("  face  au parc [12345] "), "Face au Parc [12345]");
    }

    #[test]
    fn test_default_profile() {
        let profile = AgencyProfile::of(&rules());
        assert_eq!(profile.agency_name, "Generic");
        assert_eq!(profile.route_type, 3);
        assert!(profile.verify_route_ids_uniqueness);
        assert_eq!(profile.route_id_cleanup_pattern, None);
        assert_eq!(profile.direction_types, vec![DirectionType::Headsign]);
    }
}
