//! Rules for STL, Société de transport de Laval (bus).
//!
//! Open data: <https://stlaval.ca/a-propos/diffusion/donnees-ouvertes>
//!
//! The feed encodes a batch tag in route and stop ids, publishes one route
//! per direction instead of a `direction_id`, and embeds internal stop codes
//! in stop names.

use crate::calendar::{self, CalendarDateRule};
use crate::clean::{Locale, TextNormalizer};
use crate::config::AgencyConfig;
use crate::direction::{Direction, infer_direction};
use crate::error::RuleError;
use crate::gtfs::{GCalendarDate, GStop, GTrip};
use crate::ids::{IdCleanup, canonicalize_stop_id};
use crate::model::{DirectionType, RouteType};
use crate::rules::AgencyRules;

#[derive(Debug)]
pub struct LavalStlBusRules {
    text: TextNormalizer,
    route_id_cleanup: IdCleanup,
    stop_id_cleanup: IdCleanup,
    calendar_rules: Vec<Box<dyn CalendarDateRule>>,
}

impl LavalStlBusRules {
    /// Builds the rules from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] if a cleanup pattern does not compile.
    pub fn new(config: &AgencyConfig) -> Result<Self, RuleError> {
        Ok(Self {
            text: TextNormalizer::new(config.locale),
            route_id_cleanup: IdCleanup::new("route_id_cleanup", &config.route_id_cleanup_pattern)?,
            stop_id_cleanup: IdCleanup::new("stop_id_cleanup", &config.stop_id_cleanup_pattern)?,
            calendar_rules: config.calendar_rules(),
        })
    }
}

impl AgencyRules for LavalStlBusRules {
    fn agency_name(&self) -> &str {
        "STL"
    }

    fn route_type(&self) -> RouteType {
        RouteType::Bus
    }

    fn supported_languages(&self) -> Vec<Locale> {
        vec![self.text.locale()]
    }

    fn default_route_id_enabled(&self) -> bool {
        true
    }

    fn use_route_short_name_for_route_id(&self) -> bool {
        true
    }

    fn default_route_long_name_enabled(&self) -> bool {
        true
    }

    fn default_agency_color_enabled(&self) -> bool {
        true
    }

    // One encoded id per batch for the same logical route: merge them.
    fn verify_route_ids_uniqueness(&self) -> bool {
        false
    }

    fn route_id_cleanup(&self) -> Option<&IdCleanup> {
        Some(&self.route_id_cleanup)
    }

    fn stop_id_cleanup(&self) -> Option<&IdCleanup> {
        Some(&self.stop_id_cleanup)
    }

    fn stop_id(&self, stop: &GStop) -> Result<u32, RuleError> {
        canonicalize_stop_id(stop)
    }

    fn provide_missing_trip_headsign(&self, trip: &GTrip) -> Result<String, RuleError> {
        Ok(infer_direction(&trip.route_id)?.label().to_string())
    }

    fn trip_direction(&self, trip: &GTrip) -> Result<Option<Direction>, RuleError> {
        infer_direction(&trip.route_id).map(Some)
    }

    // No direction_id in the feed.
    fn direction_splitter_enabled(&self, _route_id: &str) -> bool {
        true
    }

    // Two routes per logical route defeat the finder; keep it as a hint.
    fn direction_finder_enabled(&self) -> bool {
        true
    }

    fn direction_types(&self) -> Vec<DirectionType> {
        vec![DirectionType::Direction]
    }

    fn exclude_calendar_date(&self, calendar_date: &GCalendarDate) -> bool {
        !calendar::accept(&self.calendar_rules, calendar_date)
    }

    fn clean_stop_name(&self, name: &str) -> String {
        self.text.clean_stop_name(name)
    }

    fn clean_route_long_name(&self, name: &str) -> String {
        self.text.clean_route_long_name(name)
    }

    fn clean_trip_headsign(&self, headsign: &str) -> String {
        self.text.clean_trip_headsign(headsign)
    }
}
