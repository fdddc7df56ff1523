//! Applies an agency's rules to raw records, one record at a time.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::error::RuleError;
use crate::gtfs::{GCalendarDate, GRoute, GStop, GTrip};
use crate::model::{MRoute, MStop, MTrip};
use crate::rules::AgencyRules;

/// Stateless: a processor may be shared across workers handling disjoint records.
pub struct RecordProcessor<R> {
    rules: R,
}

impl<R: AgencyRules> RecordProcessor<R> {
    pub fn new(rules: R) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[instrument(skip(self, route), fields(route_id = %route.route_id))]
    pub fn process_route(&self, route: &GRoute) -> Result<MRoute, RuleError> {
        let id = self.rules.route_id(route)?;
        let long_name = self.rules.clean_route_long_name(&route.route_long_name);
        debug!(id = %id, long_name = %long_name, "Route cleaned");
        Ok(MRoute {
            id,
            original_id: route.route_id.clone(),
            short_name: route.route_short_name.trim().to_string(),
            long_name,
        })
    }

    #[instrument(skip(self, stop), fields(stop_id = %stop.stop_id))]
    pub fn process_stop(&self, stop: &GStop) -> Result<MStop, RuleError> {
        let id = self.rules.stop_id(stop)?;
        let original_id = self.rules.stop_original_id(stop)?;
        let name = self.rules.clean_stop_name(&stop.stop_name);
        debug!(id, name = %name, "Stop cleaned");
        Ok(MStop {
            id,
            original_id,
            code: stop.stop_code.clone(),
            name,
        })
    }

    /// Cleans the headsign, or derives one when the feed leaves it blank,
    /// and attaches the direction-splitting key.
    #[instrument(skip(self, trip), fields(route_id = %trip.route_id))]
    pub fn process_trip(&self, trip: &GTrip) -> Result<MTrip, RuleError> {
        let route_id = self.rules.clean_route_id(&trip.route_id)?;

        let headsign = if trip.trip_headsign.trim().is_empty() {
            let provided = self.rules.provide_missing_trip_headsign(trip)?;
            debug!(headsign = %provided, "Missing headsign provided");
            provided
        } else {
            self.rules.clean_trip_headsign(&trip.trip_headsign)
        };

        let direction = if self.rules.direction_splitter_enabled(&route_id) {
            self.rules.trip_direction(trip)?
        } else {
            None
        };

        Ok(MTrip {
            route_id,
            headsign,
            direction,
        })
    }

    pub fn accept_calendar_date(&self, calendar_date: &GCalendarDate) -> bool {
        !self.rules.exclude_calendar_date(calendar_date)
    }

    /// Collapses routes sharing a canonical id, keeping the first one seen.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::DuplicateRouteId`] on the first duplicate when the
    /// agency verifies route id uniqueness.
    pub fn merge_routes(&self, routes: Vec<MRoute>) -> Result<Vec<MRoute>, RuleError> {
        let verify = self.rules.verify_route_ids_uniqueness();
        let mut seen = HashSet::new();
        let mut merged = Vec::with_capacity(routes.len());

        for route in routes {
            if seen.insert(route.id.clone()) {
                merged.push(route);
            } else if verify {
                return Err(RuleError::DuplicateRouteId(route.id));
            } else {
                debug!(id = %route.id, original_id = %route.original_id, "Route merged");
            }
        }

        Ok(merged)
    }
}
