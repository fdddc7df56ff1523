//! Calendar-exception filtering.
//!
//! Workarounds for feed defects are [`CalendarDateRule`]s so that each can be
//! dropped from configuration once the feed revision it targets has expired.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::gtfs::GCalendarDate;

/// A rule that may exclude individual `calendar_dates.txt` records.
pub trait CalendarDateRule: fmt::Debug + Send + Sync {
    /// Returns `true` when the record must be dropped.
    fn excludes(&self, calendar_date: &GCalendarDate) -> bool;
}

/// Drops exceptions of known-duplicate services dated after a cutoff.
///
/// The October 2025 feed repeats the `OCTO25*` services after 2025-11-15,
/// dates already covered by the `OCRE25*` services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateServiceCutoff {
    pub service_ids: Vec<String>,
    pub cutoff: NaiveDate,
}

impl DuplicateServiceCutoff {
    /// The workaround for the October 2025 feed.
    pub fn stl_october_2025() -> Option<Self> {
        let cutoff = NaiveDate::from_ymd_opt(2025, 11, 15)?;
        Some(Self {
            service_ids: ["OCTO25SEM", "OCTO25SAM", "OCTO25DIM"]
                .map(String::from)
                .to_vec(),
            cutoff,
        })
    }
}

impl CalendarDateRule for DuplicateServiceCutoff {
    fn excludes(&self, calendar_date: &GCalendarDate) -> bool {
        let excluded = self.service_ids.contains(&calendar_date.service_id)
            && calendar_date.is_after(self.cutoff);
        if excluded {
            debug!(
                service_id = %calendar_date.service_id,
                date = %calendar_date.date,
                cutoff = %self.cutoff,
                "Duplicate service exception excluded"
            );
        }
        excluded
    }
}

/// Accepts a record unless one of `rules` excludes it.
pub fn accept(rules: &[Box<dyn CalendarDateRule>], calendar_date: &GCalendarDate) -> bool {
    !rules.iter().any(|rule| rule.excludes(calendar_date))
}
