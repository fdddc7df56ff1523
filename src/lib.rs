//! Agency rules that turn raw GTFS records from STL (Laval) into canonical,
//! display-ready records.

pub mod calendar;
pub mod clean;
pub mod config;
pub mod direction;
pub mod error;
pub mod gtfs;
pub mod ids;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod rules;
pub mod stl;

pub use error::RuleError;
pub use pipeline::RecordProcessor;
pub use rules::{AgencyRules, DefaultAgencyRules};
pub use stl::LavalStlBusRules;
