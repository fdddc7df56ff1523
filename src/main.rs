//! CLI entry point for the STL GTFS rules.
//!
//! Runs single records through the agency rules, for checking how a feed
//! value will come out before a full conversion.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::Path;
use stl_gtfs_rules::config::AgencyConfig;
use stl_gtfs_rules::gtfs::{GCalendarDate, GRoute, GStop, GTrip};
use stl_gtfs_rules::output::{append_record, print_json, print_pretty};
use stl_gtfs_rules::rules::AgencyProfile;
use stl_gtfs_rules::{AgencyRules, LavalStlBusRules, RecordProcessor};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "stl_gtfs_rules")]
#[command(about = "Apply the STL (Laval) GTFS cleanup rules to feed values", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Canonicalize a route and clean its long name
    Route {
        /// Encoded route id (e.g. "JANV2412E")
        route_id: String,

        #[arg(short, long, default_value = "")]
        short_name: String,

        #[arg(short, long, default_value = "")]
        long_name: String,

        /// CSV file to append the cleaned route to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Resolve a stop id from its stop code and clean its name
    Stop {
        /// Encoded stop id (e.g. "JANV24CP12345")
        stop_id: String,

        /// Numeric stop code
        stop_code: String,

        /// Raw stop name
        name: String,

        /// CSV file to append the cleaned stop to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Clean a trip headsign, or derive it from the route id when blank
    Trip {
        /// Encoded id of the trip's route
        route_id: String,

        #[arg(long, default_value = "")]
        headsign: String,

        /// CSV file to append the cleaned trip to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Check whether a calendar exception is kept
    CalendarDate {
        service_id: String,

        /// Date as YYYYMMDD
        date: String,
    },
    /// Run one text pipeline on a string
    Clean {
        #[arg(value_enum)]
        kind: TextKind,

        text: String,
    },
    /// Show the agency's declared capabilities
    Describe,
}

#[derive(Clone, Copy, ValueEnum)]
enum TextKind {
    StopName,
    RouteLongName,
    TripHeadsign,
}

#[derive(Serialize)]
struct CalendarDecision<'a> {
    service_id: &'a str,
    date: String,
    accepted: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/stl_gtfs_rules.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("stl_gtfs_rules.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config = AgencyConfig::from_env()?;
    let processor = RecordProcessor::new(LavalStlBusRules::new(&config)?);

    match cli.command {
        Commands::Route {
            route_id,
            short_name,
            long_name,
            output,
        } => {
            let route = processor.process_route(&GRoute {
                route_id,
                route_short_name: short_name,
                route_long_name: long_name,
            })?;
            emit(&route, output.as_deref())?;
        }
        Commands::Stop {
            stop_id,
            stop_code,
            name,
            output,
        } => {
            let stop = processor.process_stop(&GStop {
                stop_id,
                stop_code,
                stop_name: name,
            })?;
            emit(&stop, output.as_deref())?;
        }
        Commands::Trip {
            route_id,
            headsign,
            output,
        } => {
            let trip = processor.process_trip(&GTrip {
                route_id,
                trip_headsign: headsign,
            })?;
            emit(&trip, output.as_deref())?;
        }
        Commands::CalendarDate { service_id, date } => {
            let calendar_date = GCalendarDate::parse(service_id, &date)?;
            let accepted = processor.accept_calendar_date(&calendar_date);
            info!(service_id = %calendar_date.service_id, date = %calendar_date.date, accepted, "Calendar exception checked");
            print_json(&CalendarDecision {
                service_id: &calendar_date.service_id,
                date,
                accepted,
            })?;
        }
        Commands::Clean { kind, text } => {
            let rules = processor.rules();
            let cleaned = match kind {
                TextKind::StopName => rules.clean_stop_name(&text),
                TextKind::RouteLongName => rules.clean_route_long_name(&text),
                TextKind::TripHeadsign => rules.clean_trip_headsign(&text),
            };
            info!(input = %text, cleaned = %cleaned, "Text cleaned");
        }
        Commands::Describe => {
            print_json(&AgencyProfile::of(processor.rules()))?;
        }
    }

    Ok(())
}

/// Appends to `output` when given, otherwise logs the record as JSON.
fn emit<T: Serialize + std::fmt::Debug>(record: &T, output: Option<&str>) -> Result<()> {
    print_pretty(record);
    match output {
        Some(path) => {
            append_record(path, record)?;
            info!(path, "Record appended");
        }
        None => print_json(record)?,
    }
    Ok(())
}
