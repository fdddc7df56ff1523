//! Output of cleaned records.
//!
//! Supports pretty-printing, JSON logging, and CSV append.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use csv::WriterBuilder;
use std::fmt::Debug;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs a record using Rust's debug pretty-print format.
pub fn print_pretty(record: &impl Debug) {
    debug!("{:#?}", record);
}

/// Logs a record as pretty-printed JSON.
pub fn print_json(record: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

/// Appends a cleaned record as a row to a CSV file.
///
/// The header row comes from the record's field names and is written only
/// while the file holds no rows yet, so a missing or empty file gets one.
pub fn append_record<T: Serialize>(path: &str, record: &T) -> Result<()> {
    let has_rows = has_rows(Path::new(path))?;
    debug!(path, has_rows, record = std::any::type_name::<T>(), "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new().has_headers(!has_rows).from_writer(file);
    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}

fn has_rows(path: &Path) -> Result<bool> {
    match std::fs::metadata(path) {
        Ok(metadata) => Ok(metadata.len() > 0),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
