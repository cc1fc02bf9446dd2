//! JSON summary output writer.
//!
//! Describes a parsed table (shape, array widths, time span) without its rows.

use super::validate_output_path;
use crate::parser::ArrayWidths;
use crate::table::Table;
use crate::utils::config::SUMMARY_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Top-level summary structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    /// Schema version for compatibility checking
    pub version: String,

    /// Text dump the table was parsed from
    pub source: String,

    /// Marker that selected the lines
    pub marker: String,

    pub rows: usize,

    /// Header, `Time` first
    pub columns: Vec<String>,

    /// Dataset-wide width of every array field
    pub array_widths: BTreeMap<String, usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_time: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_time: Option<f64>,

    /// Timestamp when summary was generated
    pub generated_at: String,
}

impl TableSummary {
    pub fn new(
        source: impl AsRef<Path>,
        marker: &str,
        table: &Table,
        widths: &ArrayWidths,
    ) -> Self {
        use chrono::Utc;

        Self {
            version: SUMMARY_VERSION.to_string(),
            source: source.as_ref().display().to_string(),
            marker: marker.to_string(),
            rows: table.len(),
            columns: table.header(),
            array_widths: widths.to_map(),
            first_time: table.first_time(),
            last_time: table.last_time(),
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Write a summary to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `summary` - Summary built by `TableSummary::new`
/// * `output_path` - Destination file, parent directories are created
///
/// # Returns
/// `Ok(())` once the pretty-printed JSON is written
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let summary = TableSummary::new(events.source_path(), events.marker(), events.table(), events.widths());
/// write_summary(&summary, "out/summary.json")?;
/// ```
pub fn write_summary(
    summary: &TableSummary,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing summary to: {}", output_path.display());

    validate_output_path(output_path)?;
    super::create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, summary).map_err(OutputError::SerializationFailed)?;

    Ok(())
}

/// Read a summary from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_summary(input_path: impl AsRef<Path>) -> Result<TableSummary, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading summary from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let summary: TableSummary =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!("Summary loaded: version {}, marker {}", summary.version, summary.marker);

    Ok(summary)
}
