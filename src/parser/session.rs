//! One parse pass over a trace text for a single event marker.
//!
//! A pass always runs the same stages from scratch:
//! `NotStarted -> WidthsComputed -> Normalized -> Materialized`.
//! The widths computed by the first stage are handed to the second as an
//! immutable value.

use super::explode::{explode_payload, FlatRecord};
use super::extract::{split_line, Extractor};
use super::filter::{select_lines, SelectedLine};
use super::prescan::{prescan_array_widths, ArrayWidths};
use super::schema::Schema;
use crate::table::Table;
use crate::utils::error::ParseError;
use log::{debug, info};
use std::path::Path;

/// Progress of a parse pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassStage {
    NotStarted,
    WidthsComputed,
    Normalized,
    Materialized,
}

/// Knobs for a parse pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail on lines whose columns differ from the first line's
    pub strict_schema: bool,
}

/// State of one pass; owns everything it derives
#[derive(Debug)]
pub struct ParseSession<'a> {
    marker: &'a str,
    options: ParseOptions,
    lines: Vec<SelectedLine<'a>>,
    stage: PassStage,
    widths: ArrayWidths,
    extractor: Extractor,
}

impl<'a> ParseSession<'a> {
    /// Select the lines of `text` carrying `marker`
    pub fn new(text: &'a str, marker: &'a str, options: ParseOptions) -> Self {
        let lines = select_lines(text, marker);
        debug!("Selected {} lines for marker '{}'", lines.len(), marker);

        Self {
            marker,
            options,
            lines,
            stage: PassStage::NotStarted,
            widths: ArrayWidths::default(),
            extractor: Extractor::new(options.strict_schema),
        }
    }

    pub fn stage(&self) -> PassStage {
        self.stage
    }

    pub fn marker(&self) -> &str {
        self.marker
    }

    pub fn selected_lines(&self) -> &[SelectedLine<'a>] {
        &self.lines
    }

    /// Widths from the prescan stage (empty before it ran)
    pub fn widths(&self) -> &ArrayWidths {
        &self.widths
    }

    /// Schema inferred during normalization, if any line matched
    pub fn schema(&self) -> Option<&Schema> {
        self.extractor.schema()
    }

    /// Stage 1: prescan every selected line for array widths
    pub fn compute_widths(&mut self) -> Result<&ArrayWidths, ParseError> {
        self.expect_stage(PassStage::NotStarted)?;

        self.widths = prescan_array_widths(&self.lines);
        self.stage = PassStage::WidthsComputed;

        Ok(&self.widths)
    }

    /// Stage 2: explode and extract every selected line
    pub fn normalize(&mut self) -> Result<(), ParseError> {
        self.expect_stage(PassStage::WidthsComputed)?;

        let mut extractor = Extractor::new(self.options.strict_schema);
        for line in &self.lines {
            let split = split_line(line)?;
            let record: FlatRecord = explode_payload(split.payload, &self.widths);
            extractor.push(split.number, split.timestamp, &record)?;
        }

        debug!("Normalized {} rows", extractor.rows());
        self.extractor = extractor;
        self.stage = PassStage::Normalized;

        Ok(())
    }

    /// Stage 3: build the table from the extracted text
    pub fn materialize(&mut self) -> Result<Table, ParseError> {
        self.expect_stage(PassStage::Normalized)?;

        let extractor = std::mem::take(&mut self.extractor);
        let text = extractor.into_text();

        let table = if text.is_empty() {
            Table::empty()
        } else {
            Table::from_csv_str(&text)?
        };
        self.stage = PassStage::Materialized;

        Ok(table)
    }

    /// Run all stages
    pub fn run(mut self) -> Result<Table, ParseError> {
        self.compute_widths()?;
        self.normalize()?;
        self.materialize()
    }

    fn expect_stage(&self, expected: PassStage) -> Result<(), ParseError> {
        if self.stage != expected {
            return Err(ParseError::StageOrder {
                expected,
                found: self.stage,
            });
        }
        Ok(())
    }
}

/// Parse `text` for one marker into a table
///
/// **Public** - main entry point for in-memory parsing
///
/// # Arguments
/// * `text` - Full text dump, one event per line
/// * `marker` - Substring selecting the event type, e.g. `"thermal_temperature:"`
/// * `options` - Drift handling
///
/// # Returns
/// One row per matching line; an empty table when nothing matches
///
/// # Errors
/// * `ParseError::MissingTimestamp` - a matching line has no timestamp
/// * `ParseError::SchemaDrift` - strict mode and a line's columns differ
/// * `ParseError::Table` - extracted text could not be materialized
///
/// # Example
/// ```ignore
/// let table = parse_text(
///     "100.0: thermal_temperature: id=0 temp=45000\n",
///     "thermal_temperature:",
///     ParseOptions::default(),
/// )?;
/// assert_eq!(table.column("temp")?, vec![Some("45000")]);
/// ```
pub fn parse_text(text: &str, marker: &str, options: ParseOptions) -> Result<Table, ParseError> {
    ParseSession::new(text, marker, options).run()
}

/// Read a whole text dump, replacing invalid UTF-8 with U+FFFD
///
/// Lines of other events may carry raw bytes (task names, paths); they must
/// not stop the selected events from being parsed.
pub fn read_trace_text(path: impl AsRef<Path>) -> Result<String, ParseError> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a text dump and parse it for one marker
///
/// **Public** - reads the whole file into memory
///
/// # Arguments
/// * `path` - Text dump, usually `<trace dir>/trace.txt`
/// * `marker` - Substring selecting the event type
/// * `options` - Drift handling
///
/// # Returns
/// Same as [`parse_text`] over the file contents
///
/// # Errors
/// * `ParseError::Io` - the file cannot be read
/// * any error of [`parse_text`]
///
/// # Example
/// ```ignore
/// let table = parse_file("trace/trace.txt", "thermal_power_allocator:", ParseOptions::default())?;
/// println!("{} rows", table.len());
/// ```
pub fn parse_file(
    path: impl AsRef<Path>,
    marker: &str,
    options: ParseOptions,
) -> Result<Table, ParseError> {
    let path = path.as_ref();
    info!("Parsing {} for '{}'", path.display(), marker);

    let text = read_trace_text(path)?;
    let table = parse_text(&text, marker, options)?;

    info!("Parsed {} rows, {} columns", table.len(), table.columns().len());
    Ok(table)
}
