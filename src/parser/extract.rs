//! Field extraction: timestamp, payload, header and rows.
//!
//! Produces the delimited text the table is materialized from: one header
//! line derived from the first record, then one row per record.

use super::explode::FlatRecord;
use super::filter::SelectedLine;
use super::schema::Schema;
use crate::utils::config::COLUMN_SEPARATOR;
use crate::utils::error::ParseError;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static TIMESTAMP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+\.[0-9]+):").expect("valid timestamp pattern"));

static DATA_START_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+=").expect("valid data start pattern"));

/// A selected line cut into its timestamp and `key=value` payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLine<'a> {
    pub number: usize,
    pub timestamp: &'a str,
    pub payload: &'a str,
}

/// First `<digits>.<digits>` immediately followed by a colon
pub fn extract_timestamp(line: &str) -> Option<&str> {
    TIMESTAMP_PATTERN
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Everything from the first `key=` to the end of the line
///
/// Empty when the line has no `key=value` fields at all.
pub fn extract_payload(line: &str) -> &str {
    DATA_START_PATTERN
        .find(line)
        .map(|m| &line[m.start()..])
        .unwrap_or("")
}

/// Split a selected line, failing if it has no timestamp
pub fn split_line<'a>(line: &SelectedLine<'a>) -> Result<SplitLine<'a>, ParseError> {
    let timestamp = extract_timestamp(line.text)
        .ok_or(ParseError::MissingTimestamp { line: line.number })?;

    Ok(SplitLine {
        number: line.number,
        timestamp,
        payload: extract_payload(line.text),
    })
}

/// Remove literal column separators from a value
pub fn sanitize_value(value: &str) -> String {
    value.replace(COLUMN_SEPARATOR, "")
}

/// Build one row line: timestamp then the sanitized values
pub fn row_line(timestamp: &str, record: &FlatRecord) -> String {
    let mut row = String::from(timestamp);
    for value in record.values() {
        row.push(COLUMN_SEPARATOR);
        row.push_str(&sanitize_value(value));
    }
    row
}

/// Accumulates the header and rows of one pass
#[derive(Debug, Default)]
pub struct Extractor {
    schema: Option<Schema>,
    strict_schema: bool,
    text: String,
    rows: usize,
}

impl Extractor {
    pub fn new(strict_schema: bool) -> Self {
        Self {
            strict_schema,
            ..Default::default()
        }
    }

    /// Add one record; the first one fixes the header
    pub fn push(
        &mut self,
        line: usize,
        timestamp: &str,
        record: &FlatRecord,
    ) -> Result<(), ParseError> {
        if let Some(schema) = &self.schema {
            if self.strict_schema {
                schema.check(line, record)?;
            }
        } else {
            let schema = Schema::infer(record);
            debug!("Inferred {} columns from line {}", schema.columns().len(), line);
            self.text.push_str(&schema.header_line());
            self.text.push('\n');
            self.schema = Some(schema);
        }

        self.text.push_str(&row_line(timestamp, record));
        self.text.push('\n');
        self.rows += 1;

        Ok(())
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Header plus rows; empty when nothing was pushed
    pub fn into_text(self) -> String {
        self.text
    }
}
