//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use crate::parser::PassStage;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while obtaining the text dump
#[derive(Error, Debug)]
pub enum SourceError {
    #[error(
        "Trace source unavailable: neither {} nor {} exists",
        .text.display(),
        .raw.display()
    )]
    Unavailable { text: PathBuf, raw: PathBuf },

    #[error("Failed to run {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} report exited with {status}")]
    ReportFailed { program: String, status: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during trace parsing
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read trace text: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: no timestamp found")]
    MissingTimestamp { line: usize },

    #[error("Line {line}: columns {found:?} differ from header {expected:?}")]
    SchemaDrift {
        line: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Parse stage out of order: expected {expected:?}, session is at {found:?}")]
    StageOrder { expected: PassStage, found: PassStage },

    #[error("Failed to build table: {0}")]
    Table(#[from] TableError),
}

/// Errors that can occur while loading an event table from a trace directory
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors that can occur while building or querying a table
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Header has no Time column")]
    MissingTimeColumn,

    #[error("Row {row}: invalid Time value '{value}'")]
    InvalidTime { row: usize, value: String },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Cannot rename {expected} columns with {found} names")]
    RenameMismatch { expected: usize, found: usize },

    #[error("Malformed delimited text: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Table I/O failed: {0}")]
    Table(#[from] TableError),
}
