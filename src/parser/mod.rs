//! Trace text parsing.
//!
//! This module handles:
//! - Selecting the lines of one event type
//! - Inferring array widths across the whole dataset
//! - Exploding array fields into flat, zero-padded columns
//! - Extracting the header and rows for the table

pub mod explode;
pub mod extract;
pub mod filter;
pub mod prescan;
pub mod schema;
pub mod session;

// Re-export main types
pub use explode::{explode_payload, FlatField, FlatRecord};
pub use extract::{extract_payload, extract_timestamp, Extractor};
pub use filter::{matches_marker, select_lines, SelectedLine};
pub use prescan::{prescan_array_widths, ArrayWidths};
pub use schema::Schema;
pub use session::{parse_file, parse_text, read_trace_text, ParseOptions, ParseSession, PassStage};
