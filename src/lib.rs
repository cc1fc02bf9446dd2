//! Trace Tabulate
//!
//! Turns `trace-cmd report` text dumps of kernel thermal events into
//! time-indexed tables.
//!
//! Lines of one event type are selected by a marker substring. Array fields
//! such as `req_power={100 200}` are exploded into `req_power0`,
//! `req_power1`, ... and zero-padded to the widest array seen anywhere in
//! the dump, so every row has the same columns.
//!
//! ```ignore
//! use trace_tabulate::parser::{parse_text, ParseOptions};
//!
//! let table = parse_text(text, "thermal_temperature:", ParseOptions::default())?;
//! print!("{}", table.to_csv_string()?);
//! ```

pub mod commands;
pub mod events;
pub mod output;
pub mod parser;
pub mod source;
pub mod table;
pub mod utils;
