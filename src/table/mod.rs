//! Tabular materialization of parsed trace events.
//!
//! This module handles:
//! - Building a `Time`-indexed table from header + row text
//! - Shifting times to a baseline
//! - Exporting back to delimited text
//! - Selecting and renaming exploded array columns

pub mod frame;
pub mod select;

pub use frame::{Row, Table};
