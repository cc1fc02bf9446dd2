//! Delimited text export of tables.
//!
//! Comma separated, unquoted fields, LF line endings, header always written.

use super::validate_output_path;
use crate::table::Table;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a table to a delimited text file
///
/// **Public** - main entry point for table export
///
/// # Arguments
/// * `table` - Table to export, drifted rows included
/// * `output_path` - Destination file, parent directories are created
///
/// # Returns
/// `Ok(())` once the file is flushed
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error while creating the file
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
/// * `OutputError::Table` - Rows could not be written
///
/// # Example
/// ```ignore
/// let table = parse_text(&text, "thermal_temperature:", ParseOptions::default())?;
/// write_table(&table, "out/thermal.csv")?;
/// ```
pub fn write_table(table: &Table, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing table to: {}", output_path.display());

    validate_output_path(output_path)?;
    super::create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    table.write_csv(BufWriter::new(file))?;

    info!(
        "Table written successfully ({} rows, {} columns)",
        table.len(),
        table.header().len()
    );

    Ok(())
}

/// Read a table back from a delimited text file
///
/// # Arguments
/// * `input_path` - File previously written by `write_table` or any CSV
///   with a `Time` column
///
/// # Returns
/// The table, rows in file order
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::Table` - Missing `Time` column, bad time value or malformed CSV
///
/// # Example
/// ```ignore
/// let table = read_table("out/thermal.csv")?;
/// println!("{} rows", table.len());
/// ```
pub fn read_table(input_path: impl AsRef<Path>) -> Result<Table, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading table from: {}", input_path.display());

    let text = std::fs::read_to_string(input_path).map_err(OutputError::WriteFailed)?;
    let table = Table::from_csv_str(&text)?;

    debug!("Table loaded: {} rows", table.len());

    Ok(table)
}
