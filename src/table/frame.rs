//! Time-indexed table built from the extractor's delimited text.

use crate::utils::config::{COLUMN_SEPARATOR, TIME_COLUMN};
use crate::utils::error::TableError;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use log::debug;
use std::io::Write;

/// One table row: the `Time` index and the raw values in column order
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    time: f64,
    /// Time exactly as it should be exported
    time_text: String,
    values: Vec<String>,
}

impl Row {
    pub fn new(time: f64, time_text: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            time,
            time_text: time_text.into(),
            values,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Value at column `idx`; `None` when a drifted row is too short
    pub fn value(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).map(String::as_str)
    }
}

/// Rows in file order, indexed by `Time`
///
/// Duplicate and non-monotonic times are kept as they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Table for a pass that matched no lines
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Parse delimited text whose header contains a `Time` column
    ///
    /// **Public** - materializes a parse pass and reads exported files
    ///
    /// Quoted fields follow the usual CSV rules. Rows may be shorter or
    /// longer than the header; missing cells read as `None`.
    ///
    /// # Arguments
    /// * `text` - Header line followed by one line per row
    ///
    /// # Returns
    /// The table, or an empty table when `text` has no header
    ///
    /// # Errors
    /// * `TableError::MissingTimeColumn` - header has no `Time`
    /// * `TableError::InvalidTime` - a row's time is not a number
    /// * `TableError::Csv` - text is not valid delimited data
    ///
    /// # Example
    /// ```ignore
    /// let table = Table::from_csv_str("Time,id,temp\n100.0,0,45000\n")?;
    /// assert_eq!(table.column("temp")?, vec![Some("45000")]);
    /// ```
    pub fn from_csv_str(text: &str) -> Result<Self, TableError> {
        if text.trim().is_empty() {
            return Ok(Self::empty());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(COLUMN_SEPARATOR as u8)
            .from_reader(text.as_bytes());

        let header = reader.headers()?.clone();
        let time_idx = header
            .iter()
            .position(|name| name == TIME_COLUMN)
            .ok_or(TableError::MissingTimeColumn)?;

        let columns = without_index(&header, time_idx);

        let mut rows = Vec::new();
        for (row_idx, record) in reader.records().enumerate() {
            let record = record?;
            let time_text = record.get(time_idx).unwrap_or("");
            let time = time_text
                .trim()
                .parse::<f64>()
                .map_err(|_| TableError::InvalidTime {
                    row: row_idx,
                    value: time_text.to_string(),
                })?;

            rows.push(Row::new(time, time_text, without_index(&record, time_idx)));
        }

        debug!("Materialized table: {} columns, {} rows", columns.len(), rows.len());

        Ok(Self { columns, rows })
    }

    /// Data columns, without `Time`
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// `Time` followed by the data columns
    pub fn header(&self) -> Vec<String> {
        std::iter::once(TIME_COLUMN.to_string())
            .chain(self.columns.iter().cloned())
            .collect()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn times(&self) -> Vec<f64> {
        self.rows.iter().map(Row::time).collect()
    }

    pub fn first_time(&self) -> Option<f64> {
        self.rows.first().map(Row::time)
    }

    pub fn last_time(&self) -> Option<f64> {
        self.rows.last().map(Row::time)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Raw values of one column
    pub fn column(&self, name: &str) -> Result<Vec<Option<&str>>, TableError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))?;

        Ok(self.rows.iter().map(|row| row.value(idx)).collect())
    }

    /// Values of one column parsed as numbers; unparseable cells are `None`
    pub fn column_f64(&self, name: &str) -> Result<Vec<Option<f64>>, TableError> {
        Ok(self
            .column(name)?
            .into_iter()
            .map(|cell| cell.and_then(|v| v.trim().parse::<f64>().ok()))
            .collect())
    }

    /// New table with `basetime` subtracted from every time
    ///
    /// Row order and count are preserved; nothing is re-sorted.
    pub fn normalize_time(&self, basetime: f64) -> Table {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let time = row.time - basetime;
                Row::new(time, format!("{:?}", time), row.values.clone())
            })
            .collect();

        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Write header and rows: comma separated, unquoted, LF endings
    ///
    /// Drifted rows are written with their own length.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), TableError> {
        let mut writer = WriterBuilder::new()
            .delimiter(COLUMN_SEPARATOR as u8)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(writer);

        writer.write_record(self.header())?;
        for row in &self.rows {
            writer.write_record(
                std::iter::once(row.time_text.as_str()).chain(row.values.iter().map(String::as_str)),
            )?;
        }
        writer.flush().map_err(csv::Error::from)?;

        Ok(())
    }

    /// Header and rows as one string, in the `write_csv` format
    pub fn to_csv_string(&self) -> Result<String, TableError> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Copy every field except the one at `skip`
///
/// **Private** - internal helper for from_csv_str
fn without_index(fields: &StringRecord, skip: usize) -> Vec<String> {
    fields
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != skip)
        .map(|(_, field)| field.to_string())
        .collect()
}
