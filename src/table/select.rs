//! Column selection over exploded array fields.

use super::frame::{Row, Table};
use crate::utils::error::TableError;

impl Table {
    /// Columns named `base` followed only by digits, in table order
    ///
    /// `array_columns("req_power")` finds `req_power0`, `req_power1`, ...
    pub fn array_columns(&self, base: &str) -> Vec<&str> {
        self.columns()
            .iter()
            .filter(|name| {
                name.strip_prefix(base)
                    .is_some_and(|idx| !idx.is_empty() && idx.bytes().all(|b| b.is_ascii_digit()))
            })
            .map(String::as_str)
            .collect()
    }

    /// New table holding `columns` renamed to `names`, times unchanged
    ///
    /// # Errors
    /// * `TableError::RenameMismatch` - `columns` and `names` differ in length
    /// * `TableError::UnknownColumn` - a column is not in the table
    pub fn select_renamed<S: AsRef<str>>(
        &self,
        columns: &[&str],
        names: &[S],
    ) -> Result<Table, TableError> {
        if columns.len() != names.len() {
            return Err(TableError::RenameMismatch {
                expected: columns.len(),
                found: names.len(),
            });
        }

        let indices = columns
            .iter()
            .map(|name| {
                self.column_index(name)
                    .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = self
            .rows()
            .iter()
            .map(|row| {
                let values = indices
                    .iter()
                    .map(|idx| row.value(*idx).unwrap_or_default().to_string())
                    .collect();
                Row::new(row.time(), row.time_text(), values)
            })
            .collect();

        Ok(Table::new(
            names.iter().map(|n| n.as_ref().to_string()).collect(),
            rows,
        ))
    }
}
