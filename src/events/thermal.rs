//! Helpers for `thermal_temperature` tables.

use super::EventTable;
use crate::utils::config::MILLIDEGREES_PER_DEGREE;
use crate::utils::error::TableError;

impl EventTable {
    /// `temp` column converted from millidegrees to degrees Celsius
    pub fn temperature_celsius(&self) -> Result<Vec<Option<f64>>, TableError> {
        Ok(self
            .table()
            .column_f64("temp")?
            .into_iter()
            .map(|t| t.map(|millis| millis / MILLIDEGREES_PER_DEGREE))
            .collect())
    }
}
