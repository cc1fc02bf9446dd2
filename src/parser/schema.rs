//! Column schema inferred from the first record of a pass.
//!
//! The schema is trusted for every later record. [`Schema::check`] is an
//! opt-in validation that reports field-set drift instead of letting rows
//! go silently out of alignment.

use super::explode::FlatRecord;
use crate::utils::config::{COLUMN_SEPARATOR, TIME_COLUMN};
use crate::utils::error::ParseError;

/// Ordered data columns of a table (the `Time` index is implicit)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    /// Infer the schema from one exploded record
    pub fn infer(record: &FlatRecord) -> Self {
        Self {
            columns: record.names().map(str::to_string).collect(),
        }
    }

    /// Data columns, without `Time`
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Full header: `Time` then the data columns
    pub fn header(&self) -> Vec<String> {
        std::iter::once(TIME_COLUMN.to_string())
            .chain(self.columns.iter().cloned())
            .collect()
    }

    /// Header joined with the column separator
    pub fn header_line(&self) -> String {
        self.header().join(&COLUMN_SEPARATOR.to_string())
    }

    /// Validate that `record` carries exactly the inferred columns
    pub fn check(&self, line: usize, record: &FlatRecord) -> Result<(), ParseError> {
        if record.names().eq(self.columns.iter().map(String::as_str)) {
            return Ok(());
        }

        Err(ParseError::SchemaDrift {
            line,
            expected: self.columns.clone(),
            found: record.names().map(str::to_string).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::explode::explode_payload;
    use crate::parser::prescan::ArrayWidths;

    fn record(payload: &str) -> FlatRecord {
        explode_payload(payload, &ArrayWidths::default())
    }

    #[test]
    fn test_header_line() {
        let schema = Schema::infer(&record("id=0 temp=45000"));
        assert_eq!(schema.header_line(), "Time,id,temp");
        assert_eq!(schema.header().len(), 3);
    }

    #[test]
    fn test_check_accepts_same_columns() {
        let schema = Schema::infer(&record("id=0 temp=45000"));
        assert!(schema.check(2, &record("id=1 temp=46000")).is_ok());
    }

    #[test]
    fn test_check_reports_drift() {
        let schema = Schema::infer(&record("id=0 temp=45000"));
        let err = schema.check(7, &record("id=1 temp=4 extra=1")).unwrap_err();

        match err {
            ParseError::SchemaDrift { line, found, .. } => {
                assert_eq!(line, 7);
                assert_eq!(found, vec!["id", "temp", "extra"]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
