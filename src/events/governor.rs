//! Helpers for `thermal_power_allocator` tables.
//!
//! The governor logs one array slot per cooling actor, in registration
//! order. Callers pass the actor names in that same order to label the
//! exploded `req_power<N>` / `granted_power<N>` columns.

use super::EventTable;
use crate::output::write_table;
use crate::table::Table;
use crate::utils::config::TOTAL_POWER_IN_COLUMN;
use crate::utils::error::{OutputError, TableError};
use std::path::Path;

impl EventTable {
    /// Requested power per actor, columns named after `actor_order`
    pub fn input_power<S: AsRef<str>>(&self, actor_order: &[S]) -> Result<Table, TableError> {
        let columns = self.table().array_columns("req_power");
        self.table().select_renamed(&columns, actor_order)
    }

    /// Granted power per actor, columns named after `actor_order`
    pub fn output_power<S: AsRef<str>>(&self, actor_order: &[S]) -> Result<Table, TableError> {
        let columns = self.table().array_columns("granted_power");
        self.table().select_renamed(&columns, actor_order)
    }

    /// Actor names found in `P<actor>_in` columns, excluding the total
    pub fn actors(&self) -> Vec<&str> {
        self.table()
            .columns()
            .iter()
            .filter(|col| col.as_str() != TOTAL_POWER_IN_COLUMN)
            .filter_map(|col| col.strip_prefix('P').and_then(|rest| rest.strip_suffix("_in")))
            .collect()
    }

    /// Export the table as delimited text to `path`
    pub fn write_thermal_csv(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        write_table(self.table(), path)
    }
}

#[cfg(test)]
mod tests {
    use crate::events::{EventKind, EventTable};
    use crate::parser::ParseOptions;
    use crate::source::CachedTextDump;
    use pretty_assertions::assert_eq;

    const TRACE: &str = "\
100.000000: thermal_power_allocator: tz_id=0 req_power={1000 2000} granted_power={900 1800} Plittle_in=1000 Pbig_in=2000 Ptot_in=3000
100.100000: thermal_power_allocator: tz_id=0 req_power={1100 2100} granted_power={950 1850} Plittle_in=1100 Pbig_in=2100 Ptot_in=3200
";

    fn load(dir: &tempfile::TempDir) -> EventTable {
        std::fs::write(dir.path().join("trace.txt"), TRACE).unwrap();
        EventTable::load_kind(
            dir.path(),
            EventKind::PowerAllocator,
            &CachedTextDump,
            ParseOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_input_and_output_power() {
        let dir = tempfile::tempdir().unwrap();
        let events = load(&dir);

        let input = events.input_power(&["little", "big"]).unwrap();
        assert_eq!(input.header(), vec!["Time", "little", "big"]);
        assert_eq!(input.column("big").unwrap(), vec![Some("2000"), Some("2100")]);

        let output = events.output_power(&["little", "big"]).unwrap();
        assert_eq!(output.column("little").unwrap(), vec![Some("900"), Some("950")]);
    }

    #[test]
    fn test_actor_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let events = load(&dir);
        assert!(events.input_power(&["only_one"]).is_err());
    }

    #[test]
    fn test_actors() {
        let dir = tempfile::tempdir().unwrap();
        let events = load(&dir);
        assert_eq!(events.actors(), vec!["little", "big"]);
    }

    #[test]
    fn test_write_thermal_csv() {
        let dir = tempfile::tempdir().unwrap();
        let events = load(&dir);
        let out = dir.path().join("thermal.csv");

        events.write_thermal_csv(&out).unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.starts_with(
            "Time,tz_id,req_power0,req_power1,granted_power0,granted_power1,Plittle_in,Pbig_in,Ptot_in\n"
        ));
        assert_eq!(written.lines().count(), 3);
    }
}
