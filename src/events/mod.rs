//! Thermal event tables loaded from a trace directory.
//!
//! An [`EventTable`] is the result of one parse pass for one marker over the
//! text dump of a trace directory.

pub mod governor;
pub mod thermal;

use crate::parser::{read_trace_text, ArrayWidths, ParseOptions, ParseSession};
use crate::source::TextDumpSource;
use crate::table::Table;
use crate::utils::config::{POWER_ALLOCATOR_MARKER, TEMPERATURE_MARKER};
use crate::utils::error::LoadError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Known thermal trace events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// `thermal_temperature` events (one zone temperature per line)
    Temperature,
    /// `thermal_power_allocator` governor events
    PowerAllocator,
}

impl EventKind {
    pub fn marker(self) -> &'static str {
        match self {
            EventKind::Temperature => TEMPERATURE_MARKER,
            EventKind::PowerAllocator => POWER_ALLOCATOR_MARKER,
        }
    }
}

/// Table of one event type plus where it came from
#[derive(Debug, Clone)]
pub struct EventTable {
    marker: String,
    source_path: PathBuf,
    table: Table,
    widths: ArrayWidths,
}

impl EventTable {
    /// Ensure the text dump of `basepath` exists and parse it for `marker`
    ///
    /// **Public** - main entry point for library users
    ///
    /// # Arguments
    /// * `basepath` - Trace directory holding `trace.txt` or `trace.dat`
    /// * `marker` - Substring selecting the event type
    /// * `source` - Produces the text dump when it is missing
    /// * `options` - Drift handling
    ///
    /// # Returns
    /// The table with its source path and inferred array widths
    ///
    /// # Errors
    /// * `LoadError::Source` - no text dump and no raw capture to produce one
    /// * `LoadError::Parse` - the dump could not be read or parsed
    ///
    /// # Example
    /// ```ignore
    /// let events = EventTable::load("trace", "thermal_temperature:", &CachedTextDump, ParseOptions::default())?;
    /// println!("{} rows from {}", events.table().len(), events.source_path().display());
    /// ```
    pub fn load(
        basepath: impl AsRef<Path>,
        marker: &str,
        source: &dyn TextDumpSource,
        options: ParseOptions,
    ) -> Result<Self, LoadError> {
        let basepath = basepath.as_ref();
        let source_path = source.ensure_text_dump(basepath)?;

        info!("Loading '{}' events from {}", marker, source_path.display());
        let text = read_trace_text(&source_path)?;

        let mut session = ParseSession::new(&text, marker, options);
        session.compute_widths()?;
        session.normalize()?;
        let widths = session.widths().clone();
        let table = session.materialize()?;

        if table.is_empty() {
            warn!("No '{}' events in {}", marker, source_path.display());
        }

        Ok(Self {
            marker: marker.to_string(),
            source_path,
            table,
            widths,
        })
    }

    /// [`EventTable::load`] with the marker of a known event
    pub fn load_kind(
        basepath: impl AsRef<Path>,
        kind: EventKind,
        source: &dyn TextDumpSource,
        options: ParseOptions,
    ) -> Result<Self, LoadError> {
        Self::load(basepath, kind.marker(), source, options)
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    /// Array widths inferred for this table
    pub fn widths(&self) -> &ArrayWidths {
        &self.widths
    }

    /// Subtract `basetime` from every row's time
    pub fn normalize_time(&mut self, basetime: f64) {
        self.table = self.table.normalize_time(basetime);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::CachedTextDump;

    #[test]
    fn test_event_kind_markers() {
        assert_eq!(EventKind::Temperature.marker(), "thermal_temperature:");
        assert_eq!(EventKind::PowerAllocator.marker(), "thermal_power_allocator:");
    }

    #[test]
    fn test_load_and_normalize_time() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("trace.txt"),
            "10.0: thermal_temperature: id=0 temp=45000\n10.5: thermal_temperature: id=0 temp=46000\n",
        )
        .unwrap();

        let mut events = EventTable::load_kind(
            dir.path(),
            EventKind::Temperature,
            &CachedTextDump,
            ParseOptions::default(),
        )
        .unwrap();
        events.normalize_time(10.0);

        assert_eq!(events.table().times(), vec![0.0, 0.5]);
        assert_eq!(events.marker(), "thermal_temperature:");
    }

    #[test]
    fn test_load_skips_invalid_utf8_in_other_events() {
        let dir = tempfile::tempdir().unwrap();
        let mut dump = b"  <idle>-0  [000]   9.900000: sched_switch: prev_comm=\xff\xfe next_pid=1\n".to_vec();
        dump.extend_from_slice(b"  kworker/0:1-45  [000]   10.000000: thermal_temperature: id=0 temp=45000\n");
        std::fs::write(dir.path().join("trace.txt"), dump).unwrap();

        let events = EventTable::load_kind(
            dir.path(),
            EventKind::Temperature,
            &CachedTextDump,
            ParseOptions::default(),
        )
        .unwrap();

        assert_eq!(events.table().len(), 1);
        assert_eq!(events.table().column("temp").unwrap(), vec![Some("45000")]);
    }

    #[test]
    fn test_load_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let result = EventTable::load(dir.path(), "x:", &CachedTextDump, ParseOptions::default());
        assert!(matches!(result, Err(LoadError::Source(_))));
    }
}
