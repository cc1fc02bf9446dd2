//! Parse command implementation.
//!
//! The parse command:
//! 1. Ensures the text dump exists (running trace-cmd if needed)
//! 2. Parses one event type into a table
//! 3. Optionally shifts times to a baseline
//! 4. Writes the requested outputs

use crate::events::{EventKind, EventTable};
use crate::output::{write_summary, write_table, TableSummary};
use crate::parser::ParseOptions;
use crate::source::{CachedTextDump, TextDumpSource, TraceCmdReport};
use crate::utils::config::DEFAULT_TRACE_CMD;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the parse command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ParseArgs {
    /// Directory holding trace.txt and/or trace.dat
    pub basepath: PathBuf,

    /// Known event to parse (ignored when `marker` is set)
    pub event: EventKind,

    /// Custom marker substring
    pub marker: Option<String>,

    /// Output path for the delimited table (optional)
    pub output_csv: Option<PathBuf>,

    /// Output path for the JSON summary (optional)
    pub output_summary: Option<PathBuf>,

    /// Subtract this time from every row
    pub basetime: Option<f64>,

    /// Fail when a line's columns differ from the first line's
    pub strict_schema: bool,

    /// Never run trace-cmd, require a cached trace.txt
    pub no_report: bool,

    /// trace-cmd executable
    pub trace_cmd: String,

    /// Print the table to stdout
    pub print_table: bool,
}

impl Default for ParseArgs {
    fn default() -> Self {
        Self {
            basepath: PathBuf::from("."),
            event: EventKind::Temperature,
            marker: None,
            output_csv: None,
            output_summary: None,
            basetime: None,
            strict_schema: false,
            no_report: false,
            trace_cmd: DEFAULT_TRACE_CMD.to_string(),
            print_table: false,
        }
    }
}

impl ParseArgs {
    /// Marker actually used for the pass
    pub fn marker(&self) -> &str {
        self.marker.as_deref().unwrap_or(self.event.marker())
    }
}

/// Execute the parse command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Missing trace.txt and trace.dat
/// * trace-cmd failures
/// * Lines without timestamps, or schema drift in strict mode
/// * File write errors
pub fn execute_parse(args: ParseArgs) -> Result<EventTable> {
    let start_time = Instant::now();

    info!("Parsing '{}' events in {}", args.marker(), args.basepath.display());

    // Step 1: Load the table
    info!("Step 1/3: Loading trace events...");
    let mut events = load_events(&args)?;

    debug!(
        "Loaded {} rows, {} array fields",
        events.table().len(),
        events.widths().len()
    );

    // Step 2: Time shift
    if let Some(basetime) = args.basetime {
        info!("Step 2/3: Shifting times by {}", basetime);
        events.normalize_time(basetime);
    } else {
        info!("Step 2/3: Skipping time shift (no basetime)");
    }

    // Step 3: Write outputs
    info!("Step 3/3: Writing output files...");

    if let Some(csv_path) = &args.output_csv {
        write_table(events.table(), csv_path).context("Failed to write table")?;
        info!("✓ Table written to: {}", csv_path.display());
    }

    if let Some(summary_path) = &args.output_summary {
        let summary = TableSummary::new(
            events.source_path(),
            events.marker(),
            events.table(),
            events.widths(),
        );
        write_summary(&summary, summary_path).context("Failed to write summary JSON")?;
        info!("✓ Summary written to: {}", summary_path.display());
    }

    if args.print_table {
        events
            .table()
            .write_csv(std::io::stdout().lock())
            .context("Failed to print table")?;
    }

    let elapsed = start_time.elapsed();
    info!("Parse completed in {:.2}s", elapsed.as_secs_f64());

    Ok(events)
}

/// Pick the text dump source and parse one pass
///
/// **Private** - internal helper for execute_parse
fn load_events(args: &ParseArgs) -> Result<EventTable> {
    let source: Box<dyn TextDumpSource> = if args.no_report {
        Box::new(CachedTextDump)
    } else {
        Box::new(TraceCmdReport::new(args.trace_cmd.clone()))
    };

    let options = ParseOptions {
        strict_schema: args.strict_schema,
    };

    EventTable::load(&args.basepath, args.marker(), &*source, options)
        .with_context(|| format!("Failed to load events from {}", args.basepath.display()))
}

/// Validate parse arguments
///
/// **Public** - can be called before execute_parse for early validation
pub fn validate_args(args: &ParseArgs) -> Result<()> {
    if !args.basepath.is_dir() {
        anyhow::bail!("Trace directory does not exist: {}", args.basepath.display());
    }

    if let Some(marker) = &args.marker {
        if marker.trim().is_empty() {
            anyhow::bail!("Marker cannot be empty");
        }
    }

    if let Some(basetime) = args.basetime {
        if !basetime.is_finite() {
            anyhow::bail!("Basetime must be a finite number");
        }
    }

    if args.trace_cmd.is_empty() {
        anyhow::bail!("trace-cmd program cannot be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_valid() {
        let dir = tempfile::tempdir().unwrap();
        let args = ParseArgs {
            basepath: dir.path().to_path_buf(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_missing_dir() {
        let args = ParseArgs {
            basepath: PathBuf::from("/nonexistent/trace/dir"),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_marker() {
        let dir = tempfile::tempdir().unwrap();
        let args = ParseArgs {
            basepath: dir.path().to_path_buf(),
            marker: Some("  ".to_string()),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_nan_basetime() {
        let dir = tempfile::tempdir().unwrap();
        let args = ParseArgs {
            basepath: dir.path().to_path_buf(),
            basetime: Some(f64::NAN),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_marker_override() {
        let args = ParseArgs {
            event: EventKind::PowerAllocator,
            ..Default::default()
        };
        assert_eq!(args.marker(), "thermal_power_allocator:");

        let args = ParseArgs {
            marker: Some("cdev_update:".to_string()),
            ..args
        };
        assert_eq!(args.marker(), "cdev_update:");
    }

    #[test]
    fn test_execute_parse_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("trace.txt"),
            "10.0: thermal_temperature: id=0 temp=45000\n11.0: thermal_temperature: id=0 temp=47000\n",
        )
        .unwrap();

        let args = ParseArgs {
            basepath: dir.path().to_path_buf(),
            output_csv: Some(dir.path().join("out/thermal.csv")),
            output_summary: Some(dir.path().join("out/summary.json")),
            basetime: Some(10.0),
            no_report: true,
            ..Default::default()
        };

        let events = execute_parse(args).unwrap();

        assert_eq!(events.table().times(), vec![0.0, 1.0]);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("out/thermal.csv")).unwrap(),
            "Time,id,temp\n0.0,0,45000\n1.0,0,47000\n"
        );
        assert!(dir.path().join("out/summary.json").exists());
    }
}
