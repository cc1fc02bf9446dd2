//! Configuration and constants for the CLI.

/// Cached text dump produced by `trace-cmd report`
pub const TRACE_TEXT_FILE: &str = "trace.txt";

/// Raw binary capture consumed by `trace-cmd report`
pub const TRACE_DAT_FILE: &str = "trace.dat";

/// Default trace-cmd executable (overridable with `TRACE_CMD`)
pub const DEFAULT_TRACE_CMD: &str = "trace-cmd";

/// Name of the index column of every table
pub const TIME_COLUMN: &str = "Time";

/// Column separator for the delimited text format
pub const COLUMN_SEPARATOR: char = ',';

/// Value written into array slots a line did not fill
pub const PAD_VALUE: &str = "0";

/// Current summary schema version
pub const SUMMARY_VERSION: &str = "1.0.0";

// Event markers as they appear in trace-cmd output
pub const TEMPERATURE_MARKER: &str = "thermal_temperature:";
pub const POWER_ALLOCATOR_MARKER: &str = "thermal_power_allocator:";

/// Total power column, not an actor
pub const TOTAL_POWER_IN_COLUMN: &str = "Ptot_in";

/// `temp` is reported in millidegrees Celsius
pub const MILLIDEGREES_PER_DEGREE: f64 = 1000.0;
