use crate::table::Table;
use crate::utils::config::SUMMARY_VERSION;

/// Display the columns of a parsed table
pub fn display_columns(marker: &str, table: &Table) {
    println!("Columns for '{}' ({} rows):", marker, table.len());

    if table.columns().is_empty() {
        println!("  (no matching events)");
        return;
    }

    for (idx, name) in table.header().iter().enumerate() {
        println!("  {:>3}  {}", idx, name);
    }
}

/// Display version information
pub fn display_version() {
    println!("Trace Tabulate v{}", env!("CARGO_PKG_VERSION"));
    println!("Summary Schema: v{}", SUMMARY_VERSION);
    println!();
    println!("Turns trace-cmd text dumps of thermal events into time-indexed tables.");
}
