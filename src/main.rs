//! Trace Tabulate CLI
//!
//! Parses thermal events out of a trace-cmd text dump into a table.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trace_tabulate::commands::{
    display_columns, display_version, execute_parse, validate_args, ParseArgs,
};
use trace_tabulate::events::EventKind;
use trace_tabulate::utils::config::DEFAULT_TRACE_CMD;

/// Trace Tabulate - kernel thermal trace events as tables
#[derive(Parser, Debug)]
#[command(name = "trace-tabulate")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Options shared by commands that parse a trace
#[derive(clap::Args, Debug)]
struct SourceOpts {
    /// Directory containing trace.txt or trace.dat
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Event to parse
    #[arg(short, long, value_enum, default_value_t = EventKind::Temperature)]
    event: EventKind,

    /// Custom marker substring (overrides --event)
    #[arg(short, long)]
    marker: Option<String>,

    /// Fail when a line's columns differ from the first line's
    #[arg(long)]
    strict: bool,

    /// Never run trace-cmd; require an existing trace.txt
    #[arg(long)]
    no_report: bool,

    /// trace-cmd executable used to produce trace.txt
    #[arg(long, env = "TRACE_CMD", default_value = DEFAULT_TRACE_CMD)]
    trace_cmd: String,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse one event type into a table
    Parse {
        #[command(flatten)]
        source: SourceOpts,

        /// Output path for the table (comma separated)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for a JSON summary of the table
        #[arg(long)]
        summary_json: Option<PathBuf>,

        /// Subtract this time from every row
        #[arg(long)]
        basetime: Option<f64>,

        /// Print the table to stdout
        #[arg(long)]
        print: bool,
    },

    /// List the columns of one event type
    Columns {
        #[command(flatten)]
        source: SourceOpts,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Parse {
            source,
            output,
            summary_json,
            basetime,
            print,
        } => {
            let args = ParseArgs {
                output_csv: output,
                output_summary: summary_json,
                basetime,
                print_table: print,
                ..parse_args(source)
            };

            // Validate args first
            validate_args(&args)?;

            execute_parse(args)?;
        }

        Commands::Columns { source } => {
            let args = parse_args(source);
            validate_args(&args)?;

            let marker = args.marker().to_string();
            let events = execute_parse(args)?;
            display_columns(&marker, events.table());
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Build parse arguments from the shared source options
///
/// **Private** - internal helper
fn parse_args(source: SourceOpts) -> ParseArgs {
    ParseArgs {
        basepath: source.path,
        event: source.event,
        marker: source.marker,
        strict_schema: source.strict,
        no_report: source.no_report,
        trace_cmd: source.trace_cmd,
        ..Default::default()
    }
}
