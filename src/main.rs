//! Cali Transform CLI
//!
//! Transforms Caliper performance traces into long-format tables and
//! merged flamegraph JSON.

use anyhow::Result;
use cali_transform::commands::{
    execute_dashboard, execute_flamegraph, execute_table, validate_flamegraph_args,
    validate_table_args, DashboardArgs, FlamegraphArgs, TableArgs,
};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

/// Cali Transform - long tables and flamegraphs from Caliper traces
#[derive(Parser, Debug)]
#[command(name = "cali-transform")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Transform one input file into the five-column long table
    Table {
        /// Input file: .cali trace, or .csv/.tsv tabular
        input: PathBuf,

        /// Output directory for the long table
        #[arg(short, long, default_value = "tables")]
        outdir: PathBuf,

        /// Number of leading rows to skip for tabular data
        #[arg(long, default_value = "0")]
        skip_rows: usize,

        /// Pipe (|) separated list of annotations (no spaces)
        #[arg(long)]
        annotations: Option<String>,
    },

    /// Merge trace files matching a glob into one flamegraph JSON
    Flamegraph {
        /// Glob to match trace files (e.g. *.cali)
        #[arg(short, long, default_value = "*.cali")]
        glob: String,

        /// Output directory for the combined flamegraph
        #[arg(short, long, default_value = "flamegraph")]
        outdir: PathBuf,

        /// Explicit metric name override
        #[arg(short, long)]
        metric: Option<String>,

        /// Rank slice to extract
        #[arg(long, default_value = "0")]
        rank: u32,

        /// Thread slice to extract
        #[arg(long, default_value = "0")]
        thread: u32,
    },

    /// Generate a dashboard JSON document (not implemented yet)
    Dashboard {
        /// Input file: .cali trace, or .csv/.tsv tabular
        input: PathBuf,

        /// Output directory for the dashboard
        #[arg(short, long, default_value = "dashboards")]
        outdir: PathBuf,

        /// Number of leading rows to skip for tabular data
        #[arg(long, default_value = "0")]
        skip_rows: usize,

        /// Pipe (|) separated list of annotations (no spaces)
        #[arg(long)]
        annotations: Option<String>,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Table {
            input,
            outdir,
            skip_rows,
            annotations,
        } => {
            let args = TableArgs {
                input,
                outdir,
                skip_rows,
                annotations,
            };

            // Validate args first
            validate_table_args(&args)?;

            let outfile = execute_table(&args)?;
            println!("Wrote {}", outfile.display());
        }

        Commands::Flamegraph {
            glob,
            outdir,
            metric,
            rank,
            thread,
        } => {
            let args = FlamegraphArgs {
                pattern: glob,
                outdir,
                metric,
                rank,
                thread,
            };

            validate_flamegraph_args(&args)?;

            let outfile = execute_flamegraph(&args)?;
            println!("Wrote {}", outfile.display());
        }

        Commands::Dashboard {
            input,
            outdir,
            skip_rows,
            annotations,
        } => {
            let args = DashboardArgs {
                input,
                outdir,
                skip_rows,
                annotations,
            };

            execute_dashboard(&args)?;
        }
    }

    Ok(())
}
