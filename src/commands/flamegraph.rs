//! Flamegraph command implementation.
//!
//! Expands the trace glob, folds every file into one combined tree,
//! and writes the merged flamegraph JSON.

use crate::flamegraph::aggregate::aggregate_flamegraph;
use crate::output::json::write_flamegraph;
use crate::utils::config::FLAMEGRAPH_OUTPUT_FILE;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Arguments for the flamegraph command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct FlamegraphArgs {
    /// Glob matching the trace files to merge (e.g. `*.cali`)
    pub pattern: String,

    /// Output directory for the combined flamegraph
    pub outdir: PathBuf,

    /// Explicit metric name; defaults to each file's own metric
    pub metric: Option<String>,

    /// Rank slice to extract
    pub rank: u32,

    /// Thread slice to extract
    pub thread: u32,
}

/// Validate flamegraph arguments before execution.
pub fn validate_flamegraph_args(args: &FlamegraphArgs) -> Result<()> {
    if args.pattern.is_empty() {
        anyhow::bail!("Trace glob pattern cannot be empty");
    }
    Ok(())
}

/// Execute the flamegraph command, returning the written output path.
pub fn execute_flamegraph(args: &FlamegraphArgs) -> Result<PathBuf> {
    info!("Building combined flamegraph from {}", args.pattern);

    let tree = aggregate_flamegraph(
        &args.pattern,
        args.metric.as_deref(),
        args.rank,
        args.thread,
    )
    .context("Failed to aggregate flamegraph")?;

    let outfile = args.outdir.join(FLAMEGRAPH_OUTPUT_FILE);
    write_flamegraph(&tree, &outfile).context("Failed to write flamegraph JSON")?;

    info!("✓ Flamegraph written to: {}", outfile.display());
    Ok(outfile)
}
