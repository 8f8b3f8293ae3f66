//! Dashboard command stub.
//!
//! Parses the input into the long table so configuration and input
//! errors surface now, but emits no dashboard document yet.

use super::table::build_rows;
use anyhow::Result;
use log::{info, warn};
use std::path::PathBuf;

/// Arguments for the dashboard command
#[derive(Debug, Clone)]
pub struct DashboardArgs {
    pub input: PathBuf,
    pub outdir: PathBuf,
    pub skip_rows: usize,
    pub annotations: Option<String>,
}

/// Execute the dashboard stub.
pub fn execute_dashboard(args: &DashboardArgs) -> Result<()> {
    info!("Preparing dashboard data from {}", args.input.display());

    let rows = build_rows(&args.input, args.skip_rows, args.annotations.as_deref())?;

    // TODO: emit a dashboard JSON document once the panel schema is settled
    warn!(
        "Dashboard generation is not implemented yet; parsed {} rows, nothing written to {}",
        rows.len(),
        args.outdir.display()
    );
    Ok(())
}
