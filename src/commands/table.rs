//! Table command implementation.
//!
//! The table command:
//! 1. Routes the input by extension (trace vs. tabular)
//! 2. Parses it into records or a rectangular table
//! 3. Builds the five-column long table
//! 4. Writes it as CSV into the output directory

use crate::output::table::write_long_table;
use crate::reader::cali::CaliperReader;
use crate::reader::tabular::{read_tabular, separator_for};
use crate::table::long::{rows_from_tabular, rows_from_trace, LongRow};
use crate::utils::config::{TABLE_OUTPUT_SUFFIX, TRACE_EXTENSION};
use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

/// Arguments for the table command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct TableArgs {
    /// Input file: `.cali` trace, or `.csv`/`.tsv` tabular
    pub input: PathBuf,

    /// Output directory for the long table
    pub outdir: PathBuf,

    /// Leading rows to discard in tabular mode
    pub skip_rows: usize,

    /// Pipe-delimited annotation labels for tabular rows
    pub annotations: Option<String>,
}

/// Validate table arguments before any input is read.
///
/// An unsupported extension is a fatal configuration error here, so no
/// partial output can ever be produced for it.
pub fn validate_table_args(args: &TableArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }
    if !is_trace_input(&args.input) {
        separator_for(&args.input)?;
    }
    Ok(())
}

/// Execute the table command, returning the written output path.
pub fn execute_table(args: &TableArgs) -> Result<PathBuf> {
    info!("Transforming {} to long table", args.input.display());

    let rows = build_rows(&args.input, args.skip_rows, args.annotations.as_deref())?;

    let file_name = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    let outfile = args
        .outdir
        .join(format!("{}.{}", file_name, TABLE_OUTPUT_SUFFIX));

    write_long_table(&rows, &outfile).context("Failed to write long table")?;

    info!("✓ Long table written to: {}", outfile.display());
    Ok(outfile)
}

/// Build long rows from either input shape.
///
/// Shared with the dashboard stub, which parses but does not yet emit.
pub(crate) fn build_rows(
    input: &Path,
    skip_rows: usize,
    annotations: Option<&str>,
) -> Result<Vec<LongRow>> {
    if is_trace_input(input) {
        let reader = CaliperReader::read(input)
            .with_context(|| format!("Failed to read trace file {}", input.display()))?;
        Ok(rows_from_trace(&reader))
    } else {
        let table = read_tabular(input, skip_rows)
            .with_context(|| format!("Failed to read tabular file {}", input.display()))?;
        Ok(rows_from_tabular(
            &table,
            &input.display().to_string(),
            annotations.unwrap_or_default(),
        ))
    }
}

fn is_trace_input(input: &Path) -> bool {
    input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TRACE_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(input: &str) -> TableArgs {
        TableArgs {
            input: PathBuf::from(input),
            outdir: PathBuf::from("tables"),
            skip_rows: 0,
            annotations: None,
        }
    }

    #[test]
    fn test_validate_accepts_known_extensions() {
        assert!(validate_table_args(&args_for("run.cali")).is_ok());
        assert!(validate_table_args(&args_for("run.csv")).is_ok());
        assert!(validate_table_args(&args_for("run.tsv")).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_extension() {
        assert!(validate_table_args(&args_for("run.xlsx")).is_err());
        assert!(validate_table_args(&args_for("run")).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_input() {
        assert!(validate_table_args(&args_for("")).is_err());
    }

    #[test]
    fn test_trace_routing_is_case_insensitive() {
        assert!(is_trace_input(Path::new("run.CALI")));
        assert!(!is_trace_input(Path::new("run.csv")));
    }
}
