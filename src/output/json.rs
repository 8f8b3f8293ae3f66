//! Flamegraph JSON writer.
//!
//! Serializes the combined tree with pretty formatting. Leaf nodes omit
//! the `children` key entirely; flamegraph clients read its absence as
//! "leaf", so an empty list would change meaning.

use super::table::create_parent_dirs;
use crate::flamegraph::tree::FlameNode;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a combined flamegraph tree to a JSON file.
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_flamegraph(tree: &FlameNode, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing flamegraph to: {}", output_path.display());

    if output_path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }
    if output_path.exists() && output_path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            output_path.display()
        )));
    }
    create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, tree).map_err(OutputError::SerializationFailed)?;

    info!("Flamegraph written successfully");
    Ok(())
}

/// Read a flamegraph tree back from a JSON file.
///
/// Useful for validation and round-trip testing.
pub fn read_flamegraph(input_path: impl AsRef<Path>) -> Result<FlameNode, OutputError> {
    let input_path = input_path.as_ref();
    debug!("Reading flamegraph from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let tree: FlameNode = serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;
    Ok(tree)
}
