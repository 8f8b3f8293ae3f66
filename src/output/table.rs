//! Long-table CSV writer.
//!
//! Writes the fixed header `path,annotation,dim1,dim2,value` and one
//! comma-separated line per row. A null `dim2` renders as an empty
//! field, distinct from the trace-mode rows that never carry one.

use crate::table::long::LongRow;
use crate::utils::config::LONG_TABLE_HEADER;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the long table to a CSV file, creating parent directories as
/// needed.
pub fn write_long_table(rows: &[LongRow], output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing long table to: {}", output_path.display());

    validate_output_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(long_table_to_string(rows).as_bytes())?;
    writer.flush()?;

    info!("Long table written successfully ({} rows)", rows.len());
    Ok(())
}

/// Render the long table to an in-memory CSV string.
///
/// Deterministic for a given row sequence, so repeated runs over the
/// same input produce byte-identical output.
pub fn long_table_to_string(rows: &[LongRow]) -> String {
    let mut out = String::new();
    out.push_str(&LONG_TABLE_HEADER.join(","));
    out.push('\n');

    for row in rows {
        let fields = [
            escape_field(&row.path),
            escape_field(&row.annotation),
            escape_field(&row.dim1),
            escape_field(row.dim2.as_deref().unwrap_or_default()),
            escape_field(&row.value),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// Quote a field when it contains the separator, a quote, or a line
/// break; embedded quotes double.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }
    Ok(())
}

pub(crate) fn create_parent_dirs(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}
