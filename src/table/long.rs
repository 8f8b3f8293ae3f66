//! Build long-format rows from trace records and tabular sources.
//!
//! Both input shapes produce the same five-column rows:
//! `(path, annotation, dim1, dim2, value)`. Row order always equals
//! input iteration order; nothing here sorts.

use super::attributes::{resolve_values, resolved_annotation, resolved_path};
use crate::reader::cali::CaliperReader;
use crate::reader::tabular::TabularData;
use crate::utils::config::ANNOTATION_SEPARATOR;
use log::debug;

/// One row of the long-format table.
///
/// `dim2` is null for trace records, which carry only one dimension tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongRow {
    pub path: String,
    pub annotation: String,
    pub dim1: String,
    pub dim2: Option<String>,
    pub value: String,
}

/// Build rows from a rectangular source.
///
/// `source` identifies the input file and fills the `path` column in
/// this mode; it does not represent a call path. Each cell becomes one
/// row `(source, annotations, row-key, column-key, cell-value)`.
/// Column keys and cell values are trimmed; an empty cell has no value
/// to report and is dropped, so no emitted row is fully empty.
pub fn rows_from_tabular(table: &TabularData, source: &str, annotations: &str) -> Vec<LongRow> {
    let mut rows = Vec::new();

    for row in &table.rows {
        for (column, cell) in table.columns.iter().zip(&row.cells) {
            let dim2 = column.trim();
            let value = cell.trim();
            if value.is_empty() {
                continue;
            }
            rows.push(LongRow {
                path: source.to_string(),
                annotation: annotations.to_string(),
                dim1: row.key.clone(),
                dim2: Some(dim2.to_string()),
                value: value.to_string(),
            });
        }
    }

    debug!("Built {} long rows from tabular source {}", rows.len(), source);
    rows
}

/// Build rows from trace records.
///
/// One row per non-structural attribute of each record, keyed by the
/// attribute's alias (or raw key); `dim2` is always null here.
pub fn rows_from_trace(reader: &CaliperReader) -> Vec<LongRow> {
    let mut rows = Vec::new();

    for record in reader.records() {
        let path = resolved_path(record);
        let annotation = resolved_annotation(record);

        for (alias, value) in resolve_values(record, reader) {
            let value = value.joined(ANNOTATION_SEPARATOR);
            // A degenerate entry with neither key nor value has nothing
            // to report; emitting it would produce a fully empty row.
            if alias.is_empty() && value.is_empty() {
                continue;
            }
            rows.push(LongRow {
                path: path.clone(),
                annotation: annotation.clone(),
                dim1: alias.to_string(),
                dim2: None,
                value,
            });
        }
    }

    debug!("Built {} long rows from {} trace records", rows.len(), reader.records().len());
    rows
}
