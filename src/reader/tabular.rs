//! Reader for rectangular `.csv`/`.tsv` metric tables.
//!
//! The column separator is chosen strictly by file extension; anything
//! else is rejected before a single row is read. The first header cell
//! labels the row-key column, the remaining cells name the data columns.

use crate::utils::config::SUPPORTED_TABULAR_EXTENSIONS;
use crate::utils::error::ReadError;
use log::debug;
use std::fs;
use std::path::Path;

/// A parsed rectangular table.
#[derive(Debug, Clone, Default)]
pub struct TabularData {
    /// Data column names (header cells after the row-key column)
    pub columns: Vec<String>,
    /// Data rows in file order
    pub rows: Vec<TabularRow>,
}

/// One data row: the row key plus one cell per data column.
#[derive(Debug, Clone)]
pub struct TabularRow {
    pub key: String,
    pub cells: Vec<String>,
}

/// Pick the separator for a file by its extension.
///
/// Fatal for anything other than the supported tabular extensions; this
/// runs before the file is opened so no partial output can exist.
pub fn separator_for(path: &Path) -> Result<char, ReadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();

    SUPPORTED_TABULAR_EXTENSIONS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, separator)| *separator)
        .ok_or(ReadError::UnsupportedExtension(extension))
}

/// Read a tabular file, discarding `skip_rows` leading lines before the
/// header.
pub fn read_tabular(path: &Path, skip_rows: usize) -> Result<TabularData, ReadError> {
    let separator = separator_for(path)?;
    debug!(
        "Reading tabular file {} (separator {:?}, skipping {} rows)",
        path.display(),
        separator,
        skip_rows
    );
    let content = fs::read_to_string(path)?;
    Ok(parse_tabular(&content, separator, skip_rows))
}

/// Parse tabular content from memory.
pub fn parse_tabular(content: &str, separator: char, skip_rows: usize) -> TabularData {
    let mut lines = content.lines().skip(skip_rows);

    let Some(header) = lines.next() else {
        return TabularData::default();
    };

    let mut header_fields = split_fields(header, separator);
    // The first header cell labels the row-key column, not a data column.
    if !header_fields.is_empty() {
        header_fields.remove(0);
    }
    let columns = header_fields;

    let mut rows = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = split_fields(line, separator);
        let key = if fields.is_empty() {
            String::new()
        } else {
            fields.remove(0)
        };
        // Short rows read as empty cells for the missing columns.
        fields.resize(columns.len(), String::new());
        rows.push(TabularRow { key, cells: fields });
    }

    TabularData { columns, rows }
}

/// Split one line on `separator`, honoring double-quoted fields with
/// `""` escapes.
fn split_fields(line: &str, separator: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' && current.is_empty() {
            in_quotes = true;
        } else if c == separator {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_separator_for_known_extensions() {
        assert_eq!(separator_for(Path::new("a.csv")).unwrap(), ',');
        assert_eq!(separator_for(Path::new("a.tsv")).unwrap(), '\t');
        assert_eq!(separator_for(Path::new("A.CSV")).unwrap(), ',');
    }

    #[test]
    fn test_separator_for_unknown_extension_fails() {
        let result = separator_for(Path::new("a.xlsx"));
        assert!(matches!(
            result,
            Err(ReadError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn test_parse_basic_csv() {
        let table = parse_tabular("metric,a,b\nm1,1,2\nm2,,4\n", ',', 0);
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].key, "m1");
        assert_eq!(table.rows[0].cells, vec!["1", "2"]);
        assert_eq!(table.rows[1].cells, vec!["", "4"]);
    }

    #[test]
    fn test_skip_rows_discards_leading_lines() {
        let table = parse_tabular("junk\nmore junk\nmetric,a\nm1,7\n", ',', 2);
        assert_eq!(table.columns, vec!["a"]);
        assert_eq!(table.rows[0].cells, vec!["7"]);
    }

    #[test]
    fn test_quoted_fields() {
        let table = parse_tabular("metric,a\nm1,\"1,5\"\nm2,\"say \"\"hi\"\"\"\n", ',', 0);
        assert_eq!(table.rows[0].cells, vec!["1,5"]);
        assert_eq!(table.rows[1].cells, vec!["say \"hi\""]);
    }

    #[test]
    fn test_short_rows_padded() {
        let table = parse_tabular("metric,a,b\nm1,1\n", ',', 0);
        assert_eq!(table.rows[0].cells, vec!["1", ""]);
    }

    #[test]
    fn test_empty_content() {
        let table = parse_tabular("", ',', 0);
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
    }
}
