//! Attribute resolution for trace records.
//!
//! Two quirks of the record format are isolated here: `path` and
//! `annotation` are structural fields that must never appear as value
//! rows, and both may be list-valued, in which case they flatten to one
//! canonical delimited string.

use crate::reader::cali::{CaliperReader, Record, RecordValue};
use crate::utils::config::{
    ANNOTATION_KEY, ANNOTATION_SEPARATOR, CALL_PATH_SEPARATOR, PATH_KEY, STRUCTURAL_KEYS,
    UNKNOWN_PATH,
};

/// Look up the human-readable alias for an attribute key, falling back
/// to the raw key when none is registered.
pub fn alias_or_key<'a>(reader: &'a CaliperReader, key: &'a str) -> &'a str {
    reader
        .attribute(key)
        .and_then(|attribute| attribute.alias())
        .unwrap_or(key)
}

/// Resolve a record's non-structural entries to (alias, value) pairs in
/// the record's natural order.
pub fn resolve_values<'r>(
    record: &'r Record,
    reader: &'r CaliperReader,
) -> impl Iterator<Item = (&'r str, &'r RecordValue)> {
    record
        .iter()
        .filter(|(key, _)| !STRUCTURAL_KEYS.contains(key))
        .map(|(key, value)| (alias_or_key(reader, key), value))
}

/// The record's call path as one delimited string, or `UNKNOWN` when
/// the record carries none.
pub fn resolved_path(record: &Record) -> String {
    record
        .get(PATH_KEY)
        .map(|value| value.joined(CALL_PATH_SEPARATOR))
        .unwrap_or_else(|| UNKNOWN_PATH.to_string())
}

/// The record's annotation labels as one pipe-delimited string, or
/// empty when the record carries none.
pub fn resolved_annotation(record: &Record) -> String {
    record
        .get(ANNOTATION_KEY)
        .map(|value| value.joined(ANNOTATION_SEPARATOR))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reader_with_alias() -> CaliperReader {
        CaliperReader::parse(
            "__rec=attr,name=sum#time.duration,attribute.alias=time\n\
             path=f,path=g,annotation=x,sum#time.duration=5\n",
        )
        .unwrap()
    }

    #[test]
    fn test_alias_lookup_and_fallback() {
        let reader = reader_with_alias();
        assert_eq!(alias_or_key(&reader, "sum#time.duration"), "time");
        assert_eq!(alias_or_key(&reader, "no.such.key"), "no.such.key");
    }

    #[test]
    fn test_structural_keys_excluded() {
        let reader = reader_with_alias();
        let record = &reader.records()[0];
        let resolved: Vec<_> = resolve_values(record, &reader).collect();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].0, "time");
    }

    #[test]
    fn test_path_list_joined() {
        let reader = reader_with_alias();
        assert_eq!(resolved_path(&reader.records()[0]), "f/g");
    }

    #[test]
    fn test_missing_path_and_annotation_defaults() {
        let reader = CaliperReader::parse("time=1\n").unwrap();
        let record = &reader.records()[0];
        assert_eq!(resolved_path(record), "UNKNOWN");
        assert_eq!(resolved_annotation(record), "");
    }

    #[test]
    fn test_annotation_list_joined_with_pipe() {
        let reader = CaliperReader::parse("annotation=x,annotation=y,time=1\n").unwrap();
        assert_eq!(resolved_annotation(&reader.records()[0]), "x|y");
    }
}
