//! Reader for Caliper-style trace record streams.
//!
//! A `.cali` stream is line oriented. Each line holds one record as
//! comma-separated `key=value` entries; `\,`, `\=` and `\\` escape the
//! separator characters. Repeated keys within one record accumulate into
//! an ordered list, which is how a `path` entry carries a root-to-leaf
//! call stack. Lines starting with `__rec=attr` declare attribute
//! metadata (a property map per attribute key) instead of sample data.
//!
//! The reader exposes the parsed stream as a flat record sequence plus an
//! attribute store; call-graph derivation lives in `crate::graph`.

use crate::utils::config::{ALIAS_PROPERTY, ATTRIBUTE_RECORD_KIND, RECORD_KIND_KEY};
use crate::utils::error::ReadError;
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A single attribute value: a scalar, or an ordered list built from
/// repeated keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValue {
    Scalar(String),
    List(Vec<String>),
}

impl RecordValue {
    /// Flatten to one string, joining list elements with `separator`.
    pub fn joined(&self, separator: &str) -> String {
        match self {
            RecordValue::Scalar(s) => s.clone(),
            RecordValue::List(items) => items.join(separator),
        }
    }

    /// The scalar form, if this value is not a list.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            RecordValue::Scalar(s) => Some(s),
            RecordValue::List(_) => None,
        }
    }
}

/// One data record: an ordered mapping of attribute key to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<(String, RecordValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for `key`. A repeated key promotes the existing
    /// scalar to a list and preserves element order.
    pub fn push(&mut self, key: &str, value: String) {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| k == key) {
            match existing {
                RecordValue::Scalar(first) => {
                    *existing = RecordValue::List(vec![std::mem::take(first), value]);
                }
                RecordValue::List(items) => items.push(value),
            }
        } else {
            self.entries.push((key.to_string(), RecordValue::Scalar(value)));
        }
    }

    pub fn get(&self, key: &str) -> Option<&RecordValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Key/value pairs in their natural (insertion) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecordValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Metadata for one attribute key (a free-form property map).
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    properties: HashMap<String, String>,
}

impl Attribute {
    /// Human-readable alias, if one was declared.
    pub fn alias(&self) -> Option<&str> {
        self.property(ALIAS_PROPERTY)
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

/// Parsed view of one trace file: data records plus attribute metadata.
#[derive(Debug, Default)]
pub struct CaliperReader {
    records: Vec<Record>,
    attributes: HashMap<String, Attribute>,
}

impl CaliperReader {
    /// Read and parse a trace file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        let path = path.as_ref();
        debug!("Reading trace records from: {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a record stream from memory.
    pub fn parse(content: &str) -> Result<Self, ReadError> {
        let mut reader = Self::default();

        for (index, line) in content.lines().enumerate() {
            let line_number = index + 1;
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }

            let entries = split_entries(line, line_number)?;
            if is_attribute_record(&entries) {
                let attribute = parse_attribute(&entries, line_number)?;
                reader.attributes.insert(attribute.name.clone(), attribute);
            } else {
                let mut record = Record::new();
                for (key, value) in entries {
                    record.push(&key, value);
                }
                if !record.is_empty() {
                    reader.records.push(record);
                }
            }
        }

        debug!(
            "Parsed {} records and {} attribute declarations",
            reader.records.len(),
            reader.attributes.len()
        );
        Ok(reader)
    }

    /// Data records in stream order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Metadata for `key`, if the stream declared any.
    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.get(key)
    }
}

/// Split one line into (key, value) entries, honoring backslash escapes.
///
/// Entries are comma separated; the first unescaped `=` in an entry splits
/// key from value, later `=` characters belong to the value.
fn split_entries(line: &str, line_number: usize) -> Result<Vec<(String, String)>, ReadError> {
    let mut entries = Vec::new();
    let mut key = String::new();
    let mut value = String::new();
    let mut in_value = false;

    let mut finish =
        |key: &mut String, value: &mut String, in_value: &mut bool| -> Result<(), ReadError> {
            if !*in_value {
                return Err(ReadError::Malformed {
                    line: line_number,
                    reason: format!("entry {:?} has no '='", key),
                });
            }
            entries.push((std::mem::take(key), std::mem::take(value)));
            *in_value = false;
            Ok(())
        };

    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let escaped = chars.next().ok_or_else(|| ReadError::Malformed {
                    line: line_number,
                    reason: "line ends with a dangling escape".to_string(),
                })?;
                if in_value {
                    value.push(escaped);
                } else {
                    key.push(escaped);
                }
            }
            '=' if !in_value => in_value = true,
            ',' => finish(&mut key, &mut value, &mut in_value)?,
            _ if in_value => value.push(c),
            _ => key.push(c),
        }
    }

    if !key.is_empty() || in_value {
        finish(&mut key, &mut value, &mut in_value)?;
    }

    Ok(entries)
}

fn is_attribute_record(entries: &[(String, String)]) -> bool {
    entries
        .first()
        .is_some_and(|(key, value)| key == RECORD_KIND_KEY && value == ATTRIBUTE_RECORD_KIND)
}

fn parse_attribute(
    entries: &[(String, String)],
    line_number: usize,
) -> Result<Attribute, ReadError> {
    let mut name = None;
    let mut properties = HashMap::new();

    for (key, value) in &entries[1..] {
        if key == "name" {
            name = Some(value.clone());
        } else {
            properties.insert(key.clone(), value.clone());
        }
    }

    let name = name.ok_or_else(|| ReadError::Malformed {
        line: line_number,
        reason: "attribute record has no name entry".to_string(),
    })?;

    Ok(Attribute { name, properties })
}
