//! Configuration and constants for the CLI.

/// File extension for Caliper trace record streams
pub const TRACE_EXTENSION: &str = "cali";

/// Tabular extensions we know how to split, and their separators
pub const SUPPORTED_TABULAR_EXTENSIONS: &[(&str, char)] = &[("csv", ','), ("tsv", '\t')];

// Structural record keys. These describe where a sample was taken,
// not a measured value, and never become long-table value rows.
pub const PATH_KEY: &str = "path";
pub const ANNOTATION_KEY: &str = "annotation";
pub const STRUCTURAL_KEYS: &[&str] = &[PATH_KEY, ANNOTATION_KEY];

/// Placeholder when a record carries no call path
pub const UNKNOWN_PATH: &str = "UNKNOWN";

/// Joins the elements of a list-valued `path`
pub const CALL_PATH_SEPARATOR: &str = "/";

/// Joins the elements of a list-valued `annotation`
pub const ANNOTATION_SEPARATOR: &str = "|";

/// Joins frame display names in a flamegraph entry name
pub const FRAME_SEPARATOR: &str = "; ";

// Index dimension keys. A dataset that records either of these is
// addressed by (node, rank, thread) composite keys.
pub const RANK_DIMENSION: &str = "rank";
pub const THREAD_DIMENSION: &str = "thread";

/// Attribute property holding the human-readable alias
pub const ALIAS_PROPERTY: &str = "attribute.alias";

/// Record key marking a metadata record (`__rec=attr`)
pub const RECORD_KIND_KEY: &str = "__rec";

/// `__rec` value for attribute metadata records
pub const ATTRIBUTE_RECORD_KIND: &str = "attr";

/// Fixed header of the long-format table
pub const LONG_TABLE_HEADER: [&str; 5] = ["path", "annotation", "dim1", "dim2", "value"];

/// Name of the synthetic combined flamegraph root
pub const COMBINED_ROOT_NAME: &str = "root";

/// Suffix appended to the input file name for long-table output
pub const TABLE_OUTPUT_SUFFIX: &str = "transformed.csv";

/// File name of the merged flamegraph output
pub const FLAMEGRAPH_OUTPUT_FILE: &str = "combined.flamegraph.json";
