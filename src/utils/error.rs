//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading trace or tabular input files
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Extension .{0} is not yet supported! Please open an issue.")]
    UnsupportedExtension(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Errors that can occur while deriving a call graph from trace records
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Invalid {dimension} value {value:?}: expected an unsigned integer")]
    InvalidDimension { dimension: String, value: String },
}

/// Errors that can occur during multi-index metric lookups.
///
/// These are fatal: a lookup miss aborts the extraction for the whole
/// file rather than substituting a default slice.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Dataset has no {dimension} dimension but {dimension}={requested} was requested")]
    MissingDimension {
        dimension: &'static str,
        requested: u32,
    },

    #[error("No entry for node {node:?} at rank {rank}, thread {thread}")]
    MissingEntry {
        node: String,
        rank: u32,
        thread: u32,
    },

    #[error("Metric {metric:?} not recorded for node {node:?} at rank {rank}, thread {thread}")]
    MissingMetric {
        metric: String,
        node: String,
        rank: u32,
        thread: u32,
    },
}

/// Errors that can occur during multi-file flamegraph aggregation
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Invalid glob pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: globset::Error,
    },

    #[error("Failed to walk files: {0}")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Trace file {file:?} declares no metric; pass an explicit metric name")]
    NoDefaultMetric { file: PathBuf },

    #[error("Lookup failed in {file:?}: {source}")]
    Lookup { file: PathBuf, source: LookupError },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
