//! Output writers for long tables and flamegraph trees.
//!
//! This module handles writing data to disk:
//! - Long-format tables as CSV
//! - Combined flamegraph trees as JSON

pub mod json;
pub mod table;

// Re-export main functions
pub use json::{read_flamegraph, write_flamegraph};
pub use table::{long_table_to_string, write_long_table};
