//! Long-format table construction.
//!
//! This module transforms parsed input into the fixed five-column
//! long-table shape:
//! - Attribute resolution (aliases, structural path/annotation fields)
//! - Row building from trace records and from tabular sources

pub mod attributes;
pub mod long;

// Re-export main types and functions
pub use attributes::{alias_or_key, resolve_values, resolved_annotation, resolved_path};
pub use long::{rows_from_tabular, rows_from_trace, LongRow};
