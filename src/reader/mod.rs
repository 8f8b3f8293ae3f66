//! Input readers for trace record streams and tabular metric files.
//!
//! This module handles:
//! - Parsing Caliper-style `.cali` record streams (records + attribute metadata)
//! - Reading `.csv`/`.tsv` tabular files with extension-driven separators
//! - Rejecting unsupported file extensions before any row is read

pub mod cali;
pub mod tabular;

// Re-export main types
pub use cali::{Attribute, CaliperReader, Record, RecordValue};
pub use tabular::{read_tabular, separator_for, TabularData, TabularRow};
