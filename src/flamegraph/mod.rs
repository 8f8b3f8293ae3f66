//! Flamegraph tree construction and multi-file aggregation.
//!
//! This module merges per-file call trees under one synthetic combined
//! root and produces the JSON-serializable tree consumed by flamegraph
//! clients.

pub mod aggregate;
pub mod tree;

// Re-export main types
pub use aggregate::{aggregate_flamegraph, expand_glob};
pub use tree::{CallTreeBuilder, FlameNode};
