//! Call-graph model and multi-index metric resolution.
//!
//! This module handles:
//! - Deriving a rooted call graph from a trace record stream
//! - The multi-index dataset addressed by (node, rank, thread)
//! - Resolving node display names and metric values along call paths

pub mod model;
pub mod resolve;

// Re-export main types
pub use model::{CallGraph, GraphNode, IndexShape, NodeId};
pub use resolve::{resolve_name_and_value, MetricSelector};
