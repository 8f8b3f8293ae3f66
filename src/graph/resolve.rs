//! Resolve a node's display name and metric value along its call path.
//!
//! Every lookup goes through the graph's index shape: once a dimension
//! is declared, it participates in every lookup, and a combination
//! absent from the dataset is a fatal lookup error rather than a
//! silent default.

use super::model::{CallGraph, CellKey, NodeId};
use crate::utils::config::FRAME_SEPARATOR;
use crate::utils::error::LookupError;

/// Request-scoped selection of which scalar to extract from the
/// multi-indexed dataset.
#[derive(Debug, Clone)]
pub struct MetricSelector {
    pub metric: String,
    pub rank: u32,
    pub thread: u32,
}

impl MetricSelector {
    /// Select `metric` at the default slice (rank 0, thread 0).
    pub fn new(metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            rank: 0,
            thread: 0,
        }
    }

    pub fn with_slice(metric: impl Into<String>, rank: u32, thread: u32) -> Self {
        Self {
            metric: metric.into(),
            rank,
            thread,
        }
    }
}

/// Resolve a node's flamegraph entry: its display name built from the
/// full ancestor chain, and its value for the selected metric.
///
/// The name concatenates every ancestor's display name from the root to
/// the immediate parent, then the node's own, each followed by `"; "`.
pub fn resolve_name_and_value(
    graph: &CallGraph,
    node: NodeId,
    selector: &MetricSelector,
) -> Result<(String, f64), LookupError> {
    let path = graph.node(node).path();

    let mut name = String::new();
    for &ancestor in &path[..path.len() - 1] {
        name.push_str(lookup_name(graph, ancestor, selector)?);
        name.push_str(FRAME_SEPARATOR);
    }
    name.push_str(lookup_name(graph, node, selector)?);
    name.push_str(FRAME_SEPARATOR);

    let value = lookup_metric(graph, node, selector)?;
    Ok((name, value))
}

/// Display name of one node at the selected slice.
fn lookup_name<'g>(
    graph: &'g CallGraph,
    node: NodeId,
    selector: &MetricSelector,
) -> Result<&'g str, LookupError> {
    Ok(&cell_for(graph, node, selector)?.name)
}

/// Metric value of one node at the selected slice.
fn lookup_metric(
    graph: &CallGraph,
    node: NodeId,
    selector: &MetricSelector,
) -> Result<f64, LookupError> {
    let cell = cell_for(graph, node, selector)?;
    cell.metrics
        .get(&selector.metric)
        .copied()
        .ok_or_else(|| LookupError::MissingMetric {
            metric: selector.metric.clone(),
            node: graph.node(node).frame.clone(),
            rank: selector.rank,
            thread: selector.thread,
        })
}

/// Fetch the dataset cell for a node under the graph's index shape.
///
/// Requesting a non-zero coordinate for a dimension the dataset never
/// declared is an error, not a fallback to the flat index.
fn cell_for<'g>(
    graph: &'g CallGraph,
    node: NodeId,
    selector: &MetricSelector,
) -> Result<&'g super::model::Cell, LookupError> {
    let shape = graph.shape();

    if !shape.has_rank() && selector.rank != 0 {
        return Err(LookupError::MissingDimension {
            dimension: "rank",
            requested: selector.rank,
        });
    }
    if !shape.has_thread() && selector.thread != 0 {
        return Err(LookupError::MissingDimension {
            dimension: "thread",
            requested: selector.thread,
        });
    }

    let key = CellKey {
        node,
        rank: if shape.has_rank() { selector.rank } else { 0 },
        thread: if shape.has_thread() { selector.thread } else { 0 },
    };
    graph.cell(&key).ok_or_else(|| LookupError::MissingEntry {
        node: graph.node(node).frame.clone(),
        rank: selector.rank,
        thread: selector.thread,
    })
}
