//! Call graph and its multi-indexed metric dataset.
//!
//! Every record with a `path` contributes one root-to-leaf call path;
//! path prefixes materialize as shared interior nodes. Metric values
//! live in a dataset addressed by (node, rank, thread), where the
//! active dimensions are decided once for the whole graph.

use crate::reader::cali::{CaliperReader, Record, RecordValue};
use crate::table::attributes::alias_or_key;
use crate::utils::config::{PATH_KEY, RANK_DIMENSION, STRUCTURAL_KEYS, THREAD_DIMENSION};
use crate::utils::error::GraphError;
use log::debug;
use std::collections::HashMap;

/// Index of a node within its graph's arena.
pub type NodeId = usize;

/// One node of the call graph. Read-only to consumers.
#[derive(Debug, Clone)]
pub struct GraphNode {
    /// This node's own frame name (last call-path element)
    pub frame: String,
    /// Children in first-seen order
    pub children: Vec<NodeId>,
    /// Root-to-self node sequence, self inclusive
    path: Vec<NodeId>,
}

impl GraphNode {
    /// Ancestor chain from root to self, self inclusive.
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }
}

/// Which context dimensions participate in every dataset lookup.
///
/// The shape is uniform for a whole graph: once a dimension is declared
/// anywhere in the dataset, every lookup uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexShape {
    /// Keyed by node only
    Flat,
    /// Keyed by (node, rank)
    Rank,
    /// Keyed by (node, thread)
    Thread,
    /// Keyed by (node, rank, thread)
    RankThread,
}

impl IndexShape {
    fn from_dimensions(has_rank: bool, has_thread: bool) -> Self {
        match (has_rank, has_thread) {
            (true, true) => IndexShape::RankThread,
            (true, false) => IndexShape::Rank,
            (false, true) => IndexShape::Thread,
            (false, false) => IndexShape::Flat,
        }
    }

    pub fn has_rank(self) -> bool {
        matches!(self, IndexShape::Rank | IndexShape::RankThread)
    }

    pub fn has_thread(self) -> bool {
        matches!(self, IndexShape::Thread | IndexShape::RankThread)
    }
}

/// Composite key into the metric dataset. Coordinates for dimensions
/// absent from the shape are fixed at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CellKey {
    pub node: NodeId,
    pub rank: u32,
    pub thread: u32,
}

/// One dataset cell: the node's display name plus its metric values at
/// these coordinates.
#[derive(Debug, Clone)]
pub(crate) struct Cell {
    pub name: String,
    pub metrics: HashMap<String, f64>,
}

/// A rooted call graph with its metric dataset.
#[derive(Debug, Default)]
pub struct CallGraph {
    nodes: Vec<GraphNode>,
    roots: Vec<NodeId>,
    shape: IndexShape,
    cells: HashMap<CellKey, Cell>,
    /// Metric names in first-seen stream order
    metric_names: Vec<String>,
}

impl Default for IndexShape {
    fn default() -> Self {
        IndexShape::Flat
    }
}

impl CallGraph {
    /// Derive a call graph from a parsed record stream.
    pub fn from_reader(reader: &CaliperReader) -> Result<Self, GraphError> {
        // The index shape is decided once, from the whole dataset.
        let has_rank = reader
            .records()
            .iter()
            .any(|record| record.get(RANK_DIMENSION).is_some());
        let has_thread = reader
            .records()
            .iter()
            .any(|record| record.get(THREAD_DIMENSION).is_some());

        let mut graph = CallGraph {
            shape: IndexShape::from_dimensions(has_rank, has_thread),
            ..CallGraph::default()
        };

        for record in reader.records() {
            let Some(path_value) = record.get(PATH_KEY) else {
                // Records without a path carry no call-graph position.
                continue;
            };
            let frames = match path_value {
                RecordValue::Scalar(frame) => vec![frame.clone()],
                RecordValue::List(frames) => frames.clone(),
            };

            let rank = dimension_coordinate(record, RANK_DIMENSION)?;
            let thread = dimension_coordinate(record, THREAD_DIMENSION)?;
            graph.insert_path(&frames, rank, thread, record, reader);
        }

        debug!(
            "Derived call graph: {} nodes, {} roots, shape {:?}",
            graph.nodes.len(),
            graph.roots.len(),
            graph.shape
        );
        Ok(graph)
    }

    /// Walk a record's call path, materializing missing nodes and
    /// updating the dataset cell at the record's coordinates.
    fn insert_path(
        &mut self,
        frames: &[String],
        rank: u32,
        thread: u32,
        record: &Record,
        reader: &CaliperReader,
    ) {
        let mut parent: Option<NodeId> = None;

        for frame in frames {
            let node = self.find_or_add_child(parent, frame);

            // Interior nodes touched only as ancestors still need a cell
            // at these coordinates so name resolution along the path works.
            self.cells
                .entry(CellKey { node, rank, thread })
                .or_insert_with(|| Cell {
                    name: frame.clone(),
                    metrics: HashMap::new(),
                });

            parent = Some(node);
        }

        // The leaf cell receives the record's metric values.
        let Some(leaf) = parent else { return };
        let key = CellKey {
            node: leaf,
            rank,
            thread,
        };
        for (raw_key, value) in record.iter() {
            if STRUCTURAL_KEYS.contains(&raw_key)
                || raw_key == RANK_DIMENSION
                || raw_key == THREAD_DIMENSION
            {
                continue;
            }
            let Some(number) = value.as_scalar().and_then(|s| s.parse::<f64>().ok()) else {
                // Non-numeric attributes are labels, not metrics.
                continue;
            };
            let metric = alias_or_key(reader, raw_key).to_string();
            if !self.metric_names.contains(&metric) {
                self.metric_names.push(metric.clone());
            }
            if let Some(cell) = self.cells.get_mut(&key) {
                cell.metrics.insert(metric, number);
            }
        }
    }

    fn find_or_add_child(&mut self, parent: Option<NodeId>, frame: &str) -> NodeId {
        let siblings = match parent {
            Some(parent) => &self.nodes[parent].children,
            None => &self.roots,
        };
        if let Some(&existing) = siblings
            .iter()
            .find(|&&id| self.nodes[id].frame == frame)
        {
            return existing;
        }

        let id = self.nodes.len();
        let mut path = match parent {
            Some(parent) => self.nodes[parent].path.clone(),
            None => Vec::new(),
        };
        path.push(id);
        self.nodes.push(GraphNode {
            frame: frame.to_string(),
            children: Vec::new(),
            path,
        });
        match parent {
            Some(parent) => self.nodes[parent].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id]
    }

    /// Declared roots in first-seen order. A graph may have several.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn shape(&self) -> IndexShape {
        self.shape
    }

    /// The graph's own declared default metric: the first metric
    /// attribute observed in the stream.
    pub fn default_metric(&self) -> Option<&str> {
        self.metric_names.first().map(String::as_str)
    }

    pub(crate) fn cell(&self, key: &CellKey) -> Option<&Cell> {
        self.cells.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Parse a record's coordinate for one dimension; absent means slice 0.
fn dimension_coordinate(record: &Record, dimension: &str) -> Result<u32, GraphError> {
    let Some(value) = record.get(dimension) else {
        return Ok(0);
    };
    value
        .as_scalar()
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| GraphError::InvalidDimension {
            dimension: dimension.to_string(),
            value: value.joined(","),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn graph_from(stream: &str) -> CallGraph {
        let reader = CaliperReader::parse(stream).unwrap();
        CallGraph::from_reader(&reader).unwrap()
    }

    #[test]
    fn test_paths_share_prefixes() {
        let graph = graph_from(
            "path=main,time=1\n\
             path=main,path=compute,time=2\n\
             path=main,path=io,time=3\n",
        );
        assert_eq!(graph.roots().len(), 1);
        let root = graph.node(graph.roots()[0]);
        assert_eq!(root.frame, "main");
        assert_eq!(root.children.len(), 2);
        assert_eq!(graph.node(root.children[0]).frame, "compute");
        assert_eq!(graph.node(root.children[1]).frame, "io");
    }

    #[test]
    fn test_node_path_is_root_to_self() {
        let graph = graph_from("path=a,path=b,path=c,time=1\n");
        let a = graph.roots()[0];
        let b = graph.node(a).children[0];
        let c = graph.node(b).children[0];
        assert_eq!(graph.node(c).path(), &[a, b, c]);
    }

    #[test]
    fn test_multiple_roots_in_first_seen_order() {
        let graph = graph_from("path=beta,time=1\npath=alpha,time=2\n");
        let frames: Vec<_> = graph
            .roots()
            .iter()
            .map(|&id| graph.node(id).frame.as_str())
            .collect();
        assert_eq!(frames, vec!["beta", "alpha"]);
    }

    #[test]
    fn test_shape_from_dimensions() {
        assert_eq!(graph_from("path=a,time=1\n").shape(), IndexShape::Flat);
        assert_eq!(
            graph_from("path=a,rank=0,time=1\n").shape(),
            IndexShape::Rank
        );
        assert_eq!(
            graph_from("path=a,thread=0,time=1\n").shape(),
            IndexShape::Thread
        );
        assert_eq!(
            graph_from("path=a,rank=0,thread=0,time=1\n").shape(),
            IndexShape::RankThread
        );
    }

    #[test]
    fn test_default_metric_is_first_seen() {
        let graph = graph_from("path=a,bytes=9,time=1\n");
        assert_eq!(graph.default_metric(), Some("bytes"));
    }

    #[test]
    fn test_default_metric_uses_alias() {
        let graph = graph_from(
            "__rec=attr,name=sum#time.duration,attribute.alias=time\n\
             path=a,sum#time.duration=4\n",
        );
        assert_eq!(graph.default_metric(), Some("time"));
    }

    #[test]
    fn test_non_numeric_values_are_not_metrics() {
        let graph = graph_from("path=a,function=foo,time=1\n");
        assert_eq!(graph.default_metric(), Some("time"));
    }

    #[test]
    fn test_invalid_rank_is_fatal() {
        let reader = CaliperReader::parse("path=a,rank=first,time=1\n").unwrap();
        let result = CallGraph::from_reader(&reader);
        assert!(matches!(
            result,
            Err(GraphError::InvalidDimension { dimension, .. }) if dimension == "rank"
        ));
    }

    #[test]
    fn test_records_without_path_skipped() {
        let graph = graph_from("elapsed=12\npath=a,time=1\n");
        assert_eq!(graph.roots().len(), 1);
    }
}
