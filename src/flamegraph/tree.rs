//! Breadth-first construction of the combined flamegraph tree.
//!
//! Traversal uses an explicit FIFO queue rather than recursion, so deep
//! call paths cannot overflow the stack and sibling order is a stated
//! contract instead of an accident. The design assumes the source call
//! graph has no shared or re-entrant children; a DAG with sharing would
//! duplicate work.

use crate::graph::model::{CallGraph, NodeId};
use crate::graph::resolve::{resolve_name_and_value, MetricSelector};
use crate::utils::config::COMBINED_ROOT_NAME;
use crate::utils::error::LookupError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A node of the serialized flamegraph tree.
///
/// Leaf and branch are distinct variants so internal logic never
/// confuses "no children" with "children not yet computed"; only at
/// serialization time does a leaf become "the children key is absent".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlameNode {
    Branch {
        name: String,
        value: f64,
        children: Vec<FlameNode>,
    },
    Leaf {
        name: String,
        value: f64,
    },
}

impl FlameNode {
    pub fn name(&self) -> &str {
        match self {
            FlameNode::Branch { name, .. } | FlameNode::Leaf { name, .. } => name,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            FlameNode::Branch { value, .. } | FlameNode::Leaf { value, .. } => *value,
        }
    }

    /// Children, or None for a leaf.
    pub fn children(&self) -> Option<&[FlameNode]> {
        match self {
            FlameNode::Branch { children, .. } => Some(children),
            FlameNode::Leaf { .. } => None,
        }
    }
}

/// Node under construction; children are arena indices until `finish`.
#[derive(Debug)]
struct PendingNode {
    name: String,
    value: f64,
    children: Vec<usize>,
}

/// Builds one combined tree across repeated `add_graph` calls.
///
/// Every call mutates the same shared combined root, so trees from
/// multiple trace files merge as siblings beneath it.
#[derive(Debug)]
pub struct CallTreeBuilder {
    arena: Vec<PendingNode>,
}

impl CallTreeBuilder {
    /// Start a fresh combined root.
    pub fn new() -> Self {
        Self {
            arena: vec![PendingNode {
                name: COMBINED_ROOT_NAME.to_string(),
                value: 0.0,
                children: Vec::new(),
            }],
        }
    }

    /// Fold one call graph into the combined tree.
    ///
    /// Each declared root of the graph attaches as a direct child of the
    /// combined root; descendants are visited breadth-first in sibling
    /// order. A lookup failure aborts with the tree in an unusable state.
    pub fn add_graph(
        &mut self,
        graph: &CallGraph,
        selector: &MetricSelector,
    ) -> Result<(), LookupError> {
        let mut queue: VecDeque<(NodeId, usize)> =
            graph.roots().iter().map(|&root| (root, 0)).collect();

        while let Some((node, parent)) = queue.pop_front() {
            let (name, value) = resolve_name_and_value(graph, node, selector)?;

            let index = self.arena.len();
            self.arena.push(PendingNode {
                name,
                value,
                children: Vec::new(),
            });
            self.arena[parent].children.push(index);

            for &child in &graph.node(node).children {
                queue.push_back((child, index));
            }
        }

        debug!(
            "Merged graph into combined tree ({} nodes total)",
            self.arena.len() - 1
        );
        Ok(())
    }

    /// Materialize the combined tree.
    ///
    /// The combined root's value is the sum of its direct children's
    /// values only, not a recursive subtree sum.
    pub fn finish(self) -> FlameNode {
        let root = &self.arena[0];
        let value: f64 = root
            .children
            .iter()
            .map(|&child| self.arena[child].value)
            .sum();
        let children = root
            .children
            .iter()
            .map(|&child| materialize(&self.arena, child))
            .collect();

        // The combined root always carries a children list, even when
        // no file contributed anything.
        FlameNode::Branch {
            name: root.name.clone(),
            value,
            children,
        }
    }
}

impl Default for CallTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn materialize(arena: &[PendingNode], index: usize) -> FlameNode {
    let node = &arena[index];
    if node.children.is_empty() {
        FlameNode::Leaf {
            name: node.name.clone(),
            value: node.value,
        }
    } else {
        FlameNode::Branch {
            name: node.name.clone(),
            value: node.value,
            children: node
                .children
                .iter()
                .map(|&child| materialize(arena, child))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::cali::CaliperReader;
    use pretty_assertions::assert_eq;

    fn graph_from(stream: &str) -> CallGraph {
        let reader = CaliperReader::parse(stream).unwrap();
        CallGraph::from_reader(&reader).unwrap()
    }

    #[test]
    fn test_single_childless_root() {
        let graph = graph_from("path=main,time=3\n");
        let mut builder = CallTreeBuilder::new();
        builder
            .add_graph(&graph, &MetricSelector::new("time"))
            .unwrap();
        let tree = builder.finish();

        assert_eq!(tree.name(), "root");
        assert_eq!(tree.value(), 3.0);
        let children = tree.children().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name(), "main; ");
        assert_eq!(children[0].value(), 3.0);
        // The sole child is childless: no children key at all.
        assert!(children[0].children().is_none());
    }

    #[test]
    fn test_sibling_order_preserved() {
        let graph = graph_from(
            "path=main,time=1\n\
             path=main,path=first,time=2\n\
             path=main,path=second,time=3\n",
        );
        let mut builder = CallTreeBuilder::new();
        builder
            .add_graph(&graph, &MetricSelector::new("time"))
            .unwrap();
        let tree = builder.finish();

        let main = &tree.children().unwrap()[0];
        let names: Vec<_> = main
            .children()
            .unwrap()
            .iter()
            .map(FlameNode::name)
            .collect();
        assert_eq!(names, vec!["main; first; ", "main; second; "]);
    }

    #[test]
    fn test_repeated_graphs_merge_as_siblings() {
        let first = graph_from("path=a,time=3\n");
        let second = graph_from("path=b,time=7\n");
        let mut builder = CallTreeBuilder::new();
        let selector = MetricSelector::new("time");
        builder.add_graph(&first, &selector).unwrap();
        builder.add_graph(&second, &selector).unwrap();
        let tree = builder.finish();

        assert_eq!(tree.children().unwrap().len(), 2);
        assert_eq!(tree.value(), 10.0);
    }

    #[test]
    fn test_root_value_is_shallow_sum() {
        // Child values are not cumulative here: the root sums only its
        // direct children, never the whole subtree.
        let graph = graph_from(
            "path=main,time=5\n\
             path=main,path=inner,time=100\n",
        );
        let mut builder = CallTreeBuilder::new();
        builder
            .add_graph(&graph, &MetricSelector::new("time"))
            .unwrap();
        let tree = builder.finish();
        assert_eq!(tree.value(), 5.0);
    }

    #[test]
    fn test_empty_builder_yields_bare_root() {
        let tree = CallTreeBuilder::new().finish();
        assert_eq!(tree.name(), "root");
        assert_eq!(tree.value(), 0.0);
        assert_eq!(tree.children().unwrap().len(), 0);
    }

    #[test]
    fn test_leaf_omits_children_in_json() {
        let graph = graph_from("path=main,time=3\n");
        let mut builder = CallTreeBuilder::new();
        builder
            .add_graph(&graph, &MetricSelector::new("time"))
            .unwrap();
        let json = serde_json::to_value(builder.finish()).unwrap();

        assert_eq!(json["name"], "root");
        assert!(json.get("children").is_some());
        let child = &json["children"][0];
        assert_eq!(child["name"], "main; ");
        assert!(child.get("children").is_none());
    }

    #[test]
    fn test_json_round_trip_is_isomorphic() {
        let graph = graph_from(
            "path=main,time=1\n\
             path=main,path=compute,time=2\n\
             path=main,path=io,time=3\n",
        );
        let mut builder = CallTreeBuilder::new();
        builder
            .add_graph(&graph, &MetricSelector::new("time"))
            .unwrap();
        let tree = builder.finish();

        let json = serde_json::to_string(&tree).unwrap();
        let parsed: FlameNode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tree);
    }
}
