//! Workflow graph implementation using petgraph.
//!
//! Nodes are workflow steps, edges define traversal order. The graph is
//! immutable for the duration of one run; the platform re-serializes and
//! re-parses it per invocation.

use crate::edge::Edge;
use crate::error::GraphError;
use crate::node::{Node, NodeId};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A workflow graph using petgraph's directed graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowGraph {
    /// The underlying directed graph.
    #[serde(with = "graph_serde")]
    graph: DiGraph<Node, Edge>,
    /// Map from NodeId to petgraph's NodeIndex for O(1) lookup.
    #[serde(skip)]
    node_index_map: HashMap<NodeId, NodeIndex>,
}

impl FlowGraph {
    /// Creates a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_index_map: HashMap::new(),
        }
    }

    /// Adds a node to the graph.
    ///
    /// # Errors
    ///
    /// Returns an error if a node with the same id already exists.
    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.node_index_map.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode { node_id: node.id });
        }
        let node_id = node.id.clone();
        let index = self.graph.add_node(node);
        self.node_index_map.insert(node_id, index);
        Ok(())
    }

    /// Adds an edge between two nodes.
    ///
    /// Insertion order is significant: traversal follows outgoing edges in
    /// the order they were added.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint does not exist.
    pub fn add_edge(
        &mut self,
        source_id: &NodeId,
        target_id: &NodeId,
        edge: Edge,
    ) -> Result<(), GraphError> {
        let source_index = self.node_index_map.get(source_id).ok_or_else(|| {
            GraphError::NodeNotFound {
                node_id: source_id.clone(),
            }
        })?;
        let target_index = self.node_index_map.get(target_id).ok_or_else(|| {
            GraphError::NodeNotFound {
                node_id: target_id.clone(),
            }
        })?;
        self.graph.add_edge(*source_index, *target_index, edge);
        Ok(())
    }

    /// Returns a reference to a node by its id.
    #[must_use]
    pub fn get_node(&self, node_id: &NodeId) -> Option<&Node> {
        let index = self.node_index_map.get(node_id)?;
        self.graph.node_weight(*index)
    }

    /// Returns all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Returns the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns nodes with no incoming edges, in node-list order.
    ///
    /// Traversal starts at the first of these; a graph with none is cyclic
    /// and cannot run.
    pub fn entry_nodes(&self) -> Vec<&Node> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .edges_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .filter_map(|idx| self.graph.node_weight(idx))
            .collect()
    }

    /// Returns the successors of a node, in edge insertion order.
    pub fn successors(&self, node_id: &NodeId) -> Vec<(&Node, &Edge)> {
        let Some(&index) = self.node_index_map.get(node_id) else {
            return Vec::new();
        };

        // petgraph iterates outgoing edges newest-first; reverse to get
        // edge-list order.
        let mut successors: Vec<(&Node, &Edge)> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .filter_map(|edge| {
                let target = self.graph.node_weight(edge.target())?;
                Some((target, edge.weight()))
            })
            .collect();
        successors.reverse();
        successors
    }

    /// Rebuilds the node index map after deserialization.
    pub fn rebuild_index_map(&mut self) {
        self.node_index_map.clear();
        for index in self.graph.node_indices() {
            if let Some(node) = self.graph.node_weight(index) {
                self.node_index_map.insert(node.id.clone(), index);
            }
        }
    }
}

impl Default for FlowGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Custom serde for petgraph DiGraph.
mod graph_serde {
    use super::*;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeStruct;

    pub fn serialize<S>(graph: &DiGraph<Node, Edge>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let nodes: Vec<_> = graph.node_weights().cloned().collect();
        let edges: Vec<_> = graph
            .edge_references()
            .map(|e| {
                let source_id = graph.node_weight(e.source()).map(|n| n.id.clone());
                let target_id = graph.node_weight(e.target()).map(|n| n.id.clone());
                (source_id, target_id, e.weight().clone())
            })
            .collect();

        let mut state = serializer.serialize_struct("Graph", 2)?;
        state.serialize_field("nodes", &nodes)?;
        state.serialize_field("edges", &edges)?;
        state.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DiGraph<Node, Edge>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        type EdgeTuple = (Option<NodeId>, Option<NodeId>, Edge);

        struct GraphVisitor;

        impl<'de> Visitor<'de> for GraphVisitor {
            type Value = DiGraph<Node, Edge>;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a workflow graph with nodes and edges")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut nodes: Option<Vec<Node>> = None;
                let mut edges: Option<Vec<EdgeTuple>> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "nodes" => nodes = Some(map.next_value()?),
                        "edges" => edges = Some(map.next_value()?),
                        _ => {
                            let _ = map.next_value::<serde::de::IgnoredAny>()?;
                        }
                    }
                }

                let nodes = nodes.unwrap_or_default();
                let edges = edges.unwrap_or_default();

                let mut graph = DiGraph::new();
                let mut id_to_index = HashMap::new();

                for node in nodes {
                    let id = node.id.clone();
                    let index = graph.add_node(node);
                    id_to_index.insert(id, index);
                }

                for (source_id, target_id, edge) in edges {
                    let (Some(source), Some(target)) = (source_id, target_id) else {
                        continue;
                    };
                    let (Some(&source_idx), Some(&target_idx)) =
                        (id_to_index.get(&source), id_to_index.get(&target))
                    else {
                        continue;
                    };
                    graph.add_edge(source_idx, target_idx, edge);
                }

                Ok(graph)
            }
        }

        deserializer.deserialize_struct("Graph", &["nodes", "edges"], GraphVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeConfig;

    fn trigger(id: &str) -> Node {
        Node::new(id, NodeConfig::Trigger)
    }

    fn passthrough(id: &str) -> Node {
        Node::new(
            id,
            NodeConfig::Passthrough {
                kind: "condition".to_string(),
            },
        )
    }

    #[test]
    fn add_and_get_node() {
        let mut graph = FlowGraph::new();
        graph.add_node(trigger("a")).unwrap();

        let retrieved = graph.get_node(&NodeId::from("a"));
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().config, NodeConfig::Trigger);
    }

    #[test]
    fn duplicate_node_id_is_rejected() {
        let mut graph = FlowGraph::new();
        graph.add_node(trigger("a")).unwrap();
        let err = graph.add_node(passthrough("a")).unwrap_err();
        assert_eq!(
            err,
            GraphError::DuplicateNode {
                node_id: NodeId::from("a")
            }
        );
    }

    #[test]
    fn add_edge_rejects_missing_endpoint() {
        let mut graph = FlowGraph::new();
        graph.add_node(trigger("a")).unwrap();
        let err = graph
            .add_edge(&NodeId::from("a"), &NodeId::from("ghost"), Edge::new("e1"))
            .unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound { .. }));
    }

    #[test]
    fn entry_nodes_returns_nodes_without_incoming() {
        let mut graph = FlowGraph::new();
        graph.add_node(trigger("a")).unwrap();
        graph.add_node(passthrough("b")).unwrap();
        graph
            .add_edge(&NodeId::from("a"), &NodeId::from("b"), Edge::new("e1"))
            .unwrap();

        let entries = graph.entry_nodes();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, NodeId::from("a"));
    }

    #[test]
    fn entry_nodes_preserve_node_list_order() {
        let mut graph = FlowGraph::new();
        graph.add_node(trigger("first")).unwrap();
        graph.add_node(trigger("second")).unwrap();

        let entries = graph.entry_nodes();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, NodeId::from("first"));
    }

    #[test]
    fn successors_follow_edge_insertion_order() {
        let mut graph = FlowGraph::new();
        graph.add_node(trigger("a")).unwrap();
        graph.add_node(passthrough("b")).unwrap();
        graph.add_node(passthrough("c")).unwrap();
        graph
            .add_edge(&NodeId::from("a"), &NodeId::from("b"), Edge::new("e1"))
            .unwrap();
        graph
            .add_edge(&NodeId::from("a"), &NodeId::from("c"), Edge::new("e2"))
            .unwrap();

        let successors = graph.successors(&NodeId::from("a"));
        assert_eq!(successors.len(), 2);
        assert_eq!(successors[0].0.id, NodeId::from("b"));
        assert_eq!(successors[1].0.id, NodeId::from("c"));
    }

    #[test]
    fn graph_serde_roundtrip() {
        let mut graph = FlowGraph::new();
        graph.add_node(trigger("a")).unwrap();
        graph.add_node(passthrough("b")).unwrap();
        graph
            .add_edge(&NodeId::from("a"), &NodeId::from("b"), Edge::new("e1"))
            .unwrap();

        let json = serde_json::to_string(&graph).expect("serialize");
        let mut parsed: FlowGraph = serde_json::from_str(&json).expect("deserialize");
        parsed.rebuild_index_map();

        assert_eq!(parsed.node_count(), 2);
        assert_eq!(parsed.edge_count(), 1);
        assert!(parsed.get_node(&NodeId::from("a")).is_some());
    }
}
