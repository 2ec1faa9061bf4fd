//! Error types for graph construction and parsing.
//!
//! These are the only fatal errors in the engine; everything that happens
//! after a graph parses degrades to a logged passthrough instead of failing
//! the run.

use crate::node::NodeId;
use std::fmt;

/// Errors from structural graph operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge references a node that is not in the graph.
    NodeNotFound { node_id: NodeId },
    /// Two nodes share the same identifier.
    DuplicateNode { node_id: NodeId },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound { node_id } => write!(f, "node not found: {node_id}"),
            Self::DuplicateNode { node_id } => write!(f, "duplicate node id: {node_id}"),
        }
    }
}

impl std::error::Error for GraphError {}

/// Errors from parsing a serialized graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input was not valid JSON of the expected shape.
    InvalidJson { reason: String },
    /// A structural invariant failed while assembling the graph.
    Graph(GraphError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson { reason } => write!(f, "invalid graph json: {reason}"),
            Self::Graph(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<GraphError> for ParseError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}
