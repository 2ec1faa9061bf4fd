//! A named workflow wrapping a graph.

use crate::graph::FlowGraph;
use serde::{Deserialize, Serialize};
use skein_core::WorkflowId;

/// A workflow: a named, identified graph.
///
/// Persistence of workflows belongs to the platform; the engine only ever
/// sees one as a value for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: WorkflowId,
    pub name: String,
    pub graph: FlowGraph,
}

impl Workflow {
    /// Creates a new workflow with an empty graph.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: WorkflowId::new(),
            name: name.into(),
            graph: FlowGraph::new(),
        }
    }
}
