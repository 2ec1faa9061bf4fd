//! Directed connections between nodes.

use serde::{Deserialize, Serialize};

/// A directed connection from one node to another.
///
/// Edge order matters: when a node has several outgoing edges, traversal
/// follows the first in edge-list order (see [`crate::policy::BranchPolicy`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Editor-assigned identifier; informational only.
    #[serde(default)]
    pub id: String,
}

impl Edge {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}
