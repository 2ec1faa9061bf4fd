//! Branch handling policy for nodes with multiple outgoing edges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How traversal treats a node with more than one outgoing edge.
///
/// Only [`BranchPolicy::LinearOnly`] is wired today; the other variants are
/// consulted by the traversal and logged as not yet supported, so the
/// policy seam exists without committing to branching semantics the
/// product has not confirmed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchPolicy {
    /// Follow the first edge in edge-list order; ignore the rest.
    #[default]
    LinearOnly,
    /// Follow the first edge whose condition matches. Not yet wired.
    FirstMatch,
    /// Execute all branches. Not yet wired.
    AllParallel,
}

impl fmt::Display for BranchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LinearOnly => "linear_only",
            Self::FirstMatch => "first_match",
            Self::AllParallel => "all_parallel",
        };
        f.write_str(name)
    }
}
