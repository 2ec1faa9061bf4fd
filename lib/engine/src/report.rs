//! The terminal result of one run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skein_core::RunId;

/// Result of executing a workflow graph once.
///
/// `logs` is an append-only ordered trace meant for humans; nothing in the
/// engine re-parses it. Trace lines carry no timestamps so identical runs
/// against deterministic collaborators produce identical logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Identifier assigned to this run.
    pub run_id: RunId,
    /// False only for malformed input or an unresolvable entry node.
    pub success: bool,
    /// One-line status surfaced to the user.
    pub message: String,
    /// Ordered trace, one or more lines per step.
    pub logs: Vec<String>,
    /// Number of nodes executed.
    pub steps: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Builds a failed report for run-aborting conditions.
    #[must_use]
    pub fn failed(message: impl Into<String>, logs: Vec<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            run_id: RunId::new(),
            success: false,
            message: message.into(),
            logs,
            steps: 0,
            started_at,
            finished_at: Utc::now(),
        }
    }
}
