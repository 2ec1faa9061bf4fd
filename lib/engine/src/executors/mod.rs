//! Per-node-type executors.
//!
//! Each executor consumes the current carried value and produces the next
//! one plus trace lines. No executor may abort the run: every external
//! call is caught at the node boundary and converted into a logged
//! passthrough of the prior carried value.

mod ai_agent;
mod messaging;
mod notes;
mod passthrough;
mod trigger;

use crate::context::{Collaborators, RunContext};
use crate::node::{Node, NodeConfig};

/// What one executor produced: the next carried value plus trace lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub value: String,
    pub lines: Vec<String>,
}

impl StepOutcome {
    /// A passthrough outcome with a single trace line.
    pub(crate) fn passthrough(value: &str, line: String) -> Self {
        Self {
            value: value.to_string(),
            lines: vec![line],
        }
    }
}

/// Dispatches `node` to its executor.
///
/// `step_index` is zero-based; some executors behave differently on the
/// first step of a run.
pub async fn dispatch(
    node: &Node,
    step_index: usize,
    carried: &str,
    context: &RunContext,
    collaborators: &Collaborators,
) -> StepOutcome {
    match &node.config {
        NodeConfig::Trigger => trigger::run(carried),
        NodeConfig::AiAgent(config) => {
            ai_agent::run(config, carried, collaborators.chat.as_ref()).await
        }
        NodeConfig::MessagingPost(config) => {
            messaging::run(
                config,
                step_index,
                carried,
                context,
                collaborators.messages.as_ref(),
            )
            .await
        }
        NodeConfig::NotesCreate(config) => {
            notes::run(config, carried, collaborators.notes.as_ref()).await
        }
        NodeConfig::Passthrough { kind } => passthrough::run(kind, carried),
    }
}
