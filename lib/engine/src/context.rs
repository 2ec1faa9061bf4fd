//! Run-scoped inputs, engine settings, and external collaborators.

use crate::policy::BranchPolicy;
use skein_integrations::{MessageSink, NoteStore};
use skein_providers::ChatClient;
use std::sync::Arc;

/// Per-run inputs supplied by the caller.
///
/// Passed explicitly into every run rather than held as ambient state, so
/// concurrent runs stay independent.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    /// Free-form run input; becomes the initial carried value.
    pub input: Option<String>,
    /// Channels pre-selected at run time. These take priority over channels
    /// in node metadata.
    pub selected_channels: Vec<String>,
}

impl RunContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the run input.
    #[must_use]
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Sets the pre-selected channels.
    #[must_use]
    pub fn with_channels(mut self, channels: Vec<String>) -> Self {
        self.selected_channels = channels;
        self
    }
}

/// The external services executors call into.
///
/// All three are trait objects so tests and dry runs can substitute
/// in-memory implementations.
#[derive(Clone)]
pub struct Collaborators {
    pub chat: Arc<dyn ChatClient>,
    pub messages: Arc<dyn MessageSink>,
    pub notes: Arc<dyn NoteStore>,
}

impl Collaborators {
    #[must_use]
    pub fn new(
        chat: Arc<dyn ChatClient>,
        messages: Arc<dyn MessageSink>,
        notes: Arc<dyn NoteStore>,
    ) -> Self {
        Self {
            chat,
            messages,
            notes,
        }
    }
}

/// Tunable engine behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Hard ceiling on traversal steps; bounds cyclic or pathological
    /// graphs. Hitting it is not a failure.
    pub max_steps: usize,
    /// How nodes with multiple outgoing edges are handled.
    pub branch_policy: BranchPolicy,
}

impl EngineSettings {
    pub const DEFAULT_MAX_STEPS: usize = 20;

    /// Sets the step ceiling.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Sets the branch policy.
    #[must_use]
    pub fn with_branch_policy(mut self, policy: BranchPolicy) -> Self {
        self.branch_policy = policy;
        self
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_steps: Self::DEFAULT_MAX_STEPS,
            branch_policy: BranchPolicy::default(),
        }
    }
}
