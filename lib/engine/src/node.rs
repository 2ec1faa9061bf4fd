//! Workflow nodes and their typed configuration.
//!
//! The external editor serializes node configuration as an untyped metadata
//! map; [`crate::parse`] resolves that map into one [`NodeConfig`] variant
//! per node type at parse time, so executors never dig through loosely
//! named fields mid-run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a node, unique within one graph.
///
/// Node ids are editor-assigned opaque strings, not ULIDs; the engine never
/// mints them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One step in a workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Editor-assigned identifier, unique within the graph.
    pub id: NodeId,
    /// Typed per-node configuration.
    pub config: NodeConfig,
}

impl Node {
    #[must_use]
    pub fn new(id: impl Into<NodeId>, config: NodeConfig) -> Self {
        Self {
            id: id.into(),
            config,
        }
    }
}

/// Typed configuration, one variant per node type.
///
/// Unrecognized node types land in [`NodeConfig::Passthrough`], which makes
/// new editor node types safe-by-default: they traverse without effect
/// until an executor exists for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeConfig {
    /// Entry point; passes the run input through unchanged.
    Trigger,
    /// An AI model invocation.
    AiAgent(AiAgentConfig),
    /// Posts the carried value to one or more messaging channels.
    MessagingPost(MessagingConfig),
    /// Creates an entry in a notes destination.
    NotesCreate(NotesConfig),
    /// No executor; traverses without effect (Condition, Wait, Email,
    /// Action, Drive, and anything unrecognized).
    Passthrough {
        /// The original node type string, kept for the trace.
        kind: String,
    },
}

impl NodeConfig {
    /// Stable label used in trace lines.
    #[must_use]
    pub fn kind_label(&self) -> &str {
        match self {
            Self::Trigger => "trigger",
            Self::AiAgent(_) => "ai_agent",
            Self::MessagingPost(_) => "messaging_post",
            Self::NotesCreate(_) => "notes_create",
            Self::Passthrough { kind } => kind,
        }
    }
}

/// Configuration for an AI model invocation.
///
/// `provider` stays a raw string here: an unknown provider must not fail
/// the parse, so it is resolved (and degraded on mismatch) inside the
/// executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAgentConfig {
    /// Provider name; defaults to the free-tier provider.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Configured model. Unknown models fall back to the provider default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Prompt template. A `{{content}}` placeholder is substituted with the
    /// carried value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Optional system prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_provider() -> String {
    "groq".to_string()
}

impl Default for AiAgentConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            prompt: None,
            system_prompt: None,
            temperature: None,
            max_tokens: None,
        }
    }
}

/// Configuration for a messaging post node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingConfig {
    /// Destination channels from node metadata. Run-scoped channel
    /// selection takes priority over these.
    #[serde(default)]
    pub channels: Vec<String>,
}

/// Configuration for a notes creation node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Destination database or page identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Entry title; a default is applied when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels() {
        assert_eq!(NodeConfig::Trigger.kind_label(), "trigger");
        assert_eq!(
            NodeConfig::AiAgent(AiAgentConfig::default()).kind_label(),
            "ai_agent"
        );
        assert_eq!(
            NodeConfig::Passthrough {
                kind: "condition".to_string()
            }
            .kind_label(),
            "condition"
        );
    }

    #[test]
    fn ai_config_defaults_to_groq() {
        let config = AiAgentConfig::default();
        assert_eq!(config.provider, "groq");
        assert!(config.model.is_none());
    }

    #[test]
    fn node_config_serde_is_tagged() {
        let node = Node::new(
            "n1",
            NodeConfig::MessagingPost(MessagingConfig {
                channels: vec!["general".to_string()],
            }),
        );
        let json = serde_json::to_value(&node).expect("serializes");
        assert_eq!(json["id"], "n1");
        assert_eq!(json["config"]["type"], "messaging_post");
        let back: Node = serde_json::from_value(json).expect("deserializes");
        assert_eq!(back, node);
    }
}
