//! Parsing the editor's serialized graph into a typed [`FlowGraph`].
//!
//! The editor ships nodes as `{id, type, metadata}` where `metadata` is an
//! untyped map whose field names drifted over time (camelCase and
//! snake_case variants, channel vs channels, databaseId vs destination).
//! All of that is resolved here, once, into [`NodeConfig`] variants so the
//! executors work with typed configuration only.

use crate::edge::Edge;
use crate::error::ParseError;
use crate::graph::FlowGraph;
use crate::node::{AiAgentConfig, MessagingConfig, Node, NodeConfig, NodeId, NotesConfig};
use serde::Deserialize;
use serde_json::{Map as JsonMap, Value as JsonValue};

#[derive(Debug, Deserialize)]
struct WireGraph {
    #[serde(default)]
    nodes: Vec<WireNode>,
    #[serde(default)]
    edges: Vec<WireEdge>,
}

#[derive(Debug, Deserialize)]
struct WireNode {
    id: String,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(default)]
    metadata: JsonMap<String, JsonValue>,
}

#[derive(Debug, Deserialize)]
struct WireEdge {
    #[serde(default)]
    id: String,
    source: String,
    target: String,
}

/// Parses a serialized `{nodes, edges}` graph.
///
/// # Errors
///
/// Fails on malformed JSON, duplicate node ids, and edges referencing
/// nodes that do not exist. An unrecognized node *type* is not an error; it
/// becomes a passthrough node.
pub fn parse_graph(input: &str) -> Result<FlowGraph, ParseError> {
    let wire: WireGraph =
        serde_json::from_str(input).map_err(|e| ParseError::InvalidJson {
            reason: e.to_string(),
        })?;

    let mut graph = FlowGraph::new();
    for node in wire.nodes {
        let config = resolve_config(&node.node_type, &node.metadata);
        graph.add_node(Node::new(node.id, config))?;
    }
    for edge in wire.edges {
        graph.add_edge(
            &NodeId::from(edge.source),
            &NodeId::from(edge.target),
            Edge::new(edge.id),
        )?;
    }
    Ok(graph)
}

/// Resolves a node type string plus untyped metadata into typed config.
fn resolve_config(node_type: &str, metadata: &JsonMap<String, JsonValue>) -> NodeConfig {
    let normalized: String = node_type
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase();

    match normalized.as_str() {
        "trigger" => NodeConfig::Trigger,
        "aiagent" | "ai" | "llm" => NodeConfig::AiAgent(AiAgentConfig {
            provider: string_field(metadata, &["provider", "aiProvider", "ai_provider"])
                .unwrap_or_else(|| "groq".to_string()),
            model: string_field(metadata, &["model", "modelId", "model_id"]),
            prompt: string_field(metadata, &["prompt", "instructions"]),
            system_prompt: string_field(metadata, &["systemPrompt", "system_prompt", "system"]),
            temperature: f32_field(metadata, &["temperature"]),
            max_tokens: u32_field(metadata, &["maxTokens", "max_tokens"]),
        }),
        "messagingpost" | "messaging" | "message" | "slack" => {
            NodeConfig::MessagingPost(MessagingConfig {
                channels: channels_field(metadata),
            })
        }
        "notescreate" | "notes" | "notion" => NodeConfig::NotesCreate(NotesConfig {
            destination: string_field(
                metadata,
                &["databaseId", "database_id", "destination", "pageId", "page_id"],
            ),
            title: string_field(metadata, &["title"]),
        }),
        _ => NodeConfig::Passthrough {
            kind: node_type.to_string(),
        },
    }
}

/// Returns the first non-empty string found under any of `names`.
fn string_field(metadata: &JsonMap<String, JsonValue>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| metadata.get(*name))
        .filter_map(JsonValue::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn f32_field(metadata: &JsonMap<String, JsonValue>, names: &[&str]) -> Option<f32> {
    names
        .iter()
        .filter_map(|name| metadata.get(*name))
        .find_map(JsonValue::as_f64)
        .map(|v| v as f32)
}

fn u32_field(metadata: &JsonMap<String, JsonValue>, names: &[&str]) -> Option<u32> {
    names
        .iter()
        .filter_map(|name| metadata.get(*name))
        .find_map(JsonValue::as_u64)
        .and_then(|v| u32::try_from(v).ok())
}

/// Channels may arrive as a single string or an array, under several names.
fn channels_field(metadata: &JsonMap<String, JsonValue>) -> Vec<String> {
    for name in ["channels", "channel", "channelId", "channel_id"] {
        match metadata.get(name) {
            Some(JsonValue::String(channel)) if !channel.trim().is_empty() => {
                return vec![channel.trim().to_string()];
            }
            Some(JsonValue::Array(values)) => {
                let channels: Vec<String> = values
                    .iter()
                    .filter_map(JsonValue::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                if !channels.is_empty() {
                    return channels;
                }
            }
            _ => {}
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    #[test]
    fn parses_linear_chain() {
        let json = r#"{
            "nodes": [
                {"id": "a", "type": "trigger", "metadata": {}},
                {"id": "b", "type": "aiAgent", "metadata": {"prompt": "Summarize: {{content}}", "provider": "groq"}},
                {"id": "c", "type": "messagingPost", "metadata": {"channel": "general"}}
            ],
            "edges": [
                {"id": "e1", "source": "a", "target": "b"},
                {"id": "e2", "source": "b", "target": "c"}
            ]
        }"#;
        let graph = parse_graph(json).expect("parses");
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let ai = graph.get_node(&NodeId::from("b")).expect("node b");
        match &ai.config {
            NodeConfig::AiAgent(config) => {
                assert_eq!(config.prompt.as_deref(), Some("Summarize: {{content}}"));
                assert_eq!(config.provider, "groq");
            }
            other => panic!("expected ai agent, got {other:?}"),
        }

        let post = graph.get_node(&NodeId::from("c")).expect("node c");
        match &post.config {
            NodeConfig::MessagingPost(config) => {
                assert_eq!(config.channels, vec!["general".to_string()]);
            }
            other => panic!("expected messaging post, got {other:?}"),
        }
    }

    #[test]
    fn camel_case_aliases_resolve() {
        let json = r#"{
            "nodes": [
                {"id": "n", "type": "ai_agent", "metadata": {
                    "systemPrompt": "be brief",
                    "maxTokens": 256,
                    "modelId": "gpt-4o"
                }}
            ],
            "edges": []
        }"#;
        let graph = parse_graph(json).expect("parses");
        let node = graph.get_node(&NodeId::from("n")).expect("node");
        match &node.config {
            NodeConfig::AiAgent(config) => {
                assert_eq!(config.system_prompt.as_deref(), Some("be brief"));
                assert_eq!(config.max_tokens, Some(256));
                assert_eq!(config.model.as_deref(), Some("gpt-4o"));
            }
            other => panic!("expected ai agent, got {other:?}"),
        }
    }

    #[test]
    fn notes_destination_aliases_resolve() {
        let json = r#"{
            "nodes": [{"id": "n", "type": "notesCreate", "metadata": {"databaseId": "db_1"}}],
            "edges": []
        }"#;
        let graph = parse_graph(json).expect("parses");
        match &graph.get_node(&NodeId::from("n")).expect("node").config {
            NodeConfig::NotesCreate(config) => {
                assert_eq!(config.destination.as_deref(), Some("db_1"));
            }
            other => panic!("expected notes create, got {other:?}"),
        }
    }

    #[test]
    fn channel_list_is_accepted() {
        let json = r#"{
            "nodes": [{"id": "n", "type": "slack", "metadata": {"channels": ["general", "alerts"]}}],
            "edges": []
        }"#;
        let graph = parse_graph(json).expect("parses");
        match &graph.get_node(&NodeId::from("n")).expect("node").config {
            NodeConfig::MessagingPost(config) => {
                assert_eq!(config.channels.len(), 2);
            }
            other => panic!("expected messaging post, got {other:?}"),
        }
    }

    #[test]
    fn unknown_type_becomes_passthrough() {
        let json = r#"{
            "nodes": [{"id": "n", "type": "holographicStorage", "metadata": {}}],
            "edges": []
        }"#;
        let graph = parse_graph(json).expect("parses");
        match &graph.get_node(&NodeId::from("n")).expect("node").config {
            NodeConfig::Passthrough { kind } => assert_eq!(kind, "holographicStorage"),
            other => panic!("expected passthrough, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_node_id_fails() {
        let json = r#"{
            "nodes": [
                {"id": "dup", "type": "trigger", "metadata": {}},
                {"id": "dup", "type": "trigger", "metadata": {}}
            ],
            "edges": []
        }"#;
        let err = parse_graph(json).unwrap_err();
        assert_eq!(
            err,
            ParseError::Graph(GraphError::DuplicateNode {
                node_id: NodeId::from("dup")
            })
        );
    }

    #[test]
    fn dangling_edge_fails() {
        let json = r#"{
            "nodes": [{"id": "a", "type": "trigger", "metadata": {}}],
            "edges": [{"id": "e1", "source": "a", "target": "ghost"}]
        }"#;
        let err = parse_graph(json).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Graph(GraphError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn not_json_fails() {
        let err = parse_graph("nodes: []").unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson { .. }));
    }

    #[test]
    fn missing_metadata_defaults() {
        let json = r#"{
            "nodes": [{"id": "n", "type": "aiAgent"}],
            "edges": []
        }"#;
        let graph = parse_graph(json).expect("parses");
        match &graph.get_node(&NodeId::from("n")).expect("node").config {
            NodeConfig::AiAgent(config) => {
                assert_eq!(config.provider, "groq");
                assert!(config.prompt.is_none());
            }
            other => panic!("expected ai agent, got {other:?}"),
        }
    }
}
