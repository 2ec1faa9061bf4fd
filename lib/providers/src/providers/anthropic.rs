//! Anthropic messages API wire implementation.
//!
//! Auth is header-based (`x-api-key` plus a pinned `anthropic-version`),
//! the system prompt is a top-level field rather than a message, and
//! `max_tokens` is mandatory on the wire so a default is applied when the
//! request leaves it unset.

use crate::client::{ChatProvider, ParsedReply};
use crate::error::ProviderError;
use crate::kind::ProviderKind;
use crate::request::{ProviderRequest, TokenUsage};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesReply {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

/// [`ChatProvider`] for the Anthropic messages API.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicChat;

impl ChatProvider for AnthropicChat {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn endpoint(&self, base_url: &str, _model: &str) -> String {
        format!("{base_url}/v1/messages")
    }

    fn headers(&self, api_key: Option<&str>) -> Vec<(&'static str, String)> {
        let mut headers = vec![("anthropic-version", ANTHROPIC_VERSION.to_string())];
        if let Some(key) = api_key {
            headers.push(("x-api-key", key.to_string()));
        }
        headers
    }

    fn build_body(&self, request: &ProviderRequest) -> JsonValue {
        serde_json::to_value(MessagesRequest {
            model: &request.model,
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            system: request.system.as_deref(),
            temperature: request.temperature,
            messages: vec![WireMessage {
                role: "user",
                content: &request.prompt,
            }],
        })
        .unwrap_or(JsonValue::Null)
    }

    fn parse_reply(&self, body: &JsonValue) -> Result<ParsedReply, ProviderError> {
        let reply: MessagesReply =
            serde_json::from_value(body.clone()).map_err(|e| ProviderError::MalformedReply {
                provider: self.kind(),
                reason: e.to_string(),
            })?;
        let text: String = reply
            .content
            .iter()
            .filter(|block| block.block_type == "text")
            .map(|block| block.text.as_str())
            .collect();
        if text.is_empty() {
            return Err(ProviderError::MalformedReply {
                provider: self.kind(),
                reason: "no text blocks in reply".to_string(),
            });
        }
        let usage = reply
            .usage
            .map(|u| TokenUsage::new(u.input_tokens, u.output_tokens))
            .unwrap_or_default();
        Ok(ParsedReply { text, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_puts_system_at_top_level() {
        let request =
            ProviderRequest::new(ProviderKind::Anthropic, "claude-sonnet-4-20250514", "hello")
                .with_system("be brief");
        let body = AnthropicChat.build_body(&request);
        assert_eq!(body["system"], "be brief");
        assert_eq!(body["max_tokens"], DEFAULT_MAX_TOKENS);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
    }

    #[test]
    fn explicit_max_tokens_overrides_default() {
        let request =
            ProviderRequest::new(ProviderKind::Anthropic, "claude-sonnet-4-20250514", "hi")
                .with_max_tokens(4096);
        let body = AnthropicChat.build_body(&request);
        assert_eq!(body["max_tokens"], 4096);
    }

    #[test]
    fn key_travels_in_header_not_bearer() {
        let headers = AnthropicChat.headers(Some("sk-ant-test"));
        assert!(headers.contains(&("x-api-key", "sk-ant-test".to_string())));
        assert!(headers.contains(&("anthropic-version", ANTHROPIC_VERSION.to_string())));
    }

    #[test]
    fn parses_canned_reply() {
        let body = json!({
            "id": "msg_abc",
            "content": [{"type": "text", "text": "A reply."}],
            "usage": {"input_tokens": 11, "output_tokens": 4}
        });
        let parsed = AnthropicChat.parse_reply(&body).expect("well formed");
        assert_eq!(parsed.text, "A reply.");
        assert_eq!(parsed.usage, TokenUsage::new(11, 4));
    }

    #[test]
    fn concatenates_multiple_text_blocks() {
        let body = json!({
            "content": [
                {"type": "text", "text": "part one "},
                {"type": "tool_use", "id": "x", "name": "t", "input": {}},
                {"type": "text", "text": "part two"}
            ],
            "usage": {"input_tokens": 1, "output_tokens": 1}
        });
        let parsed = AnthropicChat.parse_reply(&body).expect("well formed");
        assert_eq!(parsed.text, "part one part two");
    }

    #[test]
    fn reply_without_text_is_malformed() {
        let body = json!({"content": [], "usage": {"input_tokens": 0, "output_tokens": 0}});
        let err = AnthropicChat.parse_reply(&body).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedReply { .. }));
    }
}
