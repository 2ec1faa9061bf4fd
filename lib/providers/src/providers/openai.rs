//! OpenAI chat-completion wire implementation.
//!
//! The request/response shapes here are shared with Groq, which exposes an
//! OpenAI-compatible endpoint; see [`crate::providers::groq`].

use crate::client::{ChatProvider, ParsedReply};
use crate::error::ProviderError;
use crate::kind::ProviderKind;
use crate::request::{ProviderRequest, TokenUsage};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    choices: Vec<WireChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireReplyMessage,
}

#[derive(Debug, Deserialize)]
struct WireReplyMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// Builds the chat-completion JSON body. Shared with Groq.
pub(crate) fn build_chat_body(request: &ProviderRequest) -> JsonValue {
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = &request.system {
        messages.push(WireMessage {
            role: "system",
            content: system,
        });
    }
    messages.push(WireMessage {
        role: "user",
        content: &request.prompt,
    });
    serde_json::to_value(ChatCompletionRequest {
        model: &request.model,
        messages,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    })
    .unwrap_or(JsonValue::Null)
}

/// Parses a chat-completion reply body. Shared with Groq.
pub(crate) fn parse_chat_reply(
    kind: ProviderKind,
    body: &JsonValue,
) -> Result<ParsedReply, ProviderError> {
    let reply: ChatCompletionReply =
        serde_json::from_value(body.clone()).map_err(|e| ProviderError::MalformedReply {
            provider: kind,
            reason: e.to_string(),
        })?;
    let text = reply
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| ProviderError::MalformedReply {
            provider: kind,
            reason: "no choices in reply".to_string(),
        })?;
    let usage = reply
        .usage
        .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
        .unwrap_or_default();
    Ok(ParsedReply { text, usage })
}

/// [`ChatProvider`] for the OpenAI chat-completion API.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiChat;

impl ChatProvider for OpenAiChat {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn endpoint(&self, base_url: &str, _model: &str) -> String {
        format!("{base_url}/v1/chat/completions")
    }

    fn headers(&self, api_key: Option<&str>) -> Vec<(&'static str, String)> {
        match api_key {
            Some(key) => vec![("authorization", format!("Bearer {key}"))],
            None => Vec::new(),
        }
    }

    fn build_body(&self, request: &ProviderRequest) -> JsonValue {
        build_chat_body(request)
    }

    fn parse_reply(&self, body: &JsonValue) -> Result<ParsedReply, ProviderError> {
        parse_chat_reply(self.kind(), body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_includes_system_message_first() {
        let request = ProviderRequest::new(ProviderKind::OpenAi, "gpt-4o-mini", "summarize this")
            .with_system("be terse")
            .with_temperature(0.3);
        let body = OpenAiChat.build_body(&request);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "summarize this");
        assert_eq!(body["temperature"], 0.3);
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn parses_canned_reply() {
        let body = json!({
            "id": "chatcmpl-abc",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "A summary."}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49}
        });
        let parsed = OpenAiChat.parse_reply(&body).expect("well formed");
        assert_eq!(parsed.text, "A summary.");
        assert_eq!(parsed.usage, TokenUsage::new(42, 7));
    }

    #[test]
    fn missing_usage_defaults_to_zero() {
        let body = json!({
            "choices": [{"message": {"content": "hi"}}]
        });
        let parsed = OpenAiChat.parse_reply(&body).expect("well formed");
        assert_eq!(parsed.usage, TokenUsage::default());
    }

    #[test]
    fn empty_choices_is_malformed() {
        let body = json!({"choices": []});
        let err = OpenAiChat.parse_reply(&body).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedReply { .. }));
    }

    #[test]
    fn bearer_auth_header() {
        let headers = OpenAiChat.headers(Some("sk-test"));
        assert_eq!(headers, vec![("authorization", "Bearer sk-test".to_string())]);
    }

    #[test]
    fn endpoint_joins_base() {
        assert_eq!(
            OpenAiChat.endpoint("https://api.openai.com", "gpt-4o"),
            "https://api.openai.com/v1/chat/completions"
        );
    }
}
