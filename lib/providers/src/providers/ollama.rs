//! Ollama local inference wire implementation.
//!
//! Talks to a locally running Ollama server over loopback HTTP. No API key,
//! no cost. Streaming is explicitly disabled so the reply arrives as a
//! single JSON object.

use crate::client::{ChatProvider, ParsedReply};
use crate::error::ProviderError;
use crate::kind::ProviderKind;
use crate::request::{ProviderRequest, TokenUsage};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaChatReply {
    message: OllamaReplyMessage,
    #[serde(default)]
    prompt_eval_count: u32,
    #[serde(default)]
    eval_count: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaReplyMessage {
    #[serde(default)]
    content: String,
}

/// [`ChatProvider`] for a local Ollama server.
#[derive(Debug, Clone, Copy, Default)]
pub struct OllamaChat;

impl ChatProvider for OllamaChat {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    fn endpoint(&self, base_url: &str, _model: &str) -> String {
        format!("{base_url}/api/chat")
    }

    fn headers(&self, _api_key: Option<&str>) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn build_body(&self, request: &ProviderRequest) -> JsonValue {
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
        let options = if request.temperature.is_some() || request.max_tokens.is_some() {
            Some(OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            })
        } else {
            None
        };
        serde_json::to_value(OllamaChatRequest {
            model: &request.model,
            messages,
            stream: false,
            options,
        })
        .unwrap_or(JsonValue::Null)
    }

    fn parse_reply(&self, body: &JsonValue) -> Result<ParsedReply, ProviderError> {
        let reply: OllamaChatReply =
            serde_json::from_value(body.clone()).map_err(|e| ProviderError::MalformedReply {
                provider: self.kind(),
                reason: e.to_string(),
            })?;
        Ok(ParsedReply {
            text: reply.message.content,
            usage: TokenUsage::new(reply.prompt_eval_count, reply.eval_count),
        })
    }
}
