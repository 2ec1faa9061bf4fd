//! Google Gemini generateContent wire implementation.
//!
//! The model name travels in the URL path rather than the body, and field
//! names are camelCase on the wire.

use crate::client::{ChatProvider, ParsedReply};
use crate::error::ProviderError;
use crate::kind::ProviderKind;
use crate::request::{ProviderRequest, TokenUsage};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentReply {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

/// [`ChatProvider`] for the Gemini generateContent API.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiChat;

impl ChatProvider for GeminiChat {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn endpoint(&self, base_url: &str, model: &str) -> String {
        format!("{base_url}/v1beta/models/{model}:generateContent")
    }

    fn headers(&self, api_key: Option<&str>) -> Vec<(&'static str, String)> {
        match api_key {
            Some(key) => vec![("x-goog-api-key", key.to_string())],
            None => Vec::new(),
        }
    }

    fn build_body(&self, request: &ProviderRequest) -> JsonValue {
        let generation_config = if request.temperature.is_some() || request.max_tokens.is_some() {
            Some(GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            })
        } else {
            None
        };
        serde_json::to_value(GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            system_instruction: request.system.as_deref().map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
            generation_config,
        })
        .unwrap_or(JsonValue::Null)
    }

    fn parse_reply(&self, body: &JsonValue) -> Result<ParsedReply, ProviderError> {
        let reply: GenerateContentReply =
            serde_json::from_value(body.clone()).map_err(|e| ProviderError::MalformedReply {
                provider: self.kind(),
                reason: e.to_string(),
            })?;
        let text: String = reply
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect()
            })
            .unwrap_or_default();
        if text.is_empty() {
            return Err(ProviderError::MalformedReply {
                provider: self.kind(),
                reason: "no candidates in reply".to_string(),
            });
        }
        let usage = reply
            .usage_metadata
            .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count))
            .unwrap_or_default();
        Ok(ParsedReply { text, usage })
    }
}
