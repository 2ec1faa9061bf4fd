//! Groq wire implementation.
//!
//! Groq serves an OpenAI-compatible endpoint, so the body and reply shapes
//! are shared with [`crate::providers::openai`]. Groq's free tier makes its
//! estimated cost zero regardless of usage.

use crate::client::{ChatProvider, ParsedReply};
use crate::error::ProviderError;
use crate::kind::ProviderKind;
use crate::providers::openai;
use crate::request::ProviderRequest;
use serde_json::Value as JsonValue;

/// [`ChatProvider`] for Groq's OpenAI-compatible API.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroqChat;

impl ChatProvider for GroqChat {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Groq
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
        openai::build_chat_body(request)
    }

    fn parse_reply(&self, body: &JsonValue) -> Result<ParsedReply, ProviderError> {
        openai::parse_chat_reply(self.kind(), body)
    }
}
