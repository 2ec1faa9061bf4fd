//! Invocation client: the [`ChatClient`] seam plus the HTTP implementation.

use crate::credentials::CredentialChain;
use crate::error::ProviderError;
use crate::kind::ProviderKind;
use crate::providers;
use crate::request::{ProviderReply, ProviderRequest, TokenUsage};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use skein_core::InvocationId;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// Text and usage extracted from a provider's 2xx response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    pub text: String,
    pub usage: TokenUsage,
}

/// Per-provider wire behavior: request building, response parsing, cost.
///
/// Implementations are stateless; all per-call inputs arrive as arguments so
/// one registration serves every invocation.
pub trait ChatProvider: Send + Sync + std::fmt::Debug {
    /// Which provider this implementation speaks for.
    fn kind(&self) -> ProviderKind;

    /// The full request URL, given the effective base URL and resolved model.
    fn endpoint(&self, base_url: &str, model: &str) -> String;

    /// Header name/value pairs carrying authentication and protocol
    /// versions. `api_key` is `None` only for keyless providers.
    fn headers(&self, api_key: Option<&str>) -> Vec<(&'static str, String)>;

    /// Translates the provider-agnostic request into this provider's JSON
    /// body.
    fn build_body(&self, request: &ProviderRequest) -> JsonValue;

    /// Extracts text and token usage from a 2xx response body.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MalformedReply`] when the body does not have
    /// the expected shape.
    fn parse_reply(&self, body: &JsonValue) -> Result<ParsedReply, ProviderError>;

    /// Extracts a human-readable message from a non-2xx response body.
    ///
    /// The default handles the common `{"error": {"message": ...}}` and
    /// `{"error": "..."}` shapes and otherwise returns the trimmed body.
    fn parse_error(&self, body: &str) -> String {
        if let Ok(json) = serde_json::from_str::<JsonValue>(body) {
            if let Some(message) = json["error"]["message"].as_str() {
                return message.to_string();
            }
            if let Some(message) = json["error"].as_str() {
                return message.to_string();
            }
        }
        body.trim().to_string()
    }

    /// Estimated USD cost for one invocation with the given usage.
    fn estimate_cost(&self, model: &str, usage: &TokenUsage) -> f64 {
        if self.kind().is_metered() {
            crate::pricing::estimate(model, usage.input_tokens, usage.output_tokens)
        } else {
            0.0
        }
    }
}

/// Registry mapping [`ProviderKind`] to its wire implementation.
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Box<dyn ChatProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Creates a registry with every supported provider registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new()
            .register(providers::groq::GroqChat)
            .register(providers::openai::OpenAiChat)
            .register(providers::anthropic::AnthropicChat)
            .register(providers::gemini::GeminiChat)
            .register(providers::ollama::OllamaChat)
    }

    /// Registers `provider` under its own kind, replacing any previous
    /// registration.
    #[must_use]
    pub fn register(mut self, provider: impl ChatProvider + 'static) -> Self {
        self.providers.insert(provider.kind(), Box::new(provider));
        self
    }

    /// Looks up the implementation for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Unsupported`] when nothing is registered.
    pub fn get(&self, kind: ProviderKind) -> Result<&dyn ChatProvider, ProviderError> {
        self.providers
            .get(&kind)
            .map(|provider| provider.as_ref())
            .ok_or_else(|| ProviderError::Unsupported {
                provider: kind.to_string(),
            })
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// The async invocation seam the engine depends on.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Performs one chat invocation. Never retries.
    async fn invoke(&self, request: ProviderRequest) -> Result<ProviderReply, ProviderError>;
}

/// HTTP-backed [`ChatClient`] over all registered providers.
pub struct ProviderClient {
    http: reqwest::Client,
    registry: ProviderRegistry,
    credentials: CredentialChain,
    base_urls: HashMap<ProviderKind, String>,
}

impl ProviderClient {
    /// Creates a client over the default registry and the standard
    /// credential chain.
    #[must_use]
    pub fn new(credentials: CredentialChain) -> Self {
        Self {
            http: reqwest::Client::new(),
            registry: ProviderRegistry::with_defaults(),
            credentials,
            base_urls: HashMap::new(),
        }
    }

    /// Overrides the base URL for one provider. Used to point Ollama at a
    /// non-default host or a cloud provider at a proxy.
    #[must_use]
    pub fn with_base_url(mut self, kind: ProviderKind, base_url: impl Into<String>) -> Self {
        self.base_urls.insert(kind, base_url.into());
        self
    }

    /// Replaces the provider registry.
    #[must_use]
    pub fn with_registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = registry;
        self
    }

    fn base_url_for(&self, kind: ProviderKind) -> &str {
        self.base_urls
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.base_url())
    }
}

#[async_trait]
impl ChatClient for ProviderClient {
    async fn invoke(&self, request: ProviderRequest) -> Result<ProviderReply, ProviderError> {
        let kind = request.provider;
        let provider = self.registry.get(kind)?;

        let api_key = self.credentials.resolve(kind);
        if kind.requires_key() && api_key.is_none() {
            return Err(ProviderError::KeyNotFound { provider: kind });
        }

        let url = provider.endpoint(self.base_url_for(kind), &request.model);
        let body = provider.build_body(&request);
        debug!(provider = %kind, model = %request.model, "invoking provider");

        let mut http_request = self.http.post(&url).json(&body);
        for (name, value) in provider.headers(api_key.as_deref()) {
            http_request = http_request.header(name, value);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed {
                provider: kind,
                reason: e.to_string(),
            })?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed {
                provider: kind,
                reason: e.to_string(),
            })?;

        if !status.is_success() {
            return Err(ProviderError::Http {
                provider: kind,
                status: status.as_u16(),
                message: provider.parse_error(&text),
            });
        }

        let json: JsonValue =
            serde_json::from_str(&text).map_err(|e| ProviderError::MalformedReply {
                provider: kind,
                reason: e.to_string(),
            })?;
        let parsed = provider.parse_reply(&json)?;
        let estimated_cost = provider.estimate_cost(&request.model, &parsed.usage);

        Ok(ProviderReply {
            id: InvocationId::new(),
            provider: kind,
            model: request.model,
            text: parsed.text,
            usage: parsed.usage,
            estimated_cost,
        })
    }
}

/// What a [`ScriptedChat`] does with each invocation.
#[derive(Debug, Clone)]
enum ScriptedBehavior {
    /// Replies with the request's own prompt.
    Echo,
    /// Replies with a fixed text.
    Reply(String),
    /// Fails every invocation with the given error.
    Fail(ProviderError),
}

/// In-memory [`ChatClient`] that never touches the network.
///
/// Used for dry runs and anywhere tests need a deterministic model. Records
/// every request it receives.
pub struct ScriptedChat {
    behavior: ScriptedBehavior,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedChat {
    /// Creates a client that echoes each prompt back as the reply.
    #[must_use]
    pub fn echoing() -> Self {
        Self {
            behavior: ScriptedBehavior::Echo,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a client that always replies with `text`.
    #[must_use]
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            behavior: ScriptedBehavior::Reply(text.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a client that fails every invocation with `error`.
    #[must_use]
    pub fn failing(error: ProviderError) -> Self {
        Self {
            behavior: ScriptedBehavior::Fail(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns every request this client has received, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatClient for ScriptedChat {
    async fn invoke(&self, request: ProviderRequest) -> Result<ProviderReply, ProviderError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        let text = match &self.behavior {
            ScriptedBehavior::Echo => request.prompt.clone(),
            ScriptedBehavior::Reply(text) => text.clone(),
            ScriptedBehavior::Fail(error) => return Err(error.clone()),
        };
        Ok(ProviderReply {
            id: InvocationId::new(),
            provider: request.provider,
            model: request.model,
            text,
            usage: TokenUsage::default(),
            estimated_cost: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_covers_every_provider() {
        let registry = ProviderRegistry::with_defaults();
        for kind in ProviderKind::all() {
            assert!(registry.get(kind).is_ok(), "missing {kind}");
        }
    }

    #[test]
    fn empty_registry_reports_unsupported() {
        let registry = ProviderRegistry::new();
        let err = registry.get(ProviderKind::Groq).unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported { .. }));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        // The client points at an unroutable URL; reaching it would fail
        // differently than KeyNotFound.
        let client = ProviderClient::new(CredentialChain::empty())
            .with_base_url(ProviderKind::OpenAi, "http://127.0.0.1:1");
        let request = ProviderRequest::new(ProviderKind::OpenAi, "gpt-4o-mini", "hi");
        let err = client.invoke(request).await.unwrap_err();
        assert_eq!(
            err,
            ProviderError::KeyNotFound {
                provider: ProviderKind::OpenAi
            }
        );
    }

    #[tokio::test]
    async fn scripted_echo_returns_prompt_and_records() {
        let chat = ScriptedChat::echoing();
        let request = ProviderRequest::new(ProviderKind::Groq, "llama-3.3-70b-versatile", "hello");
        let reply = chat.invoke(request).await.expect("scripted reply");
        assert_eq!(reply.text, "hello");
        assert_eq!(chat.requests().len(), 1);
        assert_eq!(chat.requests()[0].prompt, "hello");
    }

    #[tokio::test]
    async fn scripted_failure_returns_configured_error() {
        let chat = ScriptedChat::failing(ProviderError::Http {
            provider: ProviderKind::Groq,
            status: 500,
            message: "boom".to_string(),
        });
        let request = ProviderRequest::new(ProviderKind::Groq, "llama-3.3-70b-versatile", "hello");
        let err = chat.invoke(request).await.unwrap_err();
        assert!(matches!(err, ProviderError::Http { status: 500, .. }));
        assert_eq!(chat.requests().len(), 1);
    }
}
