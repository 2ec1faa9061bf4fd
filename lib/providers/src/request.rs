//! Provider-agnostic invocation request and reply types.

use crate::kind::ProviderKind;
use serde::{Deserialize, Serialize};
use skein_core::InvocationId;

/// A provider-agnostic chat invocation.
///
/// Each provider translates this into its own wire shape; nothing in here is
/// specific to any one API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// Which provider to invoke.
    pub provider: ProviderKind,
    /// Resolved model name. Callers resolve via
    /// [`ProviderKind::resolve_model`] before building the request.
    pub model: String,
    /// Optional system prompt steering the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// The user prompt.
    pub prompt: String,
    /// Sampling temperature, where the provider supports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Completion token ceiling, where the provider supports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ProviderRequest {
    /// Creates a request for `provider` with the given resolved model and
    /// user prompt.
    #[must_use]
    pub fn new(
        provider: ProviderKind,
        model: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            system: None,
            prompt: prompt.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Sets the system prompt.
    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the completion token ceiling.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Token counts reported by a provider for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt.
    pub input_tokens: u32,
    /// Tokens produced in the completion.
    pub output_tokens: u32,
}

impl TokenUsage {
    #[must_use]
    pub const fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    /// Total tokens in both directions.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// The outcome of a successful invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderReply {
    /// Unique id assigned by this system, not by the provider.
    pub id: InvocationId,
    /// Which provider produced the reply.
    pub provider: ProviderKind,
    /// The model that actually served the request.
    pub model: String,
    /// Generated text.
    pub text: String,
    /// Token counts as reported by the provider; zeros when the provider
    /// reported none.
    pub usage: TokenUsage,
    /// Estimated cost in USD. Zero for free-tier and local providers.
    pub estimated_cost: f64,
}
