//! Error types for provider invocations.
//!
//! Callers treat every variant identically (log and degrade); the variants
//! exist so the trace says *why* the call never produced text.

use crate::kind::ProviderKind;
use std::fmt;

/// Errors from provider invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// No API key could be resolved; the network call was never attempted.
    KeyNotFound { provider: ProviderKind },
    /// The provider string does not name a supported provider.
    Unsupported { provider: String },
    /// The request could not be sent (connect failure, DNS, etc.).
    RequestFailed {
        provider: ProviderKind,
        reason: String,
    },
    /// The provider answered with a non-2xx status.
    Http {
        provider: ProviderKind,
        status: u16,
        message: String,
    },
    /// A 2xx response body did not have the expected shape.
    MalformedReply {
        provider: ProviderKind,
        reason: String,
    },
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyNotFound { provider } => {
                write!(f, "{provider} key not found")
            }
            Self::Unsupported { provider } => {
                write!(f, "unsupported provider: {provider}")
            }
            Self::RequestFailed { provider, reason } => {
                write!(f, "{provider} request failed: {reason}")
            }
            Self::Http {
                provider,
                status,
                message,
            } => {
                write!(f, "{provider} returned HTTP {status}: {message}")
            }
            Self::MalformedReply { provider, reason } => {
                write!(f, "{provider} reply could not be parsed: {reason}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_not_found_display() {
        let err = ProviderError::KeyNotFound {
            provider: ProviderKind::Anthropic,
        };
        assert_eq!(err.to_string(), "anthropic key not found");
    }

    #[test]
    fn http_display_carries_provider_message() {
        let err = ProviderError::Http {
            provider: ProviderKind::OpenAi,
            status: 429,
            message: "rate limited".to_string(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("rate limited"));
    }
}
