//! The closed set of supported providers.

use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported AI inference provider.
///
/// Adding a provider means adding a variant here plus one registration in
/// [`crate::client::ProviderRegistry::with_defaults`]; the compiler flags
/// every match that needs updating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Free high-throughput cloud inference (OpenAI-compatible wire shape).
    Groq,
    /// OpenAI chat-completion API.
    #[serde(rename = "openai")]
    OpenAi,
    /// Anthropic messages API (header-based auth).
    Anthropic,
    /// Google Gemini generateContent API.
    Gemini,
    /// Locally hosted inference server reachable over loopback HTTP.
    Ollama,
}

/// Outcome of resolving a configured model against a provider's known list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelChoice {
    /// The model that will actually be used.
    pub model: String,
    /// True when the configured model was unknown and the provider default
    /// was substituted.
    pub fell_back: bool,
}

impl ProviderKind {
    /// Returns all supported providers.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Groq,
            Self::OpenAi,
            Self::Anthropic,
            Self::Gemini,
            Self::Ollama,
        ]
    }

    /// Models the engine will accept for this provider without fallback.
    #[must_use]
    pub const fn known_models(&self) -> &'static [&'static str] {
        match self {
            Self::Groq => &[
                "llama-3.3-70b-versatile",
                "llama-3.1-8b-instant",
                "mixtral-8x7b-32768",
                "gemma2-9b-it",
            ],
            Self::OpenAi => &[
                "gpt-4o",
                "gpt-4o-mini",
                "gpt-4.1",
                "gpt-4.1-mini",
                "o4-mini",
            ],
            Self::Anthropic => &[
                "claude-sonnet-4-20250514",
                "claude-opus-4-20250514",
                "claude-3-5-haiku-20241022",
            ],
            Self::Gemini => &["gemini-2.0-flash", "gemini-2.5-flash", "gemini-2.5-pro"],
            Self::Ollama => &["llama3.2", "llama3.1", "mistral", "qwen2.5", "phi3"],
        }
    }

    /// The model substituted when configuration names an unknown model.
    #[must_use]
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::Groq => "llama-3.3-70b-versatile",
            Self::OpenAi => "gpt-4o-mini",
            Self::Anthropic => "claude-sonnet-4-20250514",
            Self::Gemini => "gemini-2.0-flash",
            Self::Ollama => "llama3.2",
        }
    }

    /// Default API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Groq => "https://api.groq.com/openai",
            Self::OpenAi => "https://api.openai.com",
            Self::Anthropic => "https://api.anthropic.com",
            Self::Gemini => "https://generativelanguage.googleapis.com",
            Self::Ollama => "http://127.0.0.1:11434",
        }
    }

    /// Whether invocations require an API key.
    #[must_use]
    pub const fn requires_key(&self) -> bool {
        !matches!(self, Self::Ollama)
    }

    /// Whether the provider bills per token. Free-tier and local providers
    /// estimate to zero cost.
    #[must_use]
    pub const fn is_metered(&self) -> bool {
        matches!(self, Self::OpenAi | Self::Anthropic | Self::Gemini)
    }

    /// Environment variable names checked for this provider's key, in
    /// priority order. Later entries are historical aliases.
    #[must_use]
    pub const fn credential_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Groq => &["GROQ_API_KEY"],
            Self::OpenAi => &["OPENAI_API_KEY"],
            Self::Anthropic => &["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"],
            Self::Gemini => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
            Self::Ollama => &[],
        }
    }

    /// Resolves a configured model name against the known-model list.
    ///
    /// Unknown models fall back to the provider default instead of failing,
    /// so stale editor configuration cannot break a run.
    #[must_use]
    pub fn resolve_model(&self, configured: Option<&str>) -> ModelChoice {
        match configured {
            Some(model) if self.known_models().contains(&model) => ModelChoice {
                model: model.to_string(),
                fell_back: false,
            },
            Some(_) => ModelChoice {
                model: self.default_model().to_string(),
                fell_back: true,
            },
            None => ModelChoice {
                model: self.default_model().to_string(),
                fell_back: false,
            },
        }
    }
}

impl Default for ProviderKind {
    fn default() -> Self {
        Self::Groq
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Groq => "groq",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
            Self::Ollama => "ollama",
        };
        f.write_str(name)
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "groq" => Ok(Self::Groq),
            "openai" | "gpt" | "chatgpt" => Ok(Self::OpenAi),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "gemini" | "google" => Ok(Self::Gemini),
            "ollama" | "local" => Ok(Self::Ollama),
            _ => Err(ProviderError::Unsupported {
                provider: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_model_is_kept() {
        let choice = ProviderKind::OpenAi.resolve_model(Some("gpt-4o"));
        assert_eq!(choice.model, "gpt-4o");
        assert!(!choice.fell_back);
    }

    #[test]
    fn unknown_model_falls_back_to_default() {
        let choice = ProviderKind::Anthropic.resolve_model(Some("claude-1-instant"));
        assert_eq!(choice.model, "claude-sonnet-4-20250514");
        assert!(choice.fell_back);
    }

    #[test]
    fn missing_model_uses_default_without_fallback_flag() {
        let choice = ProviderKind::Groq.resolve_model(None);
        assert_eq!(choice.model, "llama-3.3-70b-versatile");
        assert!(!choice.fell_back);
    }

    #[test]
    fn from_str_accepts_aliases() {
        assert_eq!("Claude".parse::<ProviderKind>().unwrap(), ProviderKind::Anthropic);
        assert_eq!("open-ai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!("google".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert_eq!("local".parse::<ProviderKind>().unwrap(), ProviderKind::Ollama);
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "skynet".parse::<ProviderKind>().unwrap_err();
        assert!(err.to_string().contains("skynet"));
    }

    #[test]
    fn only_ollama_is_keyless() {
        for kind in ProviderKind::all() {
            assert_eq!(kind.requires_key(), kind != ProviderKind::Ollama);
        }
    }

    #[test]
    fn default_models_are_known() {
        for kind in ProviderKind::all() {
            assert!(kind.known_models().contains(&kind.default_model()));
        }
    }
}
