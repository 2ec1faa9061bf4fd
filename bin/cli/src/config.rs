//! Centralized runner configuration.
//!
//! Strongly-typed configuration loaded via the `config` crate from
//! environment variables (`SKEIN_MAX_STEPS`, `SKEIN_OLLAMA_URL`, and
//! `SKEIN_API_KEYS__<NAME>` entries).

use serde::Deserialize;
use std::collections::HashMap;

/// Runner configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// Hard ceiling on traversal steps per run.
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,

    /// Base URL of the local Ollama server.
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Explicitly configured API keys, keyed by the provider's key name
    /// (e.g. `GROQ_API_KEY`). Consulted before the process environment.
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
}

fn default_max_steps() -> usize {
    20
}

fn default_ollama_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            ollama_url: default_ollama_url(),
            api_keys: HashMap::new(),
        }
    }
}

impl RunnerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a present variable fails to parse.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("SKEIN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_has_correct_defaults() {
        let config = RunnerConfig::default();
        assert_eq!(config.max_steps, 20);
        assert_eq!(config.ollama_url, "http://127.0.0.1:11434");
        assert!(config.api_keys.is_empty());
    }
}
