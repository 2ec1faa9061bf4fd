//! API key resolution.
//!
//! Keys come from a chain of stores consulted in order: explicit
//! configuration first, then process environment. The first store holding
//! any of the provider's key names wins.

use crate::kind::ProviderKind;
use std::collections::HashMap;

/// A source of API keys, looked up by key name.
pub trait CredentialStore: Send + Sync {
    /// Returns the secret stored under `name`, if any.
    fn get(&self, name: &str) -> Option<String>;
}

/// Fixed key/value credentials, typically loaded from configuration.
#[derive(Debug, Default, Clone)]
pub struct StaticCredentials {
    entries: HashMap<String, String>,
}

impl StaticCredentials {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one named secret.
    #[must_use]
    pub fn with_entry(mut self, name: impl Into<String>, secret: impl Into<String>) -> Self {
        self.entries.insert(name.into(), secret.into());
        self
    }
}

impl From<HashMap<String, String>> for StaticCredentials {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl CredentialStore for StaticCredentials {
    fn get(&self, name: &str) -> Option<String> {
        self.entries.get(name).cloned()
    }
}

/// Reads keys from process environment variables.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentials;

impl CredentialStore for EnvCredentials {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}

/// An ordered chain of credential stores.
pub struct CredentialChain {
    stores: Vec<Box<dyn CredentialStore>>,
}

impl CredentialChain {
    /// Creates an empty chain. Useful for tests that must never find a key.
    #[must_use]
    pub fn empty() -> Self {
        Self { stores: Vec::new() }
    }

    /// Creates the standard chain: configured keys, then environment.
    #[must_use]
    pub fn standard(configured: StaticCredentials) -> Self {
        Self {
            stores: vec![Box::new(configured), Box::new(EnvCredentials)],
        }
    }

    /// Appends a store consulted after all existing ones.
    #[must_use]
    pub fn with_store(mut self, store: impl CredentialStore + 'static) -> Self {
        self.stores.push(Box::new(store));
        self
    }

    /// Resolves the API key for `provider`, trying each of the provider's
    /// key names against each store in chain order.
    #[must_use]
    pub fn resolve(&self, provider: ProviderKind) -> Option<String> {
        for store in &self.stores {
            for name in provider.credential_keys() {
                if let Some(secret) = store.get(name) {
                    return Some(secret);
                }
            }
        }
        None
    }
}

impl Default for CredentialChain {
    fn default() -> Self {
        Self::standard(StaticCredentials::new())
    }
}

impl std::fmt::Debug for CredentialChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialChain")
            .field("stores", &self.stores.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_key_wins_over_later_stores() {
        let chain = CredentialChain::empty()
            .with_store(StaticCredentials::new().with_entry("GROQ_API_KEY", "gsk_first"))
            .with_store(StaticCredentials::new().with_entry("GROQ_API_KEY", "gsk_second"));
        assert_eq!(
            chain.resolve(ProviderKind::Groq).as_deref(),
            Some("gsk_first")
        );
    }

    #[test]
    fn alias_key_names_are_tried() {
        let chain = CredentialChain::empty()
            .with_store(StaticCredentials::new().with_entry("GOOGLE_API_KEY", "g_key"));
        assert_eq!(
            chain.resolve(ProviderKind::Gemini).as_deref(),
            Some("g_key")
        );
    }

    #[test]
    fn empty_chain_resolves_nothing() {
        assert_eq!(CredentialChain::empty().resolve(ProviderKind::OpenAi), None);
    }

    #[test]
    fn ollama_has_no_key_names() {
        let chain = CredentialChain::empty()
            .with_store(StaticCredentials::new().with_entry("OLLAMA_API_KEY", "unused"));
        assert_eq!(chain.resolve(ProviderKind::Ollama), None);
    }
}
