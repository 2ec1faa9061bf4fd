//! Provider client abstraction for AI inference services.
//!
//! This crate gives the workflow engine one uniform contract over
//! heterogeneous providers:
//!
//! - [`ProviderKind`]: the closed set of supported providers, each with a
//!   known-model list and a default model for fallback
//! - [`ChatProvider`]: per-provider request building, response parsing, and
//!   cost estimation, registered in a [`ProviderRegistry`]
//! - [`ChatClient`]: the async invocation seam the engine depends on;
//!   [`ProviderClient`] is the HTTP implementation, [`ScriptedChat`] the
//!   in-memory one for dry runs and tests
//! - [`CredentialChain`]: configuration-store-then-environment key lookup
//! - [`pricing`]: pure token-based cost estimation
//!
//! Every invocation is attempted exactly once; retries are the caller's
//! business.

pub mod client;
pub mod credentials;
pub mod error;
pub mod kind;
pub mod pricing;
pub mod providers;
pub mod request;

pub use client::{ChatClient, ChatProvider, ParsedReply, ProviderClient, ProviderRegistry, ScriptedChat};
pub use credentials::{CredentialChain, CredentialStore, EnvCredentials, StaticCredentials};
pub use error::ProviderError;
pub use kind::{ModelChoice, ProviderKind};
pub use request::{ProviderReply, ProviderRequest, TokenUsage};
