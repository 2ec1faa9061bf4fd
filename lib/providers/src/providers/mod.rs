//! Per-provider wire implementations of [`crate::client::ChatProvider`].

pub mod anthropic;
pub mod gemini;
pub mod groq;
pub mod ollama;
pub mod openai;
