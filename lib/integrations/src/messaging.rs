//! Messaging collaborator contract.

use crate::error::IntegrationError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Confirmation returned by a successful post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostReceipt {
    /// Human-readable confirmation from the service.
    pub message: String,
    /// When the post was accepted.
    pub posted_at: DateTime<Utc>,
}

impl PostReceipt {
    /// Creates a receipt with the current timestamp.
    #[must_use]
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            posted_at: Utc::now(),
        }
    }
}

/// Trait for posting a message body to one or more channels.
///
/// Implementations own authentication and delivery; the engine only supplies
/// channel identifiers and the body.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Posts `body` to every channel in `channels`.
    ///
    /// # Errors
    ///
    /// Returns an error if any channel rejects the post or the service is
    /// unreachable.
    async fn post_message(
        &self,
        channels: &[String],
        body: &str,
    ) -> Result<PostReceipt, IntegrationError>;
}

/// An in-memory sink that records posts instead of delivering them.
///
/// Used for dry runs and tests. Configure `fail_with` to exercise the
/// engine's degrade-to-passthrough handling.
#[derive(Debug, Default)]
pub struct RecordingSink {
    posts: Mutex<Vec<(Vec<String>, String)>>,
    fail_with: Option<IntegrationError>,
}

impl RecordingSink {
    /// Creates a sink that accepts every post.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink that fails every post with the given error.
    #[must_use]
    pub fn failing(error: IntegrationError) -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            fail_with: Some(error),
        }
    }

    /// Returns all recorded posts as (channels, body) pairs.
    #[must_use]
    pub fn posts(&self) -> Vec<(Vec<String>, String)> {
        self.posts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn post_message(
        &self,
        channels: &[String],
        body: &str,
    ) -> Result<PostReceipt, IntegrationError> {
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        if let Ok(mut posts) = self.posts.lock() {
            posts.push((channels.to_vec(), body.to_string()));
        }
        Ok(PostReceipt::now(format!(
            "posted to {} channel(s)",
            channels.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recording_sink_records_posts() {
        let sink = RecordingSink::new();
        let receipt = sink
            .post_message(&["general".to_string()], "hello")
            .await
            .expect("post accepted");

        assert!(receipt.message.contains("1 channel"));
        let posts = sink.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].1, "hello");
    }

    #[tokio::test]
    async fn failing_sink_returns_configured_error() {
        let sink = RecordingSink::failing(IntegrationError::Unavailable {
            service: "messaging".to_string(),
            reason: "down".to_string(),
        });
        let err = sink
            .post_message(&["general".to_string()], "hello")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("down"));
        assert!(sink.posts().is_empty());
    }
}
