//! Messaging post executor.
//!
//! When the messaging node is the first node of a run, it acts as a
//! virtual trigger: nothing is sent, the run input is treated as the
//! received message. Channel resolution prefers run-scoped selection over
//! node metadata.

use super::StepOutcome;
use crate::context::RunContext;
use crate::node::MessagingConfig;
use skein_integrations::MessageSink;
use tracing::warn;

pub(super) async fn run(
    config: &MessagingConfig,
    step_index: usize,
    carried: &str,
    context: &RunContext,
    sink: &dyn MessageSink,
) -> StepOutcome {
    if step_index == 0 {
        return StepOutcome::passthrough(
            carried,
            "messaging_post: first node acts as trigger; echoing input".to_string(),
        );
    }

    let channels = if context.selected_channels.is_empty() {
        config.channels.clone()
    } else {
        context.selected_channels.clone()
    };

    if channels.is_empty() {
        return StepOutcome::passthrough(
            carried,
            "messaging_post: no channel configured; skipping send".to_string(),
        );
    }
    if carried.trim().is_empty() {
        return StepOutcome::passthrough(
            carried,
            "messaging_post: empty message body; skipping send".to_string(),
        );
    }

    match sink.post_message(&channels, carried).await {
        Ok(_) => StepOutcome::passthrough(
            carried,
            format!("messaging_post: posted to {}", channels.join(", ")),
        ),
        Err(error) => {
            warn!(%error, "message post failed");
            StepOutcome::passthrough(
                carried,
                format!("messaging_post: send failed: {error}; passing value through"),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skein_integrations::{IntegrationError, RecordingSink};

    #[tokio::test]
    async fn first_step_is_a_virtual_trigger() {
        let sink = RecordingSink::new();
        let outcome = run(
            &MessagingConfig {
                channels: vec!["general".to_string()],
            },
            0,
            "incoming",
            &RunContext::new(),
            &sink,
        )
        .await;
        assert_eq!(outcome.value, "incoming");
        assert!(sink.posts().is_empty());
    }

    #[tokio::test]
    async fn posts_to_configured_channel() {
        let sink = RecordingSink::new();
        let outcome = run(
            &MessagingConfig {
                channels: vec!["general".to_string()],
            },
            2,
            "the summary",
            &RunContext::new(),
            &sink,
        )
        .await;
        assert_eq!(outcome.value, "the summary");
        let posts = sink.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].0, vec!["general".to_string()]);
        assert_eq!(posts[0].1, "the summary");
    }

    #[tokio::test]
    async fn run_selection_takes_priority_over_metadata() {
        let sink = RecordingSink::new();
        let context = RunContext::new().with_channels(vec!["alerts".to_string()]);
        run(
            &MessagingConfig {
                channels: vec!["general".to_string()],
            },
            1,
            "body",
            &context,
            &sink,
        )
        .await;
        assert_eq!(sink.posts()[0].0, vec!["alerts".to_string()]);
    }

    #[tokio::test]
    async fn missing_channel_skips_with_one_line() {
        let sink = RecordingSink::new();
        let outcome = run(
            &MessagingConfig::default(),
            1,
            "body",
            &RunContext::new(),
            &sink,
        )
        .await;
        assert_eq!(outcome.value, "body");
        assert_eq!(outcome.lines.len(), 1);
        assert!(outcome.lines[0].contains("skipping"));
        assert!(sink.posts().is_empty());
    }

    #[tokio::test]
    async fn empty_body_skips_with_one_line() {
        let sink = RecordingSink::new();
        let outcome = run(
            &MessagingConfig {
                channels: vec!["general".to_string()],
            },
            1,
            "   ",
            &RunContext::new(),
            &sink,
        )
        .await;
        assert_eq!(outcome.lines.len(), 1);
        assert!(outcome.lines[0].contains("empty message body"));
        assert!(sink.posts().is_empty());
    }

    #[tokio::test]
    async fn send_failure_passes_value_through() {
        let sink = RecordingSink::failing(IntegrationError::ChannelRejected {
            channel: "general".to_string(),
            reason: "archived".to_string(),
        });
        let outcome = run(
            &MessagingConfig {
                channels: vec!["general".to_string()],
            },
            1,
            "body",
            &RunContext::new(),
            &sink,
        )
        .await;
        assert_eq!(outcome.value, "body");
        assert!(outcome.lines[0].contains("send failed"));
    }
}
