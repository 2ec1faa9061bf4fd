//! Error types for integration collaborators.

use std::fmt;

/// Errors raised by messaging/notes collaborators.
///
/// The engine catches these at the node boundary; they never abort a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrationError {
    /// The service rejected a channel (unknown, archived, forbidden).
    ChannelRejected { channel: String, reason: String },
    /// The notes destination rejected the create.
    EntryRejected { destination: String, reason: String },
    /// The service could not be reached at all.
    Unavailable { service: String, reason: String },
}

impl fmt::Display for IntegrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChannelRejected { channel, reason } => {
                write!(f, "channel '{channel}' rejected: {reason}")
            }
            Self::EntryRejected {
                destination,
                reason,
            } => {
                write!(f, "notes destination '{destination}' rejected entry: {reason}")
            }
            Self::Unavailable { service, reason } => {
                write!(f, "{service} unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for IntegrationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_rejected_display() {
        let err = IntegrationError::ChannelRejected {
            channel: "general".to_string(),
            reason: "archived".to_string(),
        };
        assert!(err.to_string().contains("general"));
        assert!(err.to_string().contains("archived"));
    }

    #[test]
    fn unavailable_display() {
        let err = IntegrationError::Unavailable {
            service: "messaging".to_string(),
            reason: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("connection refused"));
    }
}
