//! Notes collaborator contract.

use crate::error::IntegrationError;
use async_trait::async_trait;
use std::sync::Mutex;

/// A recorded notes entry (destination, title, body).
pub type NoteEntry = (String, String, String);

/// Trait for creating entries in a notes destination.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Creates an entry titled `title` with content `body` under
    /// `destination` (a database or page identifier).
    ///
    /// # Errors
    ///
    /// Returns an error if the destination rejects the entry or the service
    /// is unreachable.
    async fn create_entry(
        &self,
        destination: &str,
        title: &str,
        body: &str,
    ) -> Result<(), IntegrationError>;
}

/// An in-memory store that records entries instead of creating them.
#[derive(Debug, Default)]
pub struct RecordingNotes {
    entries: Mutex<Vec<NoteEntry>>,
    fail_with: Option<IntegrationError>,
}

impl RecordingNotes {
    /// Creates a store that accepts every entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that fails every create with the given error.
    #[must_use]
    pub fn failing(error: IntegrationError) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            fail_with: Some(error),
        }
    }

    /// Returns all recorded entries.
    #[must_use]
    pub fn entries(&self) -> Vec<NoteEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl NoteStore for RecordingNotes {
    async fn create_entry(
        &self,
        destination: &str,
        title: &str,
        body: &str,
    ) -> Result<(), IntegrationError> {
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((
                destination.to_string(),
                title.to_string(),
                body.to_string(),
            ));
        }
        Ok(())
    }
}
