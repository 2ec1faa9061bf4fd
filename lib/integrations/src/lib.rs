//! Collaborator contracts for external integrations.
//!
//! The workflow engine never talks to messaging or notes services directly;
//! it goes through the traits defined here:
//!
//! - [`MessageSink`]: post a message body to one or more channels
//! - [`NoteStore`]: create an entry in a notes destination (database/page)
//!
//! Production implementations live with the services that own the
//! credentials. This crate ships in-memory implementations for dry runs and
//! tests.

pub mod error;
pub mod messaging;
pub mod notes;

pub use error::IntegrationError;
pub use messaging::{MessageSink, PostReceipt, RecordingSink};
pub use notes::{NoteStore, RecordingNotes};
