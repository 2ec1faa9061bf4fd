//! Core domain types shared across the skein workflow engine.
//!
//! This crate holds the foundational pieces every other skein crate builds
//! on: strongly-typed identifiers and the workspace-wide `Result` alias.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{InvocationId, ParseIdError, RunId, WorkflowId};
