//! Notes creation executor.

use super::StepOutcome;
use crate::node::NotesConfig;
use skein_integrations::NoteStore;
use tracing::warn;

const DEFAULT_TITLE: &str = "Workflow output";

pub(super) async fn run(
    config: &NotesConfig,
    carried: &str,
    notes: &dyn NoteStore,
) -> StepOutcome {
    let Some(destination) = config.destination.as_deref().filter(|d| !d.trim().is_empty())
    else {
        return StepOutcome::passthrough(
            carried,
            "notes_create: no destination configured; skipping".to_string(),
        );
    };

    let title = config.title.as_deref().unwrap_or(DEFAULT_TITLE);
    match notes.create_entry(destination, title, carried).await {
        Ok(()) => StepOutcome {
            value: format!("Saved note to {destination}"),
            lines: vec![format!("notes_create: created entry in {destination}")],
        },
        Err(error) => {
            warn!(%error, destination, "note creation failed");
            StepOutcome::passthrough(
                carried,
                format!("notes_create: create failed: {error}; passing value through"),
            )
        }
    }
}
