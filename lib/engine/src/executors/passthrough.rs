//! Passthrough executor for node types without behavior.

use super::StepOutcome;

pub(super) fn run(kind: &str, carried: &str) -> StepOutcome {
    StepOutcome::passthrough(
        carried,
        format!("{kind}: no executor registered; passing value through"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_names_the_kind() {
        let outcome = run("condition", "unchanged");
        assert_eq!(outcome.value, "unchanged");
        assert_eq!(outcome.lines.len(), 1);
        assert!(outcome.lines[0].starts_with("condition:"));
    }
}
