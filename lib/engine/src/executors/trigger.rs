//! Trigger executor: identity over the run input.

use super::StepOutcome;

pub(super) fn run(carried: &str) -> StepOutcome {
    StepOutcome::passthrough(carried, "trigger: passing run input through".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_is_identity() {
        let outcome = run("the input");
        assert_eq!(outcome.value, "the input");
        assert_eq!(outcome.lines.len(), 1);
    }
}
