//! Query handlers for the intro context.

use serde::Serialize;

use crate::domain::aggregates::{IntroPhase, IntroSequencer};

/// Read-only view of the intro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntroView {
    /// The current phase.
    pub phase: IntroPhase,
    /// Whether the entry control accepts a click.
    pub awaiting_entry: bool,
}

/// Returns the current intro view.
#[must_use]
pub fn get_intro_view(intro: &IntroSequencer) -> IntroView {
    IntroView {
        phase: intro.phase(),
        awaiting_entry: intro.phase() == IntroPhase::ButtonVisible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::IntroTiming;

    #[test]
    fn test_view_of_new_sequencer_is_idle() {
        let intro = IntroSequencer::new(Vec::new(), IntroTiming::default());

        let view = get_intro_view(&intro);

        assert_eq!(view.phase, IntroPhase::Idle);
        assert!(!view.awaiting_entry);
        assert_eq!(serde_json::to_value(&view).unwrap()["phase"], "idle");
    }
}
