//! Commands for the puzzle context.

use memory_lane_core::command::Command;
use uuid::Uuid;

/// Command raised by a slide's solve button.
#[derive(Debug, Clone)]
pub struct OpenPuzzle {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The puzzle (slide) index.
    pub index: usize,
    /// The question the button carries.
    pub question: String,
}

impl Command for OpenPuzzle {
    fn command_type(&self) -> &'static str {
        "puzzle.open"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command raised by submitting the answer input.
#[derive(Debug, Clone)]
pub struct SubmitAnswer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The input exactly as typed.
    pub raw_input: String,
}

impl Command for SubmitAnswer {
    fn command_type(&self) -> &'static str {
        "puzzle.submit_answer"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command issued at startup to replay saved progress.
#[derive(Debug, Clone)]
pub struct RestoreProgress {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for RestoreProgress {
    fn command_type(&self) -> &'static str {
        "puzzle.restore_progress"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command raised by the finale entry control.
#[derive(Debug, Clone)]
pub struct EnterGrandFinale {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for EnterGrandFinale {
    fn command_type(&self) -> &'static str {
        "puzzle.enter_grand_finale"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
