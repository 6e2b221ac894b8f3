//! Domain events for the puzzle context.

use memory_lane_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Emitted when an unsolved puzzle's answer prompt opens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptOpened {
    /// The puzzle index.
    pub index: usize,
    /// The question shown.
    pub question: String,
}

/// Emitted when a solved puzzle's narrative is shown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionPresented {
    /// The puzzle index.
    pub index: usize,
}

/// Emitted when a submitted answer matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerAccepted {
    /// The puzzle index.
    pub index: usize,
    /// Whether this submission flipped the puzzle to solved.
    pub newly_solved: bool,
}

/// Emitted when a submitted answer does not match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRejected {
    /// The puzzle index.
    pub index: usize,
}

/// Emitted once, when the last puzzle is solved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinaleUnlocked {
    /// Delay before the finale is presented.
    pub reveal_delay_ms: u64,
}

/// Emitted when saved progress is replayed at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRestored {
    /// Solved flag per puzzle.
    pub solved_puzzles: Vec<bool>,
    /// Whether every puzzle is solved.
    pub all_solved: bool,
    /// Delay before the finale is presented again, when `all_solved`.
    pub reveal_delay_ms: u64,
}

/// Event payload variants for the puzzle context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PuzzleEventKind {
    /// An answer prompt opened.
    PromptOpened(PromptOpened),
    /// A solution was presented.
    SolutionPresented(SolutionPresented),
    /// An answer matched.
    AnswerAccepted(AnswerAccepted),
    /// An answer did not match.
    AnswerRejected(AnswerRejected),
    /// Every puzzle is solved for the first time.
    FinaleUnlocked(FinaleUnlocked),
    /// Saved progress was replayed.
    ProgressRestored(ProgressRestored),
}

/// Domain event envelope for the puzzle context.
#[derive(Debug, Clone)]
pub struct PuzzleEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: PuzzleEventKind,
}

impl DomainEvent for PuzzleEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            PuzzleEventKind::PromptOpened(_) => "puzzle.prompt_opened",
            PuzzleEventKind::SolutionPresented(_) => "puzzle.solution_presented",
            PuzzleEventKind::AnswerAccepted(_) => "puzzle.answer_accepted",
            PuzzleEventKind::AnswerRejected(_) => "puzzle.answer_rejected",
            PuzzleEventKind::FinaleUnlocked(_) => "puzzle.finale_unlocked",
            PuzzleEventKind::ProgressRestored(_) => "puzzle.progress_restored",
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
