//! Query handlers for the puzzle context.

use serde::Serialize;

use crate::domain::aggregates::PuzzleBoard;

/// Read-only view of the player's progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PuzzleProgressView {
    /// Solved flag per puzzle.
    pub solved_puzzles: Vec<bool>,
    /// Number of solved puzzles.
    pub solved_count: usize,
    /// Whether the finale has been triggered.
    pub finale_unlocked: bool,
    /// The puzzle whose prompt is open, if any.
    pub current_puzzle: Option<usize>,
}

/// Returns the current progress view.
#[must_use]
pub fn get_progress_view(board: &PuzzleBoard) -> PuzzleProgressView {
    PuzzleProgressView {
        solved_puzzles: board.solved().to_vec(),
        solved_count: board.solved().iter().filter(|solved| **solved).count(),
        finale_unlocked: board.finale_unlocked(),
        current_puzzle: board.current_puzzle(),
    }
}
