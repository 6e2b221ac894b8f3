//! Aggregate roots for the puzzle context.

use memory_lane_content::StoryContent;
use memory_lane_core::aggregate::Aggregate;
use memory_lane_core::clock::Clock;
use memory_lane_core::error::DomainError;
use memory_lane_core::event::EventMetadata;
use memory_lane_persistence::progress::SavedProgress;
use uuid::Uuid;

use super::events::{
    AnswerAccepted, AnswerRejected, FinaleUnlocked, ProgressRestored, PromptOpened, PuzzleEvent,
    PuzzleEventKind, SolutionPresented,
};

/// Delay between the last correct answer and the finale presentation.
pub const FINALE_REVEAL_DELAY_MS: u64 = 1000;

/// Delay between restoring fully solved progress and re-presenting the finale.
pub const RESTORE_REVEAL_DELAY_MS: u64 = 500;

/// Normalizes an answer for comparison: surrounding whitespace trimmed,
/// case folded to upper. Nothing else is forgiven.
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Static definition of one puzzle.
#[derive(Debug, Clone)]
struct PuzzleDefinition {
    answer: String,
    solution: String,
}

/// What opening a puzzle presents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenedPuzzle {
    /// The answer prompt, seeded with a question.
    Prompt {
        /// The question shown above the input.
        question: String,
    },
    /// The puzzle is already solved; its narrative is shown instead.
    Solution {
        /// The stored solution text.
        text: String,
    },
}

/// Result of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The answer matched.
    Accepted {
        /// The puzzle index.
        index: usize,
        /// The narrative to reveal.
        solution: String,
        /// Whether this submission completed the set for the first time.
        finale_unlocked: bool,
    },
    /// The answer did not match; nothing changed.
    Rejected {
        /// The puzzle index.
        index: usize,
    },
}

/// The puzzle set and the player's progress through it.
#[derive(Debug)]
pub struct PuzzleBoard {
    definitions: Vec<PuzzleDefinition>,
    /// Solved flag per puzzle, index-aligned with the definitions.
    pub(crate) solved: Vec<bool>,
    /// Set once, when every puzzle is solved. Never cleared.
    pub(crate) finale_unlocked: bool,
    /// The puzzle whose prompt is open, if any.
    current_puzzle: Option<usize>,
    uncommitted_events: Vec<PuzzleEvent>,
}

impl PuzzleBoard {
    /// Builds a fresh board from the story's puzzles.
    #[must_use]
    pub fn from_story(story: &StoryContent) -> Self {
        let definitions: Vec<PuzzleDefinition> = story
            .slides
            .iter()
            .map(|slide| PuzzleDefinition {
                answer: normalize_answer(&slide.puzzle.answer),
                solution: slide.puzzle.solution.clone(),
            })
            .collect();
        let count = definitions.len();
        Self {
            definitions,
            solved: vec![false; count],
            finale_unlocked: false,
            current_puzzle: None,
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns the number of puzzles.
    #[must_use]
    pub fn puzzle_count(&self) -> usize {
        self.definitions.len()
    }

    /// Returns whether puzzle `index` is solved. Out-of-range is unsolved.
    #[must_use]
    pub fn is_solved(&self, index: usize) -> bool {
        self.solved.get(index).copied().unwrap_or(false)
    }

    /// Returns the solved flags.
    #[must_use]
    pub fn solved(&self) -> &[bool] {
        &self.solved
    }

    /// Returns whether every puzzle is solved.
    #[must_use]
    pub fn all_solved(&self) -> bool {
        self.solved.iter().all(|solved| *solved)
    }

    /// Returns whether the finale has been triggered.
    #[must_use]
    pub fn finale_unlocked(&self) -> bool {
        self.finale_unlocked
    }

    /// Returns the puzzle whose prompt is open.
    #[must_use]
    pub fn current_puzzle(&self) -> Option<usize> {
        self.current_puzzle
    }

    /// Returns the progress worth persisting.
    #[must_use]
    pub fn snapshot(&self) -> SavedProgress {
        SavedProgress {
            solved_puzzles: self.solved.clone(),
            final_url_shown: self.finale_unlocked,
        }
    }

    /// Opens puzzle `index`. A solved puzzle presents its solution without
    /// re-verification; an unsolved one becomes the current puzzle and
    /// presents the prompt with `question`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `index` is out of range.
    pub fn open_puzzle(
        &mut self,
        index: usize,
        question: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<OpenedPuzzle, DomainError> {
        let definition = self.definition(index)?;

        if self.solved[index] {
            let text = definition.solution.clone();
            self.record(
                "puzzle.solution_presented",
                correlation_id,
                clock,
                PuzzleEventKind::SolutionPresented(SolutionPresented { index }),
            );
            return Ok(OpenedPuzzle::Solution { text });
        }

        self.current_puzzle = Some(index);
        self.record(
            "puzzle.prompt_opened",
            correlation_id,
            clock,
            PuzzleEventKind::PromptOpened(PromptOpened {
                index,
                question: question.to_owned(),
            }),
        );
        Ok(OpenedPuzzle::Prompt {
            question: question.to_owned(),
        })
    }

    /// Checks `raw_input` against the current puzzle's answer.
    ///
    /// A match marks the puzzle solved and closes the prompt. If that leaves
    /// every puzzle solved and the finale was never triggered, the finale is
    /// unlocked. A mismatch changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no prompt is open.
    pub fn submit_answer(
        &mut self,
        raw_input: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<AnswerOutcome, DomainError> {
        let index = self
            .current_puzzle
            .ok_or_else(|| DomainError::Validation("no puzzle prompt is open".to_owned()))?;
        let definition = self.definition(index)?;

        if normalize_answer(raw_input) != definition.answer {
            self.record(
                "puzzle.answer_rejected",
                correlation_id,
                clock,
                PuzzleEventKind::AnswerRejected(AnswerRejected { index }),
            );
            return Ok(AnswerOutcome::Rejected { index });
        }

        let solution = definition.solution.clone();
        let newly_solved = !self.solved[index];
        self.solved[index] = true;
        self.current_puzzle = None;
        self.record(
            "puzzle.answer_accepted",
            correlation_id,
            clock,
            PuzzleEventKind::AnswerAccepted(AnswerAccepted {
                index,
                newly_solved,
            }),
        );

        let finale_unlocked = self.all_solved() && !self.finale_unlocked;
        if finale_unlocked {
            self.finale_unlocked = true;
            self.record(
                "puzzle.finale_unlocked",
                correlation_id,
                clock,
                PuzzleEventKind::FinaleUnlocked(FinaleUnlocked {
                    reveal_delay_ms: FINALE_REVEAL_DELAY_MS,
                }),
            );
        }

        Ok(AnswerOutcome::Accepted {
            index,
            solution,
            finale_unlocked,
        })
    }

    /// Drops the open prompt, if any, so no answer can be submitted until a
    /// puzzle is opened again. Returns the puzzle that was open.
    pub fn close_prompt(&mut self) -> Option<usize> {
        self.current_puzzle.take()
    }

    /// Replaces the progress with a loaded snapshot. Returns whether every
    /// puzzle is solved, in which case the finale should be re-presented.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the snapshot covers a different
    /// number of puzzles.
    pub fn restore(
        &mut self,
        progress: &SavedProgress,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<bool, DomainError> {
        if progress.solved_puzzles.len() != self.definitions.len() {
            return Err(DomainError::Validation(format!(
                "progress covers {} puzzles, board has {}",
                progress.solved_puzzles.len(),
                self.definitions.len()
            )));
        }

        self.solved.clone_from(&progress.solved_puzzles);
        let all_solved = self.all_solved();
        self.finale_unlocked = progress.final_url_shown && all_solved;
        self.current_puzzle = None;
        self.record(
            "puzzle.progress_restored",
            correlation_id,
            clock,
            PuzzleEventKind::ProgressRestored(ProgressRestored {
                solved_puzzles: self.solved.clone(),
                all_solved,
                reveal_delay_ms: RESTORE_REVEAL_DELAY_MS,
            }),
        );
        Ok(all_solved)
    }

    fn definition(&self, index: usize) -> Result<&PuzzleDefinition, DomainError> {
        self.definitions.get(index).ok_or_else(|| {
            DomainError::Validation(format!(
                "puzzle {index} out of range (0..{})",
                self.definitions.len()
            ))
        })
    }

    fn record(
        &mut self,
        event_type: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
        kind: PuzzleEventKind,
    ) {
        self.uncommitted_events.push(PuzzleEvent {
            metadata: EventMetadata::new(event_type, correlation_id, clock),
            kind,
        });
    }
}

impl Aggregate for PuzzleBoard {
    type Event = PuzzleEvent;

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
