//! Command handlers for the puzzle context.
//!
//! Handlers execute a command against the board, persist durable changes,
//! render the outcome, and hand back the produced events.

use memory_lane_content::StoryContent;
use memory_lane_core::aggregate::Aggregate;
use memory_lane_core::clock::Clock;
use memory_lane_core::command::Command;
use memory_lane_core::error::DomainError;
use memory_lane_core::store::KeyValueStore;
use memory_lane_core::surface::{Overlay, Surface, Update, render};
use memory_lane_overlay::application::presenter::rebind_finale_hotspots;
use memory_lane_overlay::domain::hotspots::HotspotRegistry;
use memory_lane_overlay::domain::modals::ModalManager;
use memory_lane_persistence::progress::{load_progress, save_progress};
use tracing::{info, warn};

use crate::domain::aggregates::{AnswerOutcome, OpenedPuzzle, PuzzleBoard};
use crate::domain::commands::{EnterGrandFinale, OpenPuzzle, RestoreProgress, SubmitAnswer};
use crate::domain::events::PuzzleEvent;

/// Switches the solve button of puzzle `index` to its solved label.
pub fn render_solved_button(index: usize, label: &str, surface: &dyn Surface) {
    render(
        surface,
        Update::SolveButtonSolved {
            index,
            label: label.to_owned(),
        },
    );
}

/// Presents the finale modal.
pub fn present_finale(modals: &mut ModalManager, surface: &dyn Surface) {
    info!("presenting finale");
    modals.open(Overlay::Final, surface);
}

async fn persist(board: &PuzzleBoard, store: &dyn KeyValueStore) {
    if let Err(err) = save_progress(store, &board.snapshot()).await {
        warn!(error = %err, "progress could not be saved; keeping in-memory state");
    }
}

/// Handles the `OpenPuzzle` command.
///
/// An unsolved puzzle shows its prompt with a cleared input and no hint; a
/// solved one shows its solution.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the index is out of range.
pub fn handle_open_puzzle(
    command: &OpenPuzzle,
    board: &mut PuzzleBoard,
    clock: &dyn Clock,
    modals: &mut ModalManager,
    surface: &dyn Surface,
) -> Result<Vec<PuzzleEvent>, DomainError> {
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        index = command.index,
        "handling open_puzzle command"
    );

    match board.open_puzzle(
        command.index,
        &command.question,
        command.correlation_id,
        clock,
    )? {
        OpenedPuzzle::Prompt { question } => {
            render(surface, Update::PuzzleQuestion { text: question });
            render(surface, Update::AnswerInputReset);
            render(surface, Update::HintVisible(false));
            modals.open(Overlay::Puzzle, surface);
        }
        OpenedPuzzle::Solution { text } => {
            render(surface, Update::SolutionText { text });
            modals.open(Overlay::Solution, surface);
        }
    }

    Ok(board.take_uncommitted_events())
}

/// Handles the `SubmitAnswer` command.
///
/// A match is persisted, flips the solve button, swaps the prompt for the
/// solution, and may unlock the finale; scheduling the finale presentation
/// is up to the caller. A mismatch shows the hint and clears the input.
/// A failed save is logged and does not fail the command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if no prompt is open.
pub async fn handle_submit_answer(
    command: &SubmitAnswer,
    board: &mut PuzzleBoard,
    clock: &dyn Clock,
    store: &dyn KeyValueStore,
    solved_label: &str,
    modals: &mut ModalManager,
    surface: &dyn Surface,
) -> Result<(AnswerOutcome, Vec<PuzzleEvent>), DomainError> {
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        "handling submit_answer command"
    );

    let outcome = board.submit_answer(&command.raw_input, command.correlation_id, clock)?;

    match &outcome {
        AnswerOutcome::Accepted {
            index,
            solution,
            finale_unlocked,
        } => {
            persist(board, store).await;
            render_solved_button(*index, solved_label, surface);
            modals.close(Overlay::Puzzle, surface);
            render(
                surface,
                Update::SolutionText {
                    text: solution.clone(),
                },
            );
            modals.open(Overlay::Solution, surface);
            if *finale_unlocked {
                info!(correlation_id = %command.correlation_id, "every puzzle solved");
            }
        }
        AnswerOutcome::Rejected { index } => {
            info!(index, "answer rejected");
            render(surface, Update::HintVisible(true));
            render(surface, Update::AnswerInputReset);
        }
    }

    Ok((outcome, board.take_uncommitted_events()))
}

/// Handles the `RestoreProgress` command: loads saved progress, if any, and
/// re-renders every solved button. Returns whether every puzzle is solved,
/// in which case the caller re-presents the finale after the reload delay.
///
/// Missing or unusable progress leaves the board fresh.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the loaded progress does not fit the
/// board.
pub async fn handle_restore_progress(
    command: &RestoreProgress,
    board: &mut PuzzleBoard,
    clock: &dyn Clock,
    store: &dyn KeyValueStore,
    solved_label: &str,
    surface: &dyn Surface,
) -> Result<(bool, Vec<PuzzleEvent>), DomainError> {
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        "handling restore_progress command"
    );

    let Some(progress) = load_progress(store, board.puzzle_count()).await else {
        return Ok((false, Vec::new()));
    };

    let all_solved = board.restore(&progress, command.correlation_id, clock)?;
    for (index, solved) in board.solved().iter().enumerate() {
        if *solved {
            render_solved_button(index, solved_label, surface);
        }
    }

    Ok((all_solved, board.take_uncommitted_events()))
}

/// Handles the `EnterGrandFinale` command: swaps the finale modal for the
/// grand-finale overlay and rebinds the finale hotspots. Returns how many
/// hotspots were bound.
///
/// # Errors
///
/// Returns `DomainError::Validation` while any puzzle is unsolved.
pub fn handle_enter_grand_finale(
    command: &EnterGrandFinale,
    board: &PuzzleBoard,
    story: &StoryContent,
    registry: &mut HotspotRegistry,
    modals: &mut ModalManager,
    surface: &dyn Surface,
) -> Result<usize, DomainError> {
    if !board.all_solved() {
        return Err(DomainError::Validation(
            "the finale opens once every puzzle is solved".to_owned(),
        ));
    }

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        "handling enter_grand_finale command"
    );

    modals.close(Overlay::Final, surface);
    modals.open(Overlay::GrandFinale, surface);
    Ok(rebind_finale_hotspots(registry, story))
}
