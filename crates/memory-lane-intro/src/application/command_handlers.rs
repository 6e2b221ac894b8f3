//! Command handlers for the intro context.

use std::time::Duration;

use memory_lane_core::aggregate::Aggregate;
use memory_lane_core::clock::Clock;
use memory_lane_core::command::Command;
use memory_lane_core::error::DomainError;
use memory_lane_core::sleeper::Sleeper;
use memory_lane_core::store::KeyValueStore;
use memory_lane_core::surface::{BindingPoint, Surface, Update, render};
use memory_lane_persistence::progress::{has_played_intro, mark_intro_played};
use tracing::{debug, info, warn};

use crate::domain::aggregates::{IntroPhase, IntroSequencer};
use crate::domain::commands::{EnterMemoryLane, StartIntro};
use crate::domain::events::IntroEvent;

/// Handles the `StartIntro` command.
///
/// Without a typing area and an intro overlay to render into, nothing
/// happens and the sequencer stays idle. A returning player (or a start
/// with `skip` set) gets the overlay hidden at once with scrolling
/// restored; anyone else gets scrolling locked and the sequencer ready to
/// type.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the sequencer was already started.
pub async fn handle_start_intro(
    command: &StartIntro,
    intro: &mut IntroSequencer,
    store: &dyn KeyValueStore,
    clock: &dyn Clock,
    surface: &dyn Surface,
) -> Result<Vec<IntroEvent>, DomainError> {
    if !surface.has_binding(BindingPoint::TypingText)
        || !surface.has_binding(BindingPoint::IntroOverlay)
    {
        debug!("intro render targets absent; intro disabled");
        return Ok(Vec::new());
    }

    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        skip = command.skip,
        "handling start_intro command"
    );

    let already_played = command.skip || has_played_intro(store).await;
    match intro.start(already_played, command.correlation_id, clock)? {
        IntroPhase::Dismissed => {
            render(surface, Update::IntroOverlayHidden);
            render(surface, Update::PageScrollLocked(false));
        }
        _ => render(surface, Update::PageScrollLocked(true)),
    }

    Ok(intro.take_uncommitted_events())
}

/// Plays a started intro to the entry control: types every line, fades
/// the text and cursor out, then reveals the entry control.
///
/// Takes the sequencer by value so the future owns it while it runs, and
/// hands it back when done. A sequencer that is not typing is returned
/// untouched. Dropping the future stops the sequence.
pub async fn play_intro(
    mut intro: IntroSequencer,
    sleeper: &dyn Sleeper,
    clock: &dyn Clock,
    surface: &dyn Surface,
) -> IntroSequencer {
    if intro.phase() != IntroPhase::Typing {
        return intro;
    }
    let timing = intro.timing();

    let mut characters = 0;
    for line in intro.lines() {
        if line.is_empty() {
            render(surface, Update::TypedLineBreak);
            continue;
        }
        for c in line.chars() {
            render(surface, Update::TypedChar(c));
            characters += 1;
            sleeper.sleep(timing.typing_speed).await;
        }
        render(surface, Update::TypedLineBreak);
        sleeper.sleep(timing.line_pause).await;
    }

    if let Err(err) = intro.finish_typing(characters, clock) {
        warn!(error = %err, "intro typing could not finish");
        return intro;
    }

    sleeper.sleep(timing.settle).await;
    render(surface, Update::TypingTextOpacity(0.0));
    render(surface, Update::CursorOpacity(0.0));
    sleeper.sleep(timing.fade).await;

    if let Err(err) = intro.reveal_entry(clock) {
        warn!(error = %err, "intro entry could not be revealed");
        return intro;
    }
    render(surface, Update::EntryButtonVisible);
    info!(
        correlation_id = %intro.correlation_id(),
        characters,
        "intro finished typing"
    );
    intro
}

/// Handles the `EnterMemoryLane` command: remembers the intro as played,
/// hides the overlay and restores scrolling. Returns the delay after which
/// the caller removes the overlay with [`remove_intro_overlay`].
///
/// A failed write of the intro marker is logged; the overlay is dismissed
/// regardless.
///
/// # Errors
///
/// Returns `DomainError::Validation` unless the entry control is shown.
pub async fn handle_enter_memory_lane(
    command: &EnterMemoryLane,
    intro: &mut IntroSequencer,
    store: &dyn KeyValueStore,
    clock: &dyn Clock,
    surface: &dyn Surface,
) -> Result<(Duration, Vec<IntroEvent>), DomainError> {
    info!(
        command = command.command_type(),
        correlation_id = %command.correlation_id,
        "handling enter_memory_lane command"
    );

    let removal_delay = intro.dismiss(command.correlation_id, clock)?;

    if let Err(err) = mark_intro_played(store).await {
        warn!(error = %err, "intro marker could not be saved");
    }
    render(surface, Update::IntroOverlayHidden);
    render(surface, Update::PageScrollLocked(false));

    Ok((removal_delay, intro.take_uncommitted_events()))
}

/// Removes the dismissed intro overlay from the render tree.
pub fn remove_intro_overlay(surface: &dyn Surface) {
    render(surface, Update::IntroOverlayRemoved);
}
