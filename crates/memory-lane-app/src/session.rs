//! The game session: one owner for every piece of player-facing state.
//!
//! Input is dispatched to the handlers of each context. Timed reveals go
//! into a `TimerQueue` read against the injected clock; the caller polls
//! [`GameSession::fire_due_timers`] on every tick.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use memory_lane_content::StoryContent;
use memory_lane_core::clock::Clock;
use memory_lane_core::error::DomainError;
use memory_lane_core::event::DomainEvent;
use memory_lane_core::store::KeyValueStore;
use memory_lane_core::surface::{Overlay, Surface};
use memory_lane_core::timer::TimerQueue;
use memory_lane_intro::application::command_handlers::{
    handle_enter_memory_lane, handle_start_intro, remove_intro_overlay,
};
use memory_lane_intro::application::query_handlers::{IntroView, get_intro_view};
use memory_lane_intro::domain::aggregates::{IntroSequencer, IntroTiming};
use memory_lane_intro::domain::commands::{EnterMemoryLane, StartIntro};
use memory_lane_navigation::application::command_handlers::{
    handle_navigate, handle_swipe, render_initial,
};
use memory_lane_navigation::application::query_handlers::{CarouselView, get_carousel_view};
use memory_lane_navigation::domain::aggregates::Carousel;
use memory_lane_navigation::domain::commands::{Navigate, Swipe};
use memory_lane_overlay::application::presenter::{
    bind_slide_hotspots, handle_click_overlay, handle_select_hotspot,
};
use memory_lane_overlay::domain::commands::{ClickOverlay, SelectHotspot};
use memory_lane_overlay::domain::hotspots::{HotspotId, HotspotRegistry};
use memory_lane_overlay::domain::modals::{ClickTarget, ModalManager};
use memory_lane_puzzle::application::command_handlers::{
    handle_enter_grand_finale, handle_open_puzzle, handle_restore_progress, handle_submit_answer,
    present_finale,
};
use memory_lane_puzzle::application::query_handlers::{PuzzleProgressView, get_progress_view};
use memory_lane_puzzle::domain::aggregates::{
    AnswerOutcome, FINALE_REVEAL_DELAY_MS, PuzzleBoard, RESTORE_REVEAL_DELAY_MS,
};
use memory_lane_puzzle::domain::commands::{
    EnterGrandFinale, OpenPuzzle, RestoreProgress, SubmitAnswer,
};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::input::Input;

/// A one-shot timed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    /// Present the finale modal.
    Finale,
    /// Remove the dismissed intro overlay.
    RemoveIntroOverlay,
}

/// What the caller should do after an input.
#[derive(Debug)]
pub enum Flow {
    /// Keep reading input.
    Continue,
    /// Print this view, then keep reading.
    Show(SessionView),
    /// The input was not accepted; report it, then keep reading.
    Rejected(DomainError),
    /// Stop.
    Quit,
}

/// Read-only view of the whole session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    /// Carousel position.
    pub carousel: CarouselView,
    /// Puzzle progress.
    pub progress: PuzzleProgressView,
    /// Intro state; absent while the intro is playing.
    pub intro: Option<IntroView>,
    /// Names of the presented overlays.
    pub open_overlays: Vec<&'static str>,
    /// Number of reveals waiting on the timer queue.
    pub pending_reveals: usize,
}

/// The game session.
pub struct GameSession {
    story: StoryContent,
    carousel: Carousel,
    board: PuzzleBoard,
    modals: ModalManager,
    hotspots: HotspotRegistry,
    intro: Option<IntroSequencer>,
    timers: TimerQueue<Reveal>,
    clock: Arc<dyn Clock>,
    store: Arc<dyn KeyValueStore>,
    surface: Arc<dyn Surface>,
}

fn log_events<E: DomainEvent>(events: &[E]) {
    for event in events {
        debug!(
            event_type = event.event_type(),
            correlation_id = %event.metadata().correlation_id,
            payload = %event.to_payload(),
            "domain event"
        );
    }
}

impl GameSession {
    /// Creates a session for `story`. Nothing is rendered until
    /// [`GameSession::start`].
    #[must_use]
    pub fn new(
        story: StoryContent,
        intro_timing: IntroTiming,
        clock: Arc<dyn Clock>,
        store: Arc<dyn KeyValueStore>,
        surface: Arc<dyn Surface>,
    ) -> Self {
        let carousel = Carousel::new(story.slide_count());
        let board = PuzzleBoard::from_story(&story);
        let intro = IntroSequencer::new(story.intro.lines.clone(), intro_timing);
        Self {
            story,
            carousel,
            board,
            modals: ModalManager::new(),
            hotspots: HotspotRegistry::new(),
            intro: Some(intro),
            timers: TimerQueue::new(),
            clock,
            store,
            surface,
        }
    }

    /// Renders the first slide, binds the slide hotspots, restores saved
    /// progress and starts the intro.
    ///
    /// Fully solved progress re-presents the finale after the reload delay.
    /// Unusable progress is logged and the board stays fresh.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the session was already started.
    pub async fn start(&mut self, skip_intro: bool) -> Result<(), DomainError> {
        render_initial(&self.carousel, self.surface.as_ref());
        let bound = bind_slide_hotspots(&mut self.hotspots, &self.story);
        debug!(bound, "slide hotspots bound");

        let restore = RestoreProgress {
            correlation_id: Uuid::new_v4(),
        };
        match handle_restore_progress(
            &restore,
            &mut self.board,
            self.clock.as_ref(),
            self.store.as_ref(),
            &self.story.labels.solved_button,
            self.surface.as_ref(),
        )
        .await
        {
            Ok((all_solved, events)) => {
                log_events(&events);
                if all_solved {
                    self.schedule(
                        Reveal::Finale,
                        Duration::from_millis(RESTORE_REVEAL_DELAY_MS),
                    );
                }
            }
            Err(err) => warn!(error = %err, "saved progress ignored"),
        }

        let Some(intro) = self.intro.as_mut() else {
            return Err(DomainError::Validation("session already started".to_owned()));
        };
        let command = StartIntro {
            correlation_id: Uuid::new_v4(),
            skip: skip_intro,
        };
        let events = handle_start_intro(
            &command,
            intro,
            self.store.as_ref(),
            self.clock.as_ref(),
            self.surface.as_ref(),
        )
        .await?;
        log_events(&events);

        info!(
            slides = self.story.slide_count(),
            solved = self.board.solved().iter().filter(|solved| **solved).count(),
            "session started"
        );
        Ok(())
    }

    /// Hands the intro sequencer out for playback. `None` while it is
    /// already out.
    pub fn take_intro(&mut self) -> Option<IntroSequencer> {
        self.intro.take()
    }

    /// Takes the intro sequencer back after playback.
    pub fn resume_intro(&mut self, intro: IntroSequencer) {
        self.intro = Some(intro);
    }

    /// Applies one input.
    pub async fn handle(&mut self, input: Input) -> Flow {
        let result = match input {
            Input::Navigate(direction) => {
                let command = Navigate {
                    correlation_id: Uuid::new_v4(),
                    direction,
                };
                let events = handle_navigate(
                    &command,
                    &mut self.carousel,
                    self.clock.as_ref(),
                    self.surface.as_ref(),
                );
                log_events(&events);
                Ok(())
            }
            Input::Swipe { start_x, end_x } => {
                let command = Swipe {
                    correlation_id: Uuid::new_v4(),
                    start_x,
                    end_x,
                };
                let events = handle_swipe(
                    &command,
                    &mut self.carousel,
                    self.clock.as_ref(),
                    self.surface.as_ref(),
                );
                log_events(&events);
                Ok(())
            }
            Input::Hotspot(id) => {
                let command = SelectHotspot {
                    correlation_id: Uuid::new_v4(),
                    hotspot_id: HotspotId::new(id),
                };
                handle_select_hotspot(
                    &command,
                    &self.hotspots,
                    &self.story.labels.clue_image_alt,
                    &mut self.modals,
                    self.surface.as_ref(),
                );
                Ok(())
            }
            Input::Solve(index) => self.open_puzzle(index),
            Input::Answer(raw_input) => self.submit_answer(raw_input).await,
            Input::Close(overlay) => {
                self.click_overlay(overlay, ClickTarget::CloseControl);
                Ok(())
            }
            Input::Background(overlay) => {
                self.click_overlay(overlay, ClickTarget::Background);
                Ok(())
            }
            Input::Finale => self.enter_grand_finale().map(|_| ()),
            Input::Begin => self.enter_memory_lane().await,
            Input::State => return Flow::Show(self.view()),
            Input::Quit => return Flow::Quit,
        };

        match result {
            Ok(()) => Flow::Continue,
            Err(err) => {
                warn!(error = %err, "input rejected");
                Flow::Rejected(err)
            }
        }
    }

    /// Runs every reveal due at the current clock reading. Returns how many
    /// ran.
    pub fn fire_due_timers(&mut self) -> usize {
        let due = self.timers.drain_due(self.clock.now());
        for reveal in &due {
            debug!(?reveal, "timer fired");
            match reveal {
                Reveal::Finale => present_finale(&mut self.modals, self.surface.as_ref()),
                Reveal::RemoveIntroOverlay => remove_intro_overlay(self.surface.as_ref()),
            }
        }
        due.len()
    }

    /// Swaps the finale modal for the grand-finale overlay and rebinds the
    /// finale hotspots. Available whenever every puzzle is solved. Returns
    /// how many hotspots were bound.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` while any puzzle is unsolved.
    pub fn enter_grand_finale(&mut self) -> Result<usize, DomainError> {
        let command = EnterGrandFinale {
            correlation_id: Uuid::new_v4(),
        };
        handle_enter_grand_finale(
            &command,
            &self.board,
            &self.story,
            &mut self.hotspots,
            &mut self.modals,
            self.surface.as_ref(),
        )
    }

    /// Returns a read-only view of the session.
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView {
            carousel: get_carousel_view(&self.carousel),
            progress: get_progress_view(&self.board),
            intro: self.intro.as_ref().map(get_intro_view),
            open_overlays: self
                .modals
                .open_overlays()
                .into_iter()
                .map(Overlay::name)
                .collect(),
            pending_reveals: self.timers.len(),
        }
    }

    /// Returns the puzzle board.
    #[must_use]
    pub fn board(&self) -> &PuzzleBoard {
        &self.board
    }

    /// Returns the hotspot registry.
    #[must_use]
    pub fn hotspots(&self) -> &HotspotRegistry {
        &self.hotspots
    }

    /// Returns the overlay state.
    #[must_use]
    pub fn modals(&self) -> &ModalManager {
        &self.modals
    }

    fn open_puzzle(&mut self, index: usize) -> Result<(), DomainError> {
        let command = OpenPuzzle {
            correlation_id: Uuid::new_v4(),
            index,
            question: self.story.question_for(index).to_owned(),
        };
        let events = handle_open_puzzle(
            &command,
            &mut self.board,
            self.clock.as_ref(),
            &mut self.modals,
            self.surface.as_ref(),
        )?;
        log_events(&events);
        Ok(())
    }

    async fn submit_answer(&mut self, raw_input: String) -> Result<(), DomainError> {
        let command = SubmitAnswer {
            correlation_id: Uuid::new_v4(),
            raw_input,
        };
        let (outcome, events) = handle_submit_answer(
            &command,
            &mut self.board,
            self.clock.as_ref(),
            self.store.as_ref(),
            &self.story.labels.solved_button,
            &mut self.modals,
            self.surface.as_ref(),
        )
        .await?;
        log_events(&events);

        if let AnswerOutcome::Accepted {
            finale_unlocked: true,
            ..
        } = outcome
        {
            self.schedule(
                Reveal::Finale,
                Duration::from_millis(FINALE_REVEAL_DELAY_MS),
            );
        }
        Ok(())
    }

    fn click_overlay(&mut self, overlay: Overlay, target: ClickTarget) {
        let command = ClickOverlay {
            correlation_id: Uuid::new_v4(),
            overlay,
            target,
        };
        handle_click_overlay(&command, &mut self.modals, self.surface.as_ref());
        if overlay == Overlay::Puzzle && !self.modals.is_open(Overlay::Puzzle) {
            if let Some(index) = self.board.close_prompt() {
                debug!(index, "puzzle prompt dismissed");
            }
        }
    }

    async fn enter_memory_lane(&mut self) -> Result<(), DomainError> {
        let Some(intro) = self.intro.as_mut() else {
            return Err(DomainError::Validation("the intro is still playing".to_owned()));
        };
        let command = EnterMemoryLane {
            correlation_id: Uuid::new_v4(),
        };
        let (removal_delay, events) = handle_enter_memory_lane(
            &command,
            intro,
            self.store.as_ref(),
            self.clock.as_ref(),
            self.surface.as_ref(),
        )
        .await?;
        log_events(&events);
        self.schedule(Reveal::RemoveIntroOverlay, removal_delay);
        Ok(())
    }

    fn schedule(&mut self, reveal: Reveal, delay: Duration) {
        let delay = TimeDelta::from_std(delay).unwrap_or(TimeDelta::MAX);
        debug!(?reveal, delay_ms = delay.num_milliseconds(), "reveal scheduled");
        self.timers.schedule_after(self.clock.now(), delay, reveal);
    }
}
