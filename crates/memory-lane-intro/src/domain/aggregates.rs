//! Aggregate roots for the intro context.

use std::time::Duration;

use memory_lane_core::aggregate::Aggregate;
use memory_lane_core::clock::Clock;
use memory_lane_core::error::DomainError;
use memory_lane_core::event::EventMetadata;
use serde::Serialize;
use uuid::Uuid;

use super::events::{
    EntryRevealed, IntroDismissed, IntroEvent, IntroEventKind, IntroSkipped, IntroStarted,
    TypingFinished,
};

/// Where the intro is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntroPhase {
    /// Not started, or never able to start.
    Idle,
    /// The script is being typed.
    Typing,
    /// The typed text is fading away.
    FadingOut,
    /// The entry control is shown and waiting.
    ButtonVisible,
    /// The overlay is gone.
    Dismissed,
}

/// Delays of the intro sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntroTiming {
    /// Pause after each typed character.
    pub typing_speed: Duration,
    /// Pause after each non-empty line.
    pub line_pause: Duration,
    /// Pause between the last line and the fade.
    pub settle: Duration,
    /// Duration of the fade.
    pub fade: Duration,
    /// Delay between dismissing the overlay and removing it.
    pub removal: Duration,
}

impl Default for IntroTiming {
    fn default() -> Self {
        Self {
            typing_speed: Duration::from_millis(60),
            line_pause: Duration::from_millis(500),
            settle: Duration::from_millis(1000),
            fade: Duration::from_millis(1000),
            removal: Duration::from_millis(1500),
        }
    }
}

/// The intro state machine.
///
/// Transitions only move forward:
/// `Idle → Typing → FadingOut → ButtonVisible → Dismissed`, or
/// `Idle → Dismissed` for a returning player.
#[derive(Debug)]
pub struct IntroSequencer {
    lines: Vec<String>,
    timing: IntroTiming,
    pub(crate) phase: IntroPhase,
    correlation_id: Uuid,
    uncommitted_events: Vec<IntroEvent>,
}

impl IntroSequencer {
    /// Creates an idle sequencer for `lines`.
    #[must_use]
    pub fn new(lines: Vec<String>, timing: IntroTiming) -> Self {
        Self {
            lines,
            timing,
            phase: IntroPhase::Idle,
            correlation_id: Uuid::nil(),
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// Returns the script.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the delays.
    #[must_use]
    pub fn timing(&self) -> IntroTiming {
        self.timing
    }

    /// Returns the correlation ID of the start command, reused for events
    /// produced while the sequence plays.
    #[must_use]
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// Starts the sequence: `Dismissed` for a returning player, `Typing`
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless the sequencer is idle.
    pub fn start(
        &mut self,
        already_played: bool,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<IntroPhase, DomainError> {
        self.expect_phase(IntroPhase::Idle)?;
        self.correlation_id = correlation_id;

        if already_played {
            self.phase = IntroPhase::Dismissed;
            self.record("intro.skipped", clock, IntroEventKind::IntroSkipped(IntroSkipped));
        } else {
            self.phase = IntroPhase::Typing;
            let line_count = self.lines.len();
            self.record(
                "intro.started",
                clock,
                IntroEventKind::IntroStarted(IntroStarted { line_count }),
            );
        }
        Ok(self.phase)
    }

    /// Moves from `Typing` to `FadingOut`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless typing.
    pub fn finish_typing(&mut self, characters: usize, clock: &dyn Clock) -> Result<(), DomainError> {
        self.expect_phase(IntroPhase::Typing)?;
        self.phase = IntroPhase::FadingOut;
        self.record(
            "intro.typing_finished",
            clock,
            IntroEventKind::TypingFinished(TypingFinished { characters }),
        );
        Ok(())
    }

    /// Moves from `FadingOut` to `ButtonVisible`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless fading out.
    pub fn reveal_entry(&mut self, clock: &dyn Clock) -> Result<(), DomainError> {
        self.expect_phase(IntroPhase::FadingOut)?;
        self.phase = IntroPhase::ButtonVisible;
        self.record("intro.entry_revealed", clock, IntroEventKind::EntryRevealed(EntryRevealed));
        Ok(())
    }

    /// Moves from `ButtonVisible` to `Dismissed`. Returns the delay before
    /// the overlay leaves the render tree.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless the entry control is shown.
    pub fn dismiss(
        &mut self,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Duration, DomainError> {
        self.expect_phase(IntroPhase::ButtonVisible)?;
        self.correlation_id = correlation_id;
        self.phase = IntroPhase::Dismissed;
        let removal_delay_ms = u64::try_from(self.timing.removal.as_millis()).unwrap_or(u64::MAX);
        self.record(
            "intro.dismissed",
            clock,
            IntroEventKind::IntroDismissed(IntroDismissed { removal_delay_ms }),
        );
        Ok(self.timing.removal)
    }

    fn expect_phase(&self, expected: IntroPhase) -> Result<(), DomainError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(DomainError::Validation(format!(
                "intro is {:?}, expected {expected:?}",
                self.phase
            )))
        }
    }

    fn record(&mut self, event_type: &str, clock: &dyn Clock, kind: IntroEventKind) {
        self.uncommitted_events.push(IntroEvent {
            metadata: EventMetadata::new(event_type, self.correlation_id, clock),
            kind,
        });
    }
}

impl Aggregate for IntroSequencer {
    type Event = IntroEvent;

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use memory_lane_core::event::DomainEvent;
    use memory_lane_test_support::FixedClock;

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn sequencer() -> IntroSequencer {
        IntroSequencer::new(vec!["ab".to_owned()], IntroTiming::default())
    }

    #[test]
    fn test_default_timing() {
        let timing = IntroTiming::default();

        assert_eq!(timing.typing_speed, Duration::from_millis(60));
        assert_eq!(timing.line_pause, Duration::from_millis(500));
        assert_eq!(timing.settle, Duration::from_millis(1000));
        assert_eq!(timing.fade, Duration::from_millis(1000));
        assert_eq!(timing.removal, Duration::from_millis(1500));
    }

    #[test]
    fn test_full_walk_through_every_phase() {
        // Arrange
        let mut intro = sequencer();
        let correlation_id = Uuid::new_v4();

        // Act
        intro.start(false, correlation_id, &clock()).unwrap();
        intro.finish_typing(2, &clock()).unwrap();
        intro.reveal_entry(&clock()).unwrap();
        let removal = intro.dismiss(Uuid::new_v4(), &clock()).unwrap();

        // Assert
        assert_eq!(intro.phase(), IntroPhase::Dismissed);
        assert_eq!(removal, Duration::from_millis(1500));
        let types: Vec<_> = intro
            .uncommitted_events()
            .iter()
            .map(DomainEvent::event_type)
            .collect();
        assert_eq!(
            types,
            vec![
                "intro.started",
                "intro.typing_finished",
                "intro.entry_revealed",
                "intro.dismissed"
            ]
        );
        assert_eq!(intro.uncommitted_events()[0].metadata().correlation_id, correlation_id);
    }

    #[test]
    fn test_returning_player_skips_to_dismissed() {
        let mut intro = sequencer();

        let phase = intro.start(true, Uuid::new_v4(), &clock()).unwrap();

        assert_eq!(phase, IntroPhase::Dismissed);
        assert_eq!(intro.uncommitted_events()[0].event_type(), "intro.skipped");
    }

    #[test]
    fn test_dismiss_before_entry_is_shown_is_rejected() {
        for phase in [
            IntroPhase::Idle,
            IntroPhase::Typing,
            IntroPhase::FadingOut,
            IntroPhase::Dismissed,
        ] {
            // Arrange
            let mut intro = sequencer();
            intro.phase = phase;

            // Act
            let result = intro.dismiss(Uuid::new_v4(), &clock());

            // Assert
            assert!(matches!(result, Err(DomainError::Validation(_))));
            assert_eq!(intro.phase(), phase);
        }
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut intro = sequencer();
        intro.start(false, Uuid::new_v4(), &clock()).unwrap();

        let result = intro.start(false, Uuid::new_v4(), &clock());

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(intro.phase(), IntroPhase::Typing);
    }
}
