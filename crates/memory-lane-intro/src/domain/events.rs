//! Domain events for the intro context.

use memory_lane_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Emitted when a returning player skips the intro.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroSkipped;

/// Emitted when typing begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroStarted {
    /// Number of script lines.
    pub line_count: usize,
}

/// Emitted once the whole script is typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingFinished {
    /// Number of characters revealed.
    pub characters: usize,
}

/// Emitted when the entry control appears.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRevealed;

/// Emitted when the player enters and the overlay is dismissed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroDismissed {
    /// Delay before the overlay leaves the render tree.
    pub removal_delay_ms: u64,
}

/// Event payload variants for the intro context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IntroEventKind {
    /// The intro was skipped.
    IntroSkipped(IntroSkipped),
    /// Typing began.
    IntroStarted(IntroStarted),
    /// Typing finished.
    TypingFinished(TypingFinished),
    /// The entry control appeared.
    EntryRevealed(EntryRevealed),
    /// The overlay was dismissed.
    IntroDismissed(IntroDismissed),
}

/// Domain event envelope for the intro context.
#[derive(Debug, Clone)]
pub struct IntroEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: IntroEventKind,
}

impl DomainEvent for IntroEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            IntroEventKind::IntroSkipped(_) => "intro.skipped",
            IntroEventKind::IntroStarted(_) => "intro.started",
            IntroEventKind::TypingFinished(_) => "intro.typing_finished",
            IntroEventKind::EntryRevealed(_) => "intro.entry_revealed",
            IntroEventKind::IntroDismissed(_) => "intro.dismissed",
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
