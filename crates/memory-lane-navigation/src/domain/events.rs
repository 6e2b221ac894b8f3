//! Domain events for the navigation context.

use memory_lane_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Emitted when the active slide changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideChanged {
    /// The slide that was active.
    pub from: usize,
    /// The slide that is now active.
    pub to: usize,
    /// The new wrapper offset in percent.
    pub offset_percent: f64,
}

/// Event payload variants for the navigation context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NavigationEventKind {
    /// The active slide changed.
    SlideChanged(SlideChanged),
}

/// Domain event envelope for the navigation context.
#[derive(Debug, Clone)]
pub struct NavigationEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: NavigationEventKind,
}

impl DomainEvent for NavigationEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            NavigationEventKind::SlideChanged(_) => "navigation.slide_changed",
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
