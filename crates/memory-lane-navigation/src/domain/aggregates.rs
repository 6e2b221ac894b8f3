//! Aggregate roots for the navigation context.

use memory_lane_core::aggregate::Aggregate;
use memory_lane_core::clock::Clock;
use memory_lane_core::event::EventMetadata;
use uuid::Uuid;

use super::commands::Direction;
use super::events::{NavigationEvent, NavigationEventKind, SlideChanged};

/// The slide carousel. Navigation is never locked and always wraps.
#[derive(Debug)]
pub struct Carousel {
    /// Number of slides; at least one.
    slide_count: usize,
    /// Active slide, always in `0..slide_count`.
    pub(crate) current_slide: usize,
    /// Uncommitted events pending collection.
    uncommitted_events: Vec<NavigationEvent>,
}

impl Carousel {
    /// Creates a carousel of `slide_count` slides showing the first one.
    #[must_use]
    pub fn new(slide_count: usize) -> Self {
        Self {
            slide_count: slide_count.max(1),
            current_slide: 0,
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns the active slide.
    #[must_use]
    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    /// Returns the number of slides.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Returns the wrapper offset for the active slide, in percent of the
    /// wrapper width.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn offset_percent(&self) -> f64 {
        self.current_slide as f64 * 100.0 / self.slide_count as f64
    }

    /// Moves one slide in `direction`, wrapping at both ends, and produces a
    /// `SlideChanged` event.
    pub fn navigate(&mut self, direction: Direction, correlation_id: Uuid, clock: &dyn Clock) {
        let from = self.current_slide;
        let to = match direction {
            Direction::Next => (from + 1) % self.slide_count,
            Direction::Previous => (from + self.slide_count - 1) % self.slide_count,
        };
        self.current_slide = to;

        self.uncommitted_events.push(NavigationEvent {
            metadata: EventMetadata::new("navigation.slide_changed", correlation_id, clock),
            kind: NavigationEventKind::SlideChanged(SlideChanged {
                from,
                to,
                offset_percent: self.offset_percent(),
            }),
        });
    }
}

impl Aggregate for Carousel {
    type Event = NavigationEvent;

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
