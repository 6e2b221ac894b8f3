//! Commands for the navigation context.

use memory_lane_core::command::Command;
use uuid::Uuid;

/// Minimum horizontal travel, in pixels, for a touch to count as a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

/// Direction of one navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the previous slide (left arrow).
    Previous,
    /// Toward the next slide (right arrow).
    Next,
}

/// Command to move the carousel one slide.
#[derive(Debug, Clone)]
pub struct Navigate {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Which way to move.
    pub direction: Direction,
}

impl Command for Navigate {
    fn command_type(&self) -> &'static str {
        "navigation.navigate"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command carrying a raw touch start/end pair.
#[derive(Debug, Clone)]
pub struct Swipe {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Horizontal screen position where the touch started.
    pub start_x: f64,
    /// Horizontal screen position where the touch ended.
    pub end_x: f64,
}

impl Swipe {
    /// Maps the touch pair to at most one navigation step. A leftward swipe
    /// moves to the next slide, a rightward one to the previous slide.
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        if self.start_x - self.end_x > SWIPE_THRESHOLD_PX {
            Some(Direction::Next)
        } else if self.end_x - self.start_x > SWIPE_THRESHOLD_PX {
            Some(Direction::Previous)
        } else {
            None
        }
    }
}

impl Command for Swipe {
    fn command_type(&self) -> &'static str {
        "navigation.swipe"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
