//! Commands for the intro context.

use memory_lane_core::command::Command;
use uuid::Uuid;

/// Command issued once at startup.
#[derive(Debug, Clone)]
pub struct StartIntro {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Treat the intro as played regardless of the stored marker.
    pub skip: bool,
}

impl Command for StartIntro {
    fn command_type(&self) -> &'static str {
        "intro.start"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command raised by the intro entry control.
#[derive(Debug, Clone)]
pub struct EnterMemoryLane {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for EnterMemoryLane {
    fn command_type(&self) -> &'static str {
        "intro.enter"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
