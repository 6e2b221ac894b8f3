//! Test sleeper — records requested delays and returns immediately.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use memory_lane_core::sleeper::Sleeper;

/// A sleeper that never waits. Every requested delay is recorded so tests
/// can assert on the timing script of a sequence.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    /// Creates a sleeper with no recorded delays.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded delay in request order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }

    /// Returns the sum of all recorded delays.
    pub fn total(&self) -> Duration {
        self.sleeps().iter().sum()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}
