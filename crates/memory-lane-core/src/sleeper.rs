//! Suspension abstraction for timed sequences.
//!
//! In production this wraps the async runtime's timer. In tests a recording
//! implementation returns immediately so timed sequences run deterministically.

use std::time::Duration;

use async_trait::async_trait;

/// Abstraction over "wait for this long".
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspends the caller for `duration`.
    async fn sleep(&self, duration: Duration);
}
