//! Shared test mocks and utilities for the Memory Lane puzzle carousel.

mod clock;
mod sleeper;
mod store;
mod surface;

pub use clock::{FixedClock, ManualClock};
pub use sleeper::RecordingSleeper;
pub use store::{FailingKeyValueStore, InMemoryKeyValueStore};
pub use surface::RecordingSurface;
