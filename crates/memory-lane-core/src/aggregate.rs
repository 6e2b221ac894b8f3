//! Aggregate abstraction.

use crate::event::DomainEvent;

/// Trait for stateful domain objects that record the events their commands
/// produce until the application layer collects them.
pub trait Aggregate: Send + Sync {
    /// The event type this aggregate produces.
    type Event: DomainEvent + Clone;

    /// Returns uncommitted events produced by command handling.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Clears uncommitted events after they have been handed out.
    fn clear_uncommitted_events(&mut self);

    /// Returns the uncommitted events and clears them.
    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        let events = self.uncommitted_events().to_vec();
        self.clear_uncommitted_events();
        events
    }
}
