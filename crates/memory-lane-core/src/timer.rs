//! One-shot timers keyed by due time.
//!
//! Timers are polled: the owner drains the actions that are due at the
//! current clock reading. There is no cancellation; a scheduled timer always
//! fires on the first drain at or after its due time.

use chrono::{DateTime, TimeDelta, Utc};

/// A pending timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTimer<A> {
    /// When the timer fires.
    pub due_at: DateTime<Utc>,
    /// What the owner should do when it fires.
    pub action: A,
}

/// Ordered queue of one-shot timers.
#[derive(Debug, Clone)]
pub struct TimerQueue<A> {
    pending: Vec<ScheduledTimer<A>>,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> TimerQueue<A> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Schedules `action` to fire `delay` after `now`.
    pub fn schedule_after(&mut self, now: DateTime<Utc>, delay: TimeDelta, action: A) {
        let due_at = now
            .checked_add_signed(delay)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        // Timers with equal due times fire in scheduling order.
        let position = self.pending.partition_point(|timer| timer.due_at <= due_at);
        self.pending
            .insert(position, ScheduledTimer { due_at, action });
    }

    /// Removes and returns every action due at or before `now`, earliest first.
    pub fn drain_due(&mut self, now: DateTime<Utc>) -> Vec<A> {
        let due = self.pending.partition_point(|timer| timer.due_at <= now);
        self.pending.drain(..due).map(|timer| timer.action).collect()
    }

    /// Returns the number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns whether no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
