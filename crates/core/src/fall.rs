//! Fall timer - the single pending gravity event
//!
//! The engine keeps its own millisecond clock and at most one pending fall
//! deadline on it. Scheduling replaces the pending deadline instead of
//! stacking a second one, and cancelling drops it.

/// Cancellable handle for the next automatic move-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FallTimer {
    deadline: Option<u64>,
}

impl FallTimer {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Fire `interval_ms` after `now`, replacing any pending deadline.
    pub fn schedule(&mut self, now: u64, interval_ms: u64) {
        self.deadline = Some(now.saturating_add(interval_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Whether the pending deadline has been reached at `now`.
    pub fn due(&self, now: u64) -> bool {
        matches!(self.deadline, Some(d) if d <= now)
    }

    /// Consume the deadline if it is due, returning when it was meant to fire.
    pub fn take_due(&mut self, now: u64) -> Option<u64> {
        if self.due(now) {
            self.deadline.take()
        } else {
            None
        }
    }
}
