//! Cancellable timers on a logical clock.
//!
//! The onboarding flow paces a few transitions with short delays. Every
//! timer belongs to a [`TimerScope`]; when the flow leaves the state that
//! owns a scope it cancels the whole scope, so nothing fires into a state
//! that no longer exists.
//!
//! Time only moves when the host calls [`Timers::pop_due`] with a new
//! deadline, which keeps the whole flow deterministic under test.

use std::time::Duration;

/// Handle for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// The state a timer is tied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerScope {
    /// The achievement notification currently on screen.
    Notification,
    /// The guided tour as a whole.
    Tour,
    /// A single visit to one tour stop.
    TourStop,
}

#[derive(Debug)]
struct Pending<A> {
    id: TimerId,
    scope: TimerScope,
    deadline: Duration,
    action: A,
}

/// A queue of pending actions, each due at a point on the logical clock.
#[derive(Debug)]
pub struct Timers<A> {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending<A>>,
}

impl<A> Default for Timers<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Timers<A> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Current position of the logical clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Schedules `action` to fire `delay` after the current clock.
    pub fn schedule(&mut self, scope: TimerScope, delay: Duration, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            scope,
            deadline: self.now.saturating_add(delay),
            action,
        });
        id
    }

    /// Cancels one timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Cancels every timer in `scope`, returning how many were dropped.
    pub fn cancel_scope(&mut self, scope: TimerScope) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| p.scope != scope);
        before - self.pending.len()
    }

    /// Removes and returns the earliest timer due at or before `until`.
    ///
    /// The clock moves to that timer's deadline, so anything scheduled while
    /// handling it is measured from the moment it fired. Ties fire in
    /// scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, A)> {
        let (pos, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.deadline <= until)
            .min_by_key(|(_, p)| (p.deadline, p.id))?;
        let due = self.pending.swap_remove(pos);
        self.now = self.now.max(due.deadline);
        Some((due.id, due.action))
    }

    /// Moves the clock to `until` once nothing more is due.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
