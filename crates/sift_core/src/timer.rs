//! Virtual-clock timers
//!
//! [`TimerQueue`] stores deferred payloads keyed by [`TimerId`]. The clock does
//! not follow wall time; the host moves it with [`TimerQueue::advance`], which
//! hands back every payload that came due, ordered by due time and then by
//! scheduling order.
//!
//! [`Debouncer`] layers cancel-and-restart semantics on top: each trigger
//! cancels the outstanding handle before scheduling a new one, so only the most
//! recent trigger in a burst ever fires.

use std::time::Duration;

use slotmap::{new_key_type, Key, SlotMap};

new_key_type! {
    /// Handle to a scheduled timer
    pub struct TimerId;
}

impl TimerId {
    /// Convert to a raw u64 representation (for logging)
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }
}

struct Scheduled<T> {
    due_at: u64,
    order: u64,
    payload: T,
}

/// Snapshot of a timer that has not fired yet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub due_at: u64,
    pub order: u64,
}

/// Queue of deferred payloads driven by an explicit clock
pub struct TimerQueue<T> {
    timers: SlotMap<TimerId, Scheduled<T>>,
    now_ms: u64,
    next_order: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for TimerQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now_ms", &self.now_ms)
            .field("pending", &self.timers.len())
            .finish()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            now_ms: 0,
            next_order: 0,
        }
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `payload` to fire `delay` after the current time
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let due_at = self.now_ms.saturating_add(duration_ms(delay));
        let order = self.next_order;
        self.next_order += 1;

        let id = self.timers.insert(Scheduled {
            due_at,
            order,
            payload,
        });
        tracing::trace!("timer {} scheduled for t={}ms", id.to_raw(), due_at);
        id
    }

    /// Cancel a pending timer
    ///
    /// Returns false if the timer already fired or was canceled; stale handles
    /// are ignored.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.timers.remove(id).is_some();
        if removed {
            tracing::trace!("timer {} canceled", id.to_raw());
        }
        removed
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Pending timers in firing order
    pub fn pending(&self) -> Vec<PendingTimer> {
        let mut pending: Vec<PendingTimer> = self
            .timers
            .iter()
            .map(|(id, t)| PendingTimer {
                id,
                due_at: t.due_at,
                order: t.order,
            })
            .collect();
        pending.sort_by_key(|p| (p.due_at, p.order));
        pending
    }

    /// Move the clock forward and take every payload that came due
    pub fn advance(&mut self, delta: Duration) -> Vec<(TimerId, T)> {
        let target = self.now_ms.saturating_add(duration_ms(delta));
        self.advance_to(target)
    }

    /// Move the clock to an absolute time and take every payload that came due
    ///
    /// Moving backwards is ignored; only timers due at or before the current
    /// time fire in that case.
    pub fn advance_to(&mut self, target_ms: u64) -> Vec<(TimerId, T)> {
        self.now_ms = self.now_ms.max(target_ms);

        let due: Vec<PendingTimer> = self
            .pending()
            .into_iter()
            .filter(|p| p.due_at <= self.now_ms)
            .collect();

        due.into_iter()
            .filter_map(|p| self.timers.remove(p.id).map(|t| (p.id, t.payload)))
            .collect()
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Cancel-and-restart scheduling over a [`TimerQueue`]
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<TimerId>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Handle of the outstanding trigger, if any
    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }

    /// Cancel the outstanding trigger and schedule `payload` after the delay
    pub fn trigger<T>(&mut self, queue: &mut TimerQueue<T>, payload: T) -> TimerId {
        if let Some(previous) = self.pending.take() {
            queue.cancel(previous);
        }
        let id = queue.schedule(self.delay, payload);
        self.pending = Some(id);
        id
    }

    /// Accept a fired timer
    ///
    /// Returns true only for the handle produced by the latest trigger, which
    /// clears it. Anything else is a superseded trigger and must not run.
    pub fn acknowledge(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Drop the outstanding trigger without firing it
    pub fn cancel<T>(&mut self, queue: &mut TimerQueue<T>) -> bool {
        match self.pending.take() {
            Some(id) => queue.cancel(id),
            None => false,
        }
    }
}
