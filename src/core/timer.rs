//! Typed one-shot timers advanced by the tick driver
//!
//! A timer is scheduled with a relative delay and a payload. Each call to
//! [`Timers::advance`] moves the clock forward and hands back the payloads
//! whose deadline has been reached, earliest first. Timers can be cancelled
//! through the handle returned at scheduling time.
//!
//! The clock accumulates in `f64` so deadlines stay exact over long sessions;
//! callers still deal in `Seconds`.

use crate::core::types::Seconds;

/// Handle to a scheduled timer, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Pending<T> {
    handle: TimerHandle,
    fire_at: f64,
    payload: T,
}

/// One-shot timer queue
#[derive(Debug, Clone)]
pub struct Timers<T> {
    now: f64,
    next_handle: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_handle: 0,
            pending: Vec::new(),
        }
    }

    /// Current clock value
    pub fn now(&self) -> Seconds {
        self.now as Seconds
    }

    /// Schedule `payload` to fire `delay` seconds from now
    pub fn schedule(&mut self, delay: Seconds, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Pending {
            handle,
            fire_at: self.now + f64::from(delay.max(0.0)),
            payload,
        });
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance the clock and drain every timer that is now due
    pub fn advance(&mut self, dt: Seconds) -> Vec<T> {
        self.now += f64::from(dt.max(0.0));
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.fire_at <= now);
        self.pending = waiting;

        // Earliest deadline first, scheduling order breaks ties
        due.sort_by(|a, b| {
            a.fire_at
                .total_cmp(&b.fire_at)
                .then(a.handle.0.cmp(&b.handle.0))
        });
        due.into_iter().map(|p| p.payload).collect()
    }
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}
