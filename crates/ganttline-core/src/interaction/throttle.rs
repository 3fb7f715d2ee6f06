//! Rate limiting for continuous pointer events.

use std::time::{Duration, Instant};

/// Leading-edge throttle that remembers the most recent suppressed value.
///
/// `offer` passes a value through at most once per interval. Values offered
/// in between are held, newest wins, and come out of `poll` once the interval
/// has elapsed or out of `flush` when the gesture ends. The last value
/// offered is therefore never lost.
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    interval: Duration,
    last_run: Option<Instant>,
    pending: Option<T>,
}

impl<T> Throttle<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn ready(&self, now: Instant) -> bool {
        match self.last_run {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Offer a value; returns it if the interval allows running now.
    pub fn offer(&mut self, now: Instant, value: T) -> Option<T> {
        if self.ready(now) {
            self.last_run = Some(now);
            self.pending = None;
            Some(value)
        } else {
            self.pending = Some(value);
            None
        }
    }

    /// Release the held value if the interval has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.is_some() && self.ready(now) {
            self.last_run = Some(now);
            return self.pending.take();
        }
        None
    }

    /// Release the held value unconditionally.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
