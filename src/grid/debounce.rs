//! Trailing debounce owned by a view's lifecycle.
//!
//! Each `schedule` replaces the pending value and pushes the deadline
//! out; `poll` releases the value once the deadline passes. The owner
//! must `flush` (or `cancel`) on teardown so nothing fires against a
//! view that no longer exists.

use std::time::{Duration, Instant};

pub struct Debounce<T> {
    window: Duration,
    pending: Option<T>,
    deadline: Option<Instant>,
}

impl<T> Debounce<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            deadline: None,
        }
    }

    /// Replace the pending value and restart the window
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.deadline = Some(now + self.window);
    }

    /// Take the pending value if its window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.flush(),
            _ => None,
        }
    }

    /// Take the pending value immediately
    pub fn flush(&mut self) -> Option<T> {
        self.deadline = None;
        self.pending.take()
    }

    /// Drop the pending value without releasing it
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(200);

    #[test]
    fn releases_only_after_the_window() {
        let mut debounce = Debounce::new(WINDOW);
        let t0 = Instant::now();
        debounce.schedule(1, t0);

        assert_eq!(debounce.poll(t0 + Duration::from_millis(100)), None);
        assert_eq!(debounce.poll(t0 + WINDOW), Some(1));
        assert_eq!(debounce.poll(t0 + WINDOW), None);
    }

    #[test]
    fn burst_of_schedules_yields_one_value_the_last() {
        let mut debounce = Debounce::new(WINDOW);
        let t0 = Instant::now();
        for i in 0..5 {
            debounce.schedule(i, t0 + Duration::from_millis(i as u64 * 30));
        }

        // Last schedule at t0+120ms; window runs until t0+320ms
        assert_eq!(debounce.poll(t0 + Duration::from_millis(300)), None);
        assert_eq!(debounce.poll(t0 + Duration::from_millis(320)), Some(4));
    }

    #[test]
    fn flush_releases_early_and_cancel_discards() {
        let mut debounce = Debounce::new(WINDOW);
        let t0 = Instant::now();

        debounce.schedule("a", t0);
        assert_eq!(debounce.flush(), Some("a"));
        assert!(!debounce.is_pending());

        debounce.schedule("b", t0);
        debounce.cancel();
        assert_eq!(debounce.poll(t0 + WINDOW), None);
    }
}
