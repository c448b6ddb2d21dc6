// Copyright 2025 the Joinery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debounce over caller-supplied timestamps.
//!
//! Rapid bursts of the same kind of event (for example `mouseover` while the
//! pointer sweeps across nested nodes) collapse to the most recent value, which
//! is released once `delay` ticks pass without a newer push.
//!
//! The crate owns no clock. Pass the host's monotonic time (milliseconds by
//! convention) to [`Debounce::push`] and [`Debounce::poll`].
//!
//! ```
//! use joinery_events::debounce::Debounce;
//!
//! let mut hover = Debounce::new(50);
//! hover.push("a", 1000);
//! hover.push("b", 1020);
//!
//! assert_eq!(hover.poll(1060), None); // 40 ticks since the last push
//! assert_eq!(hover.poll(1070), Some("b"));
//! assert_eq!(hover.poll(1200), None);
//! ```

/// Collapses bursts of values to the trailing one.
#[derive(Clone, Debug)]
pub struct Debounce<T> {
    delay: u64,
    pending: Option<(T, u64)>,
}

impl<T> Debounce<T> {
    /// A debouncer that waits `delay` ticks of silence before releasing a value.
    pub const fn new(delay: u64) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The configured quiet period.
    pub const fn delay(&self) -> u64 {
        self.delay
    }

    /// Replace the pending value and restart the quiet period at `now`.
    pub fn push(&mut self, value: T, now: u64) {
        self.pending = Some((value, now));
    }

    /// Release the pending value if the quiet period has elapsed by `now`.
    pub fn poll(&mut self, now: u64) -> Option<T> {
        let (_, pushed_at) = self.pending.as_ref()?;
        if now.saturating_sub(*pushed_at) >= self.delay {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Release the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value without releasing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Drop the pending value if it matches `pred`.
    pub fn cancel_if(&mut self, pred: impl FnOnce(&T) -> bool) {
        if self.pending.as_ref().is_some_and(|(value, _)| pred(value)) {
            self.pending = None;
        }
    }

    /// Returns `true` while a value waits for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Tick at which the pending value becomes due.
    pub fn deadline(&self) -> Option<u64> {
        self.pending
            .as_ref()
            .map(|(_, pushed_at)| pushed_at.saturating_add(self.delay))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_collapses_to_last_value() {
        let mut d = Debounce::new(10);
        d.push(1, 0);
        d.push(2, 3);
        d.push(3, 6);
        assert_eq!(d.poll(15), None);
        assert_eq!(d.poll(16), Some(3));
        assert!(!d.is_pending());
    }

    #[test]
    fn zero_delay_is_due_immediately() {
        let mut d = Debounce::new(0);
        d.push('x', 42);
        assert_eq!(d.poll(42), Some('x'));
    }

    #[test]
    fn poll_without_push_is_none() {
        let mut d: Debounce<u8> = Debounce::new(5);
        assert_eq!(d.poll(1_000), None);
        assert_eq!(d.deadline(), None);
    }

    #[test]
    fn clock_going_backwards_does_not_release() {
        let mut d = Debounce::new(5);
        d.push(1, 100);
        assert_eq!(d.poll(50), None);
        assert!(d.is_pending());
    }

    #[test]
    fn flush_and_cancel() {
        let mut d = Debounce::new(100);
        d.push(1, 0);
        assert_eq!(d.deadline(), Some(100));
        assert_eq!(d.flush(), Some(1));
        d.push(2, 0);
        d.cancel();
        assert_eq!(d.flush(), None);
    }
}
