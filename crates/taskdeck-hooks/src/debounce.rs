//! Debounced values

use std::time::{Duration, Instant};

/// A value that only settles after it stopped changing for `delay`.
///
/// Time is passed in by the caller, which keeps this usable from a
/// synchronous event loop that ticks on its own schedule.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    value: T,
    pending: Option<(T, Instant)>,
    delay: Duration,
}

impl<T: Clone + PartialEq> Debounce<T> {
    /// Create a debounced value starting at `initial`.
    #[must_use]
    pub const fn new(initial: T, delay: Duration) -> Self {
        Self {
            value: initial,
            pending: None,
            delay,
        }
    }

    /// Record a new raw value; restarts the quiet period.
    pub fn set(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Publish the pending value once the quiet period has elapsed.
    ///
    /// Returns the newly settled value, or `None` when nothing changed.
    pub fn poll(&mut self, now: Instant) -> Option<&T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|(_, since)| now.saturating_duration_since(*since) >= self.delay);
        if due {
            self.publish()
        } else {
            None
        }
    }

    /// Publish the pending value immediately.
    pub fn flush(&mut self) -> Option<&T> {
        self.publish()
    }

    /// Last settled value.
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Latest raw value, settled or not.
    pub fn latest(&self) -> &T {
        self.pending.as_ref().map_or(&self.value, |(value, _)| value)
    }

    /// Whether a raw value is waiting for its quiet period.
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn publish(&mut self) -> Option<&T> {
        let (value, _) = self.pending.take()?;
        if value == self.value {
            return None;
        }
        self.value = value;
        Some(&self.value)
    }
}
