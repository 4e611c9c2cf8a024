//! Monotonic clocks that drive session countdowns.
//!
//! The controller never reads wall-clock time directly. It asks a [`Clock`]
//! how much time has passed since the clock's origin, which lets the
//! terminal front end run on real time and tests run on simulated time.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    /// Time elapsed since this clock's origin.
    fn now(&self) -> Duration;
}

/// Real time, measured from when the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Simulated time that only moves when advanced.
///
/// Clones share the same reading, so a test can keep one handle while the
/// controller owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    elapsed: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a clock at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get().saturating_add(by));
    }

    /// Move time forward by whole seconds.
    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.elapsed.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_starts_at_zero() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let shared = clock.clone();

        clock.advance_secs(3);
        shared.advance(Duration::from_millis(500));

        assert_eq!(clock.now(), Duration::from_millis(3500));
        assert_eq!(shared.now(), clock.now());
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
