use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source used for interval measurement.
///
/// Abstracted so tests can drive elapsed time by hand instead of sleeping.
pub trait Clock {
    /// Current instant on this clock.
    fn now(&self) -> Instant;
}

/// Production clock backed by [`Instant::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic tests.
///
/// Clones share the same offset, so a test hands one clone to a monitor and
/// keeps another to move time forward.
#[derive(Clone, Debug)]
pub struct ManualClock {
    base:   Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Clock frozen at the moment of construction.
    pub fn new() -> Self {
        Self { base: Instant::now(), offset: Rc::new(Cell::new(Duration::ZERO)) }
    }

    /// Moves the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        self.offset.set(self.offset.get().saturating_add(step));
    }

    /// Moves the clock forward by `step_ms` milliseconds.
    pub fn advance_ms(&self, step_ms: u64) {
        self.advance(Duration::from_millis(step_ms));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        #[allow(clippy::arithmetic_side_effects)]
        {
            self.base + self.offset.get()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_stands_still_until_advanced() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        let before = clock.now();
        handle.advance_ms(7);
        assert_eq!(clock.now().duration_since(before), Duration::from_millis(7));
    }

    #[test]
    fn monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
