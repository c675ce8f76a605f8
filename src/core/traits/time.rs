//! Time abstraction for the control loop.
//!
//! The failsafe arithmetic only needs a monotonic microsecond clock; this
//! trait abstracts over the Embassy time driver on hardware and a
//! controllable mock on the host so timeout behavior can be tested
//! deterministically.

#[cfg(any(test, feature = "mock"))]
use core::cell::Cell;

/// Monotonic time source.
pub trait TimeSource {
    /// Current time in microseconds since system start.
    fn now_us(&self) -> u64;

    /// Current time in milliseconds since system start.
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }

    /// Elapsed microseconds since a reference point, saturating to zero if
    /// the reference is in the future.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

/// Mock time source with controllable advancement.
///
/// Tests drive time explicitly, so timeout expiry can be checked to the
/// microsecond without sleeping.
#[cfg(any(test, feature = "mock"))]
#[derive(Debug, Default)]
pub struct MockTime {
    current_us: Cell<u64>,
}

#[cfg(any(test, feature = "mock"))]
impl MockTime {
    /// Create a mock clock starting at time 0.
    pub fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    /// Set the clock to an absolute time.
    pub fn set(&self, us: u64) {
        self.current_us.set(us);
    }

    /// Advance the clock by `us` microseconds.
    pub fn advance(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }

    /// Advance the clock by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(ms * 1000);
    }
}

#[cfg(any(test, feature = "mock"))]
impl TimeSource for MockTime {
    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}
