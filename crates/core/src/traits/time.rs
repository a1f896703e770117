//! Time abstraction traits for the control loop.
//!
//! [`TimeSource`] reads the realtime clock and [`Delay`] suspends the single
//! control thread. Splitting them lets tests drive both from one
//! [`MockTime`] while the host crate binds them to the system clock.

use core::cell::Cell;

use crate::time::Timespec;

/// Source of absolute timestamps.
///
/// # Example
///
/// ```
/// use rail_ctrl_core::time::Timespec;
/// use rail_ctrl_core::traits::{MockTime, TimeSource};
///
/// fn elapsed<T: TimeSource>(time: &T, since: Timespec) -> Timespec {
///     time.now() - since
/// }
///
/// let time = MockTime::new();
/// time.advance(Timespec::from_millis(1500));
/// assert_eq!(elapsed(&time, Timespec::ZERO), Timespec::from_millis(1500));
/// ```
pub trait TimeSource {
    /// Current time
    fn now(&self) -> Timespec;

    /// Time elapsed since `reference`, computed with exact borrow.
    fn elapsed_since(&self, reference: Timespec) -> Timespec {
        self.now() - reference
    }
}

/// Blocking suspend primitive.
///
/// Callers must never pass a negative span; the scheduler clamps before
/// calling.
pub trait Delay {
    fn sleep(&mut self, span: Timespec);
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timespec {
        (**self).now()
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock clock with controllable time advancement.
///
/// Sleeping through `&MockTime` advances the clock by the requested span, so
/// a whole control loop can run deterministically without waiting. Share it
/// by reference between the controller and a test transport that simulates
/// exchange latency.
///
/// ```
/// use rail_ctrl_core::time::Timespec;
/// use rail_ctrl_core::traits::{Delay, MockTime, TimeSource};
///
/// let time = MockTime::new();
/// let mut delay = &time;
/// delay.sleep(Timespec::from_secs(2));
/// assert_eq!(time.now(), Timespec::from_secs(2));
/// assert_eq!(time.sleep_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockTime {
    current: Cell<Timespec>,
    sleeps: Cell<u32>,
    slept: Cell<Timespec>,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(start: Timespec) -> Self {
        let time = Self::default();
        time.set(start);
        time
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, now: Timespec) {
        self.current.set(now);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, span: Timespec) {
        self.current.set(self.current.get() + span);
    }

    /// Number of `sleep` calls so far
    pub fn sleep_count(&self) -> u32 {
        self.sleeps.get()
    }

    /// Total time spent in `sleep`
    pub fn total_slept(&self) -> Timespec {
        self.slept.get()
    }
}

impl TimeSource for MockTime {
    fn now(&self) -> Timespec {
        self.current.get()
    }
}

impl Delay for &MockTime {
    fn sleep(&mut self, span: Timespec) {
        debug_assert!(!span.is_negative(), "negative sleep requested");
        self.sleeps.set(self.sleeps.get() + 1);
        self.slept.set(self.slept.get() + span);
        self.advance(span);
    }
}
