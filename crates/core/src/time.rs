//! Second + nanosecond timestamps with exact carry/borrow arithmetic
//!
//! The scheduler keeps its absolute anchor as a [`Timespec`] and advances it
//! by whole periods, so every operation here must be exact. Nanoseconds are
//! always kept normalized in `[0, NANOS_PER_SEC)`; negative spans carry their
//! sign in `secs` only (e.g. -0.25 s is `{ secs: -1, nanos: 750_000_000 }`).

use core::cmp::Ordering;
use core::ops::{Add, Sub};
use core::time::Duration;

/// Nanoseconds in one second
pub const NANOS_PER_SEC: u32 = 1_000_000_000;

/// A point in time or a signed span, as seconds plus normalized nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timespec {
    pub secs: i64,
    pub nanos: u32,
}

impl Timespec {
    pub const ZERO: Timespec = Timespec { secs: 0, nanos: 0 };

    /// Build from parts that are already normalized.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `nanos >= NANOS_PER_SEC`; use
    /// [`Timespec::normalized`] for raw values.
    pub const fn new(secs: i64, nanos: u32) -> Self {
        debug_assert!(nanos < NANOS_PER_SEC);
        Self { secs, nanos }
    }

    /// Build from a seconds field and an unbounded nanoseconds field,
    /// carrying whole seconds out of `nanos`.
    pub const fn normalized(secs: i64, nanos: u64) -> Self {
        Self {
            secs: secs + (nanos / NANOS_PER_SEC as u64) as i64,
            nanos: (nanos % NANOS_PER_SEC as u64) as u32,
        }
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self { secs, nanos: 0 }
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self::normalized((millis / 1_000) as i64, (millis % 1_000) * 1_000_000)
    }

    /// `end - start`, borrowing one second when `end.nanos < start.nanos`
    pub const fn difference(end: Timespec, start: Timespec) -> Timespec {
        if end.nanos < start.nanos {
            Timespec {
                secs: end.secs - start.secs - 1,
                nanos: NANOS_PER_SEC - start.nanos + end.nanos,
            }
        } else {
            Timespec {
                secs: end.secs - start.secs,
                nanos: end.nanos - start.nanos,
            }
        }
    }

    /// `a + b`, carrying the nanosecond overflow into seconds
    pub const fn sum(a: Timespec, b: Timespec) -> Timespec {
        let nanos = a.nanos as u64 + b.nanos as u64;
        Timespec {
            secs: a.secs + b.secs + (nanos / NANOS_PER_SEC as u64) as i64,
            nanos: (nanos % NANOS_PER_SEC as u64) as u32,
        }
    }

    pub const fn is_negative(&self) -> bool {
        self.secs < 0
    }

    /// Negative spans become zero
    pub const fn clamp_non_negative(self) -> Timespec {
        if self.is_negative() {
            Timespec::ZERO
        } else {
            self
        }
    }

    /// Signed span in nanoseconds
    pub const fn as_nanos(&self) -> i128 {
        self.secs as i128 * NANOS_PER_SEC as i128 + self.nanos as i128
    }

    /// Convert a non-negative span for a suspend primitive; negative spans
    /// map to `Duration::ZERO`.
    pub const fn to_duration(self) -> Duration {
        let span = self.clamp_non_negative();
        Duration::new(span.secs as u64, span.nanos)
    }

    pub const fn from_duration(duration: Duration) -> Self {
        Self {
            secs: duration.as_secs() as i64,
            nanos: duration.subsec_nanos(),
        }
    }
}

impl Add for Timespec {
    type Output = Timespec;

    fn add(self, rhs: Timespec) -> Timespec {
        Timespec::sum(self, rhs)
    }
}

impl Sub for Timespec {
    type Output = Timespec;

    fn sub(self, rhs: Timespec) -> Timespec {
        Timespec::difference(self, rhs)
    }
}

impl Ord for Timespec {
    fn cmp(&self, other: &Self) -> Ordering {
        self.secs
            .cmp(&other.secs)
            .then(self.nanos.cmp(&other.nanos))
    }
}

impl PartialOrd for Timespec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difference_without_borrow() {
        let d = Timespec::difference(Timespec::new(12, 700), Timespec::new(10, 200));
        assert_eq!(d, Timespec::new(2, 500));
    }

    #[test]
    fn difference_borrows_a_second() {
        let end = Timespec::new(12, 100_000_000);
        let start = Timespec::new(10, 900_000_000);
        assert_eq!(Timespec::difference(end, start), Timespec::new(1, 200_000_000));
    }

    #[test]
    fn sum_carries_into_seconds() {
        let a = Timespec::new(3, 600_000_000);
        let b = Timespec::new(1, 700_000_000);
        assert_eq!(Timespec::sum(a, b), Timespec::new(5, 300_000_000));
    }

    #[test]
    fn sum_of_difference_restores_end() {
        let starts = [
            Timespec::new(0, 0),
            Timespec::new(10, 999_999_999),
            Timespec::new(1_700_000_000, 123_456_789),
        ];
        let spans = [
            Timespec::new(0, 1),
            Timespec::new(4, 999_999_999),
            Timespec::new(30, 500_000_000),
        ];
        for start in starts {
            for span in spans {
                let end = start + span;
                let delta = Timespec::difference(end, start);
                assert_eq!(delta, span);
                assert_eq!(Timespec::sum(delta, start), end);
            }
        }
    }

    #[test]
    fn overrun_yields_negative_remaining() {
        let period = Timespec::from_secs(5);
        let elapsed = Timespec::new(5, 250_000_000);
        let remaining = period - elapsed;
        assert!(remaining.is_negative());
        assert_eq!(remaining, Timespec::new(-1, 750_000_000));
        assert_eq!(remaining.as_nanos(), -250_000_000);
        assert_eq!(remaining.clamp_non_negative(), Timespec::ZERO);
        assert_eq!(remaining.to_duration(), Duration::ZERO);
    }

    #[test]
    fn normalized_carries_oversized_nanos() {
        let t = Timespec::normalized(5, 5_000_000_000);
        assert_eq!(t, Timespec::from_secs(10));
        assert_eq!(Timespec::from_millis(400), Timespec::new(0, 400_000_000));
        assert_eq!(Timespec::from_millis(61_250), Timespec::new(61, 250_000_000));
        assert_eq!(
            Timespec::from_millis(u64::MAX),
            Timespec::new((u64::MAX / 1_000) as i64, 615_000_000)
        );
    }

    #[test]
    fn ordering_compares_seconds_then_nanos() {
        assert!(Timespec::new(1, 5) < Timespec::new(1, 6));
        assert!(Timespec::new(-1, 999_999_999) < Timespec::ZERO);
        assert!(Timespec::new(2, 0) > Timespec::new(1, 999_999_999));
    }

    #[test]
    fn duration_round_trip_for_sleep() {
        let t = Timespec::new(3, 250);
        assert_eq!(Timespec::from_duration(t.to_duration()), t);
    }
}
