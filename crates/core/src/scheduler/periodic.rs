//! Absolute-anchor tick timing

use crate::log_warn;
use crate::time::Timespec;
use crate::traits::{Delay, TimeSource};

/// Timing of one completed tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// Time from the tick's target start to the end of its work
    pub busy: Timespec,
    /// Requested sleep after clamping
    pub slept: Timespec,
    /// Work ran past the end of the period
    pub overrun: bool,
}

/// Fixed-period tick clock for one mode run.
///
/// The anchor is the target start of the current tick. It only ever moves
/// by exactly one period, so tick `k` targets `start + k * period` however
/// long individual ticks take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeriodicScheduler {
    anchor: Timespec,
    period: Timespec,
    step: usize,
    steps: usize,
}

impl PeriodicScheduler {
    /// Capture the start anchor for a schedule of `steps` steps
    pub fn start(now: Timespec, period: Timespec, steps: usize) -> Self {
        debug_assert!(!period.is_negative());
        Self {
            anchor: now,
            period,
            step: 0,
            steps: steps.max(1),
        }
    }

    /// Target start of the current tick
    pub fn anchor(&self) -> Timespec {
        self.anchor
    }

    pub fn period(&self) -> Timespec {
        self.period
    }

    /// Step index of the current tick
    pub fn step(&self) -> usize {
        self.step
    }

    /// Close the current tick: sleep out the rest of the period, then move
    /// the anchor and the step index on.
    ///
    /// An overrun sleeps for zero and is reported, never treated as fatal.
    pub fn complete_tick<C, D>(&mut self, clock: &C, delay: &mut D) -> Tick
    where
        C: TimeSource + ?Sized,
        D: Delay + ?Sized,
    {
        let busy = clock.now() - self.anchor;
        let remaining = self.period - busy;
        let overrun = remaining.is_negative();
        if overrun {
            log_warn!(
                "tick overrun: busy {} ms, period {} ms",
                busy.as_nanos() / 1_000_000,
                self.period.as_nanos() / 1_000_000
            );
        }
        let slept = remaining.clamp_non_negative();
        delay.sleep(slept);

        self.anchor = self.anchor + self.period;
        self.step = (self.step + 1) % self.steps;
        Tick {
            busy,
            slept,
            overrun,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockTime;

    const PERIOD: Timespec = Timespec::from_secs(5);

    #[test]
    fn sleeps_out_remaining_period() {
        let time = MockTime::with_initial(Timespec::new(100, 250_000_000));
        let mut scheduler = PeriodicScheduler::start(time.now(), PERIOD, 2);
        time.advance(Timespec::from_millis(1_300));
        let tick = scheduler.complete_tick(&time, &mut &time);
        assert_eq!(tick.busy, Timespec::from_millis(1_300));
        assert_eq!(tick.slept, Timespec::from_millis(3_700));
        assert!(!tick.overrun);
        assert_eq!(time.now(), Timespec::new(105, 250_000_000));
    }

    #[test]
    fn anchor_advances_by_exact_period() {
        let start = Timespec::new(1_700_000_000, 999_000_000);
        let time = MockTime::with_initial(start);
        let mut scheduler = PeriodicScheduler::start(time.now(), PERIOD, 6);
        let jitter = [0u64, 17, 4_999, 250, 3, 1_200, 4_000, 0, 999];
        for (k, work_ms) in jitter.iter().enumerate() {
            let expected = start + Timespec::from_secs(5 * k as i64);
            assert_eq!(scheduler.anchor(), expected, "tick {}", k);
            assert_eq!(time.now(), expected, "tick {}", k);
            time.advance(Timespec::from_millis(*work_ms));
            scheduler.complete_tick(&time, &mut &time);
        }
    }

    #[test]
    fn overrun_clamps_and_keeps_anchor() {
        let time = MockTime::new();
        let mut scheduler = PeriodicScheduler::start(time.now(), PERIOD, 1);

        time.advance(Timespec::from_millis(6_500));
        let tick = scheduler.complete_tick(&time, &mut &time);
        assert!(tick.overrun);
        assert_eq!(tick.slept, Timespec::ZERO);
        assert_eq!(time.now(), Timespec::from_millis(6_500));
        assert_eq!(scheduler.anchor(), Timespec::from_secs(5));

        // next tick starts late but still targets the original grid
        time.advance(Timespec::from_millis(500));
        let tick = scheduler.complete_tick(&time, &mut &time);
        assert!(!tick.overrun);
        assert_eq!(time.now(), Timespec::from_secs(10));
        assert_eq!(scheduler.anchor(), Timespec::from_secs(10));
    }

    #[test]
    fn never_requests_negative_sleep() {
        let time = MockTime::new();
        let mut scheduler = PeriodicScheduler::start(time.now(), PERIOD, 1);
        for _ in 0..4 {
            time.advance(Timespec::from_secs(7));
            let tick = scheduler.complete_tick(&time, &mut &time);
            assert!(!tick.slept.is_negative());
        }
        assert_eq!(time.total_slept(), Timespec::ZERO);
        assert_eq!(time.sleep_count(), 4);
    }

    #[test]
    fn step_rotates_modulo_schedule_length() {
        let time = MockTime::new();
        let mut scheduler = PeriodicScheduler::start(time.now(), PERIOD, 6);
        let mut steps = [0usize; 8];
        for slot in steps.iter_mut() {
            *slot = scheduler.step();
            scheduler.complete_tick(&time, &mut &time);
        }
        assert_eq!(steps, [0, 1, 2, 3, 4, 5, 0, 1]);
    }
}
