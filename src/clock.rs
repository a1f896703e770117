//! Wall-clock time source and sleeper

use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use rail_ctrl_core::time::Timespec;
use rail_ctrl_core::traits::{Delay, TimeSource};

/// Realtime clock backed by [`SystemTime`], suspending with
/// [`thread::sleep`].
///
/// Timestamps are realtime, like the anchor they are compared against, so
/// a wall-clock step shows up as one short or long tick and the anchor grid
/// is kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Timespec {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since_epoch) => Timespec::from_duration(since_epoch),
            Err(before_epoch) => Timespec::ZERO - Timespec::from_duration(before_epoch.duration()),
        }
    }
}

impl Delay for SystemClock {
    fn sleep(&mut self, span: Timespec) {
        thread::sleep(span.to_duration());
    }
}
