//! Per-mode cycle statistics

use super::periodic::Tick;
use crate::time::Timespec;

/// Counters for the ticks run in one mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleStats {
    /// Ticks completed
    pub ticks: u64,
    /// Busy time of the most recent tick
    pub last_busy: Timespec,
    /// Longest busy time observed
    pub max_busy: Timespec,
    /// Ticks whose work ran past the period
    pub overruns: u32,
}

impl CycleStats {
    /// Fold one completed tick into the counters
    pub fn record(&mut self, tick: &Tick) {
        self.ticks = self.ticks.saturating_add(1);
        self.last_busy = tick.busy;
        if tick.busy > self.max_busy {
            self.max_busy = tick.busy;
        }
        if tick.overrun {
            self.overruns = self.overruns.saturating_add(1);
        }
    }
}
