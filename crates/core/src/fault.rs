//! Sticky transport fault latch
//!
//! One fault-sentinel exchange anywhere taints the whole unit: the latch is
//! set once and never cleared for the lifetime of the controller. There is
//! deliberately no `reset`.

/// One-way fault flag consulted before every latched task
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultLatch {
    tripped: bool,
    trips: u32,
}

impl FaultLatch {
    pub const fn new() -> Self {
        Self {
            tripped: false,
            trips: 0,
        }
    }

    pub const fn is_set(&self) -> bool {
        self.tripped
    }

    /// Set the latch.
    ///
    /// Returns `true` only for the call that moved it from clear to set.
    pub fn trip(&mut self) -> bool {
        self.trips = self.trips.saturating_add(1);
        let first = !self.tripped;
        self.tripped = true;
        first
    }

    /// Number of faulted exchanges seen, including those after the first
    pub const fn trip_count(&self) -> u32 {
        self.trips
    }
}
