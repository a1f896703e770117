//! Drift-free periodic scheduler and cycle statistics
//!
//! The control loop is fully synchronous: run one step, then sleep until
//! the next absolute tick. This module owns only the timing; which tasks
//! run is decided by the controller.
//!
//! # Components
//!
//! - [`periodic`]: absolute-anchor tick timing ([`PeriodicScheduler`])
//! - [`stats`]: busy time and overrun counters ([`CycleStats`])
//!
//! # Example
//!
//! ```rust
//! use rail_ctrl_core::scheduler::PeriodicScheduler;
//! use rail_ctrl_core::time::Timespec;
//! use rail_ctrl_core::traits::{MockTime, TimeSource};
//!
//! let time = MockTime::new();
//! let mut scheduler = PeriodicScheduler::start(time.now(), Timespec::from_secs(5), 2);
//!
//! time.advance(Timespec::from_millis(1200)); // work done in the tick
//! scheduler.complete_tick(&time, &mut &time);
//!
//! assert_eq!(time.now(), Timespec::from_secs(5));
//! assert_eq!(scheduler.anchor(), Timespec::from_secs(5));
//! assert_eq!(scheduler.step(), 1);
//! ```

pub mod periodic;
pub mod stats;

pub use periodic::{PeriodicScheduler, Tick};
pub use stats::CycleStats;
