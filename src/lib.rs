//! rail_ctrl - Supervisory mode controller for a rail vehicle
//!
//! Host runtime around [`rail_ctrl_core`]: the wall clock, a settle-wait
//! transport for the hardware link, a simulated peer and console display
//! sinks, plus the [`run`] entry point used by the bootstrap binary.

// Wall clock and sleeper
pub mod clock;

// Operator panel on the console
pub mod display;

// Host-layer errors
pub mod error;

// Simulated peer (train model)
pub mod sim;

// Settle-wait transport over a byte link
pub mod transport;

pub use rail_ctrl_core::config::ControllerConfig;
pub use rail_ctrl_core::display::DisplaySink;
pub use rail_ctrl_core::mode::FeatureSet;
pub use rail_ctrl_core::transport::Transport;
pub use rail_ctrl_core::{Controller, OperatingMode};

use clock::SystemClock;

/// Run the full controller (all four modes) on the system clock.
///
/// Never returns; the process runs until it is terminated externally.
pub fn run<T, S>(transport: T, sinks: S) -> !
where
    T: Transport,
    S: DisplaySink,
{
    run_with(ControllerConfig::default(), transport, sinks)
}

/// Run with an explicit configuration, e.g. a reduced [`FeatureSet`]
pub fn run_with<T, S>(config: ControllerConfig, transport: T, sinks: S) -> !
where
    T: Transport,
    S: DisplaySink,
{
    Controller::new(transport, sinks, SystemClock, SystemClock, config).run()
}
