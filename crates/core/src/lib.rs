//! rail_ctrl_core - Pure logic for the rail_ctrl supervisory controller
//!
//! This crate contains the platform-agnostic control loop: time
//! arithmetic, the wire protocol, the sensor/actuator tasks, the mode state
//! machine and the drift-free scheduler. It builds as `no_std` and is
//! tested on the host without hardware.
//!
//! # Design Principles
//!
//! - **Pure no_std**: std only with the `std` feature (stderr logging)
//! - **Trait abstractions**: transport, display, clock and delay injected
//! - **One owner**: all mutable state lives in one [`controller::Controller`]
//!
//! # Modules
//!
//! - [`time`]: second + nanosecond timestamps
//! - [`traits`]: time source and delay abstractions, mock clock
//! - [`protocol`]: fixed-width frames, requests and responses
//! - [`transport`]: request/response channel trait
//! - [`display`]: display sink trait
//! - [`fault`]: sticky fault latch
//! - [`state`]: operating mode and sensor state
//! - [`tasks`]: one task per sensor or actuator
//! - [`mode`]: feature presets and per-mode schedules
//! - [`scheduler`]: periodic tick timing and statistics
//! - [`config`]: controller settings
//! - [`controller`]: the mode dispatcher
//! - [`logging`]: log macros for defmt and stderr

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod logging;

pub mod config;
pub mod controller;
pub mod display;
pub mod fault;
pub mod mode;
pub mod protocol;
pub mod scheduler;
pub mod state;
pub mod tasks;
pub mod time;
pub mod traits;
pub mod transport;

#[cfg(test)]
mod testing;

pub use config::ControllerConfig;
pub use controller::Controller;
pub use state::OperatingMode;
