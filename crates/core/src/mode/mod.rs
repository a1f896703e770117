//! Mode state machine configuration
//!
//! The four controller variants differ only in which modes they enable, so
//! they are one state machine parameterized by a [`FeatureSet`]. Each mode
//! runs a fixed schedule of steps; one step per tick, rotating modulo the
//! schedule length.
//!
//! # Contents
//!
//! - [`FeatureSet`] and its presets
//! - [`schedule`]: the per-mode step tables

mod features;
mod schedule;

pub use features::FeatureSet;
pub use schedule::{schedule, Schedule};
