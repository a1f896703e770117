//! Platform-agnostic trait abstractions.
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Wall-clock implementations live in the host crate

pub mod time;

pub use time::{Delay, MockTime, TimeSource};
