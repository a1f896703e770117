//! Host-layer errors

use std::path::PathBuf;

/// Errors raised while setting up the host runtime.
///
/// The control loop itself never fails: once running, link problems are
/// handled by the fault latch.
#[derive(Debug, thiserror::Error)]
pub enum RailError {
    #[error("cannot open device {path}: {source}")]
    Device {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("--{0} requires a value")]
    MissingValue(&'static str),

    #[error("invalid value for --{name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("empty station distance range {min}..={max}")]
    StationRange { min: u32, max: u32 },
}

pub type Result<T> = core::result::Result<T, RailError>;
