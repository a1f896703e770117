//! Logging abstraction
//!
//! Provides unified logging macros that work across different targets:
//! - Embedded (`defmt` feature): forwards to defmt
//! - Host (`std` feature) and host tests: writes `[LEVEL] message` to stderr
//! - Anything else: no-op
//!
//! The macros are selected when this crate is compiled, so callers in other
//! crates get the backend chosen by `rail_ctrl_core`'s own features.

#[cfg(not(feature = "defmt"))]
use core::sync::atomic::{AtomicU8, Ordering};

/// Log level, ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl Level {
    /// Tag printed in front of each stderr line
    pub const fn tag(self) -> &'static str {
        match self {
            Level::Error => "[ERROR]",
            Level::Warn => "[WARN] ",
            Level::Info => "[INFO] ",
            Level::Debug => "[DEBUG]",
            Level::Trace => "[TRACE]",
        }
    }

    /// Parse a level name as given on a command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "error" => Some(Level::Error),
            "warn" => Some(Level::Warn),
            "info" => Some(Level::Info),
            "debug" => Some(Level::Debug),
            "trace" => Some(Level::Trace),
            _ => None,
        }
    }
}

#[cfg(not(feature = "defmt"))]
static MAX_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

/// Set the most verbose level that is still written.
///
/// With the `defmt` feature filtering is done by `DEFMT_LOG` at build time
/// and this call has no effect.
pub fn set_max_level(level: Level) {
    #[cfg(not(feature = "defmt"))]
    MAX_LEVEL.store(level as u8, Ordering::Relaxed);
    #[cfg(feature = "defmt")]
    let _ = level;
}

/// Whether a message at `level` passes the current filter
pub fn enabled(level: Level) -> bool {
    #[cfg(not(feature = "defmt"))]
    {
        (level as u8) <= MAX_LEVEL.load(Ordering::Relaxed)
    }
    #[cfg(feature = "defmt")]
    {
        let _ = level;
        true
    }
}

/// Write one formatted line for the stderr backend.
///
/// Used by the log macros; not intended to be called directly.
#[doc(hidden)]
pub fn emit(level: Level, args: core::fmt::Arguments<'_>) {
    if !enabled(level) {
        return;
    }

    #[cfg(any(test, feature = "std"))]
    std::eprintln!("{} {}", level.tag(), args);

    #[cfg(not(any(test, feature = "std")))]
    let _ = args;
}

/// Log error message
#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{ ::defmt::error!($($arg)*); }};
}

/// Log error message
#[cfg(not(feature = "defmt"))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        $crate::logging::emit($crate::logging::Level::Error, format_args!($($arg)*));
    }};
}

/// Log warning message
#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{ ::defmt::warn!($($arg)*); }};
}

/// Log warning message
#[cfg(not(feature = "defmt"))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        $crate::logging::emit($crate::logging::Level::Warn, format_args!($($arg)*));
    }};
}

/// Log informational message
#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{ ::defmt::info!($($arg)*); }};
}

/// Log informational message
#[cfg(not(feature = "defmt"))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        $crate::logging::emit($crate::logging::Level::Info, format_args!($($arg)*));
    }};
}

/// Log debug message
#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{ ::defmt::debug!($($arg)*); }};
}

/// Log debug message
#[cfg(not(feature = "defmt"))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        $crate::logging::emit($crate::logging::Level::Debug, format_args!($($arg)*));
    }};
}

/// Log trace message
#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{ ::defmt::trace!($($arg)*); }};
}

/// Log trace message
#[cfg(not(feature = "defmt"))]
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        $crate::logging::emit($crate::logging::Level::Trace, format_args!($($arg)*));
    }};
}
