//! Controller configuration
//!
//! There is no configuration file; a [`ControllerConfig`] is built from a
//! [`FeatureSet`] preset and individual fields may be overridden before the
//! controller is constructed.

use crate::mode::FeatureSet;
use crate::time::Timespec;

/// Tick period of every mode but Emergency
pub const DEFAULT_PERIOD: Timespec = Timespec::from_secs(5);

/// Tick period of the Normal-only profile
pub const BASIC_PERIOD: Timespec = Timespec::from_secs(10);

/// Emergency tick period.
///
/// Built from the same constant in both the seconds and the nanoseconds
/// field (5 s + 5 000 000 000 ns), which normalizes to 10 s rather than a
/// half-second adjustment. Kept as is; override through
/// [`ControllerConfig::emergency_period`].
pub const EMERGENCY_PERIOD: Timespec = Timespec::normalized(5, 5_000_000_000);

/// Accelerate/brake boundary while cruising
pub const CRUISE_LIMIT: f32 = 55.0;

/// Accelerate/brake boundary while approaching a station
pub const APPROACH_LIMIT: f32 = 2.5;

/// Distance below which Normal hands over to Braking
pub const BRAKING_DISTANCE: u32 = 11_000;

/// Highest speed at which the train may be considered stopped
pub const STOP_SPEED: f32 = 10.0;

/// Minimum time between two mixer toggles
pub const MIXER_INTERVAL: Timespec = Timespec::from_secs(30);

/// Light level (percent) below which it is dark
pub const DARK_THRESHOLD: u8 = 50;

/// Typed controller settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// Enabled modes
    pub features: FeatureSet,
    /// Tick period for Normal, Braking and Stop
    pub period: Timespec,
    /// Tick period for Emergency
    pub emergency_period: Timespec,
    /// Normal-mode accelerate/brake boundary (`speed <= limit` accelerates)
    pub cruise_limit: f32,
    /// Braking-mode accelerate/brake boundary
    pub approach_limit: f32,
    /// Exclusive upper bound of the braking window
    pub braking_distance: u32,
    /// Speed at or below which a zero distance means arrived
    pub stop_speed: f32,
    /// Mixer toggles only once this much time has passed
    pub mixer_interval: Timespec,
    /// Light level below which lamps are switched on
    pub dark_threshold: u8,
}

impl ControllerConfig {
    /// Defaults for a feature preset
    pub const fn for_features(features: FeatureSet) -> Self {
        let period = if features.braking {
            DEFAULT_PERIOD
        } else {
            BASIC_PERIOD
        };
        Self {
            features,
            period,
            emergency_period: EMERGENCY_PERIOD,
            cruise_limit: CRUISE_LIMIT,
            approach_limit: APPROACH_LIMIT,
            braking_distance: BRAKING_DISTANCE,
            stop_speed: STOP_SPEED,
            mixer_interval: MIXER_INTERVAL,
            dark_threshold: DARK_THRESHOLD,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::for_features(FeatureSet::FULL)
    }
}
