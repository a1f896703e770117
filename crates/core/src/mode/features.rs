//! Enabled-mode presets

use crate::state::OperatingMode;

/// Modes enabled on top of Normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeatureSet {
    pub braking: bool,
    pub stop: bool,
    /// Sentinel detection, the fault latch and the Emergency mode
    pub emergency: bool,
}

impl FeatureSet {
    /// Normal mode only
    pub const BASIC: FeatureSet = FeatureSet {
        braking: false,
        stop: false,
        emergency: false,
    };

    /// Normal and Braking
    pub const BRAKING: FeatureSet = FeatureSet {
        braking: true,
        stop: false,
        emergency: false,
    };

    /// Normal, Braking and Stop
    pub const APPROACH: FeatureSet = FeatureSet {
        braking: true,
        stop: true,
        emergency: false,
    };

    /// All four modes
    pub const FULL: FeatureSet = FeatureSet {
        braking: true,
        stop: true,
        emergency: true,
    };

    pub const fn enables(self, mode: OperatingMode) -> bool {
        match mode {
            OperatingMode::Normal => true,
            OperatingMode::Braking => self.braking,
            OperatingMode::Stop => self.stop,
            OperatingMode::Emergency => self.emergency,
        }
    }

    /// Preset by profile name (`basic`, `braking`, `approach`, `full`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "basic" => Some(Self::BASIC),
            "braking" => Some(Self::BRAKING),
            "approach" => Some(Self::APPROACH),
            "full" => Some(Self::FULL),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match (self.braking, self.stop, self.emergency) {
            (false, false, false) => "basic",
            (true, false, false) => "braking",
            (true, true, false) => "approach",
            (true, true, true) => "full",
            _ => "custom",
        }
    }
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self::FULL
    }
}
