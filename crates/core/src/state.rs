//! Operating mode and sensor state owned by the control loop

use crate::protocol::Slope;
use crate::time::Timespec;

/// Controller operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    Normal,
    Braking,
    Stop,
    Emergency,
}

impl OperatingMode {
    pub const ALL: [OperatingMode; 4] = [
        OperatingMode::Normal,
        OperatingMode::Braking,
        OperatingMode::Stop,
        OperatingMode::Emergency,
    ];

    /// Get mode name for logging
    pub const fn name(self) -> &'static str {
        match self {
            OperatingMode::Normal => "Normal",
            OperatingMode::Braking => "Braking",
            OperatingMode::Stop => "Stop",
            OperatingMode::Emergency => "Emergency",
        }
    }

    /// Emergency has no outgoing transition
    pub const fn is_terminal(self) -> bool {
        matches!(self, OperatingMode::Emergency)
    }
}

/// Latest readings and actuator states.
///
/// Written by the task that reads the corresponding quantity and read by
/// tasks whose decisions depend on it (accelerate/brake use `speed`, the
/// braking distance task uses `speed`, lamps use `dark`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorState {
    pub speed: f32,
    pub slope: Slope,
    pub distance: u32,
    pub dark: bool,
    pub mixer_on: bool,
    /// When the mixer last changed state
    pub mixer_changed_at: Timespec,
}

impl SensorState {
    /// Fresh state; the mixer interval counts from `now`
    pub const fn new(now: Timespec) -> Self {
        Self {
            speed: 0.0,
            slope: Slope::Flat,
            distance: 0,
            dark: false,
            mixer_on: false,
            mixer_changed_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_emergency_is_terminal() {
        for mode in OperatingMode::ALL {
            assert_eq!(mode.is_terminal(), mode == OperatingMode::Emergency);
        }
    }

    #[test]
    fn sensor_state_starts_at_rest() {
        let state = SensorState::new(Timespec::from_secs(42));
        assert_eq!(state.speed, 0.0);
        assert_eq!(state.slope, Slope::Flat);
        assert!(!state.mixer_on);
        assert_eq!(state.mixer_changed_at, Timespec::from_secs(42));
    }
}
