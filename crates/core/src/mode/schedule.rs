//! Per-mode step tables

use crate::mode::FeatureSet;
use crate::state::OperatingMode;
use crate::tasks::{Drive, Task};

/// Steps of one mode; tick `n` runs `steps[n % steps.len()]` in order
pub type Schedule = &'static [&'static [Task]];

const BASIC: Schedule = &[&[
    Task::Slope,
    Task::Speed,
    Task::Gas(Drive::Cruise),
    Task::Brake(Drive::Cruise),
    Task::Mixer,
]];

const NORMAL: Schedule = &[
    &[
        Task::Slope,
        Task::Distance,
        Task::Mixer,
        Task::LightSensor,
        Task::Lamps,
    ],
    &[
        Task::Speed,
        Task::Gas(Drive::Cruise),
        Task::Brake(Drive::Cruise),
        Task::LightSensor,
        Task::Lamps,
    ],
];

const APPROACH_DISTANCE: &[Task] = &[
    Task::Speed,
    Task::Gas(Drive::Approach),
    Task::Brake(Drive::Approach),
    Task::Slope,
    Task::DistanceBraking,
];

const APPROACH_MIXER: &[Task] = &[
    Task::Speed,
    Task::Gas(Drive::Approach),
    Task::Brake(Drive::Approach),
    Task::Mixer,
];

const BRAKING: Schedule = &[
    APPROACH_DISTANCE,
    APPROACH_MIXER,
    APPROACH_DISTANCE,
    APPROACH_MIXER,
    APPROACH_DISTANCE,
    &[
        Task::Speed,
        Task::Gas(Drive::Approach),
        Task::Brake(Drive::Approach),
        Task::LampsOn,
    ],
];

const STOP: Schedule = &[&[Task::Movement, Task::Mixer, Task::LampsOn]];

const EMERGENCY: Schedule = &[
    &[Task::Slope, Task::Mixer, Task::FaultAck, Task::LampsOn],
    &[
        Task::Speed,
        Task::Gas(Drive::Halt),
        Task::Brake(Drive::Halt),
        Task::LampsOn,
    ],
];

/// Step table for `mode` under `features`.
///
/// Normal runs the single-step table when Braking is disabled and the
/// two-step table with distance and lamps otherwise.
pub fn schedule(mode: OperatingMode, features: FeatureSet) -> Schedule {
    match mode {
        OperatingMode::Normal if !features.braking => BASIC,
        OperatingMode::Normal => NORMAL,
        OperatingMode::Braking => BRAKING,
        OperatingMode::Stop => STOP,
        OperatingMode::Emergency => EMERGENCY,
    }
}
