//! Train plant model driven by the simulated peer

use rand::Rng;

use rail_ctrl_core::protocol::Slope;

/// Gas acceleration, speed units per second
const GAS_ACCEL: f32 = 2.0;
/// Brake deceleration, speed units per second
const BRAKE_DECEL: f32 = 4.0;
/// Extra acceleration per unit of slope direction (downhill positive)
const SLOPE_ACCEL: f32 = 0.5;
/// Rolling resistance as a fraction of speed per second
const DRAG: f32 = 0.005;
/// Highest speed at which the train can dock at a station
const DOCK_SPEED: f32 = 10.0;
/// Model seconds for one full day/night light cycle
const DAY_LENGTH_S: f32 = 600.0;
/// Chance per step that the gradient changes
const SLOPE_CHANGE_P: f64 = 0.02;

/// Physical state of the simulated train and its actuators
#[derive(Debug, Clone)]
pub struct Plant {
    pub speed: f32,
    /// Distance to the next station
    pub distance: f32,
    pub slope: Slope,
    /// Ambient light in percent
    pub light: u8,
    pub gas: bool,
    pub brake: bool,
    pub mixer: bool,
    pub lamps: bool,
    /// Held at a station platform
    pub docked: bool,
    /// Stop signals still to give before departure
    pub dwell_left: u32,
    /// Peer has been told about an emergency
    pub emergency: bool,
    /// Model time in seconds
    pub time_s: f32,
}

impl Plant {
    pub fn new(distance: u32) -> Self {
        Self {
            speed: 0.0,
            distance: distance as f32,
            slope: Slope::Flat,
            light: 100,
            gas: false,
            brake: false,
            mixer: false,
            lamps: false,
            docked: false,
            dwell_left: 0,
            emergency: false,
            time_s: 0.0,
        }
    }

    /// Integrate `dt` seconds of motion and environment
    pub fn step<R: Rng>(&mut self, dt: f32, max_speed: f32, rng: &mut R) {
        self.time_s += dt;

        let phase = self.time_s / DAY_LENGTH_S * core::f32::consts::TAU;
        let light = 50.0 + 50.0 * phase.cos() + rng.gen_range(-3.0..=3.0);
        self.light = light.clamp(0.0, 100.0) as u8;

        if rng.gen_bool(SLOPE_CHANGE_P) {
            self.slope = match rng.gen_range(0..3) {
                0 => Slope::Down,
                1 => Slope::Flat,
                _ => Slope::Up,
            };
        }

        if self.docked {
            self.speed = 0.0;
            return;
        }

        let mut accel = -DRAG * self.speed - self.slope.direction() as f32 * SLOPE_ACCEL;
        if self.gas {
            accel += GAS_ACCEL;
        }
        if self.brake {
            accel -= BRAKE_DECEL;
        }
        self.speed = (self.speed + accel * dt).clamp(0.0, max_speed);
        self.distance = (self.distance - self.speed * dt).max(0.0);
    }

    /// Dock once at the platform and slow enough
    pub fn try_dock(&mut self, dwell: u32) -> bool {
        if !self.docked && self.distance <= 0.0 && self.speed <= DOCK_SPEED {
            self.docked = true;
            self.speed = 0.0;
            self.dwell_left = dwell;
        }
        self.docked
    }

    /// Leave the platform towards a station `distance` away
    pub fn depart(&mut self, distance: u32) {
        self.docked = false;
        self.distance = distance as f32;
    }
}
