//! Simulated peer
//!
//! [`TrainSimulator`] stands in for the hardware on the other end of the
//! channel. It answers every request with a byte-exact frame from a small
//! plant model, seeded for reproducible runs, and can inject the fault
//! sentinel to exercise the emergency path.

mod plant;

pub use plant::Plant;

use heapless::HistoryBuffer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rail_ctrl_core::protocol::{Frame, Movement, Request, Response};
use rail_ctrl_core::transport::{Transport, TransportError};
use rail_ctrl_core::{log_error, log_trace, log_warn};

use crate::error::{RailError, Result};

/// Requests kept for inspection
pub const HISTORY_LEN: usize = 64;

/// Answer to a request the peer cannot parse
const REJECT: Frame = Frame::from_payload(*b"ERR:  NO");

/// Configuration for the simulated peer.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for deterministic runs. None = random.
    pub seed: Option<u64>,
    /// Answer with the fault sentinel once, after this many exchanges.
    pub fault_after: Option<u64>,
    /// Model seconds that pass per exchange.
    pub step_s: f32,
    /// Top speed of the train.
    pub max_speed: f32,
    /// Distance to the first station.
    pub initial_distance: u32,
    /// Range of distances between stations.
    pub station_min: u32,
    pub station_max: u32,
    /// Stop signals given at each station before departure.
    pub dwell: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            fault_after: None,
            step_s: 1.0,
            max_speed: 120.0,
            initial_distance: 30_000,
            station_min: 20_000,
            station_max: 60_000,
            dwell: 2,
        }
    }
}

/// In-process peer answering the wire protocol from a plant model
pub struct TrainSimulator {
    config: SimConfig,
    plant: Plant,
    rng: StdRng,
    exchanges: u64,
    faults: u32,
    history: HistoryBuffer<Request, HISTORY_LEN>,
}

impl TrainSimulator {
    /// Simulator for `config`; fails when the station range is empty
    pub fn new(config: SimConfig) -> Result<Self> {
        if config.station_min > config.station_max {
            return Err(RailError::StationRange {
                min: config.station_min,
                max: config.station_max,
            });
        }
        Ok(Self::build(config))
    }

    fn build(config: SimConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            plant: Plant::new(config.initial_distance),
            config,
            rng,
            exchanges: 0,
            faults: 0,
            history: HistoryBuffer::new(),
        }
    }

    /// Seeded simulator with default settings
    pub fn seeded(seed: u64) -> Self {
        Self::build(SimConfig {
            seed: Some(seed),
            ..SimConfig::default()
        })
    }

    pub fn plant(&self) -> &Plant {
        &self.plant
    }

    pub fn plant_mut(&mut self) -> &mut Plant {
        &mut self.plant
    }

    pub fn exchanges(&self) -> u64 {
        self.exchanges
    }

    /// Number of sentinels sent so far
    pub fn faults_injected(&self) -> u32 {
        self.faults
    }

    /// Most recent requests, oldest first
    pub fn recent_requests(&self) -> impl Iterator<Item = &Request> + '_ {
        self.history.oldest_ordered()
    }

    fn answer(&mut self, request: Request) -> Response {
        let plant = &mut self.plant;
        match request {
            Request::Speed => {
                let noise: f32 = self.rng.gen_range(-0.2..=0.2);
                let measured = ((plant.speed + noise).max(0.0) * 10.0).round() / 10.0;
                Response::Speed(measured)
            }
            Request::Slope => Response::Slope(plant.slope),
            Request::Light => Response::Light(plant.light),
            Request::Distance => Response::Distance((plant.distance.round() as u32).min(99_999)),
            Request::Movement => {
                if plant.try_dock(self.config.dwell) && plant.dwell_left > 0 {
                    plant.dwell_left -= 1;
                    Response::Movement(Movement::Stop)
                } else {
                    // leaving the platform, or rolling through it without stopping
                    if plant.docked || plant.distance <= 0.0 {
                        let next = self
                            .rng
                            .gen_range(self.config.station_min..=self.config.station_max);
                        plant.depart(next);
                    }
                    Response::Movement(Movement::Go)
                }
            }
            Request::Gas(switch) => {
                plant.gas = switch.is_set();
                Response::Ack(request.subsystem())
            }
            Request::Brake(switch) => {
                plant.brake = switch.is_set();
                Response::Ack(request.subsystem())
            }
            Request::Mixer(switch) => {
                plant.mixer = switch.is_set();
                Response::Ack(request.subsystem())
            }
            Request::Lamps(switch) => {
                plant.lamps = switch.is_set();
                Response::Ack(request.subsystem())
            }
            Request::FaultAck => {
                if !plant.emergency {
                    log_warn!("sim: controller reports emergency");
                }
                plant.emergency = true;
                Response::Ack(request.subsystem())
            }
        }
    }
}

impl Transport for TrainSimulator {
    fn exchange(&mut self, request: &Frame) -> core::result::Result<Frame, TransportError> {
        let seen = self.exchanges;
        self.exchanges += 1;

        let request = match Request::parse(request) {
            Ok(request) => request,
            Err(err) => {
                log_warn!("sim: rejecting request: {}", err);
                return Ok(REJECT);
            }
        };
        self.history.write(request);

        if self.config.fault_after == Some(seen) {
            log_warn!("sim: injecting fault sentinel after {} exchanges", seen);
            self.faults += 1;
            return Ok(Frame::FAULT);
        }

        self.plant
            .step(self.config.step_s, self.config.max_speed, &mut self.rng);
        let response = self.answer(request);
        match response.to_frame() {
            Ok(frame) => {
                let text = core::str::from_utf8(frame.payload()).unwrap_or("?");
                log_trace!("sim: {} answered {}", request.subsystem().name(), text);
                Ok(frame)
            }
            Err(err) => {
                log_error!("sim: cannot encode answer: {}", err);
                Ok(REJECT)
            }
        }
    }
}
