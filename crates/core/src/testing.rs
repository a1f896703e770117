//! Scripted peer and recording display for unit tests

use crate::display::DisplaySink;
use crate::protocol::{Frame, Movement, Request, Response, Slope};
use crate::time::Timespec;
use crate::traits::MockTime;
use crate::transport::{Transport, TransportError};

type Responder<'a> = Box<dyn FnMut(Request) -> Result<Frame, TransportError> + 'a>;

/// Default well-formed answer to every request
pub fn answer(request: Request) -> Frame {
    let response = match request {
        Request::Speed => Response::Speed(30.0),
        Request::Slope => Response::Slope(Slope::Flat),
        Request::Light => Response::Light(80),
        Request::Movement => Response::Movement(Movement::Stop),
        Request::Distance => Response::Distance(50_000),
        other => Response::Ack(other.subsystem()),
    };
    response.to_frame().unwrap()
}

/// Transport answering from a closure and recording every request
pub struct ScriptedPeer<'a> {
    time: &'a MockTime,
    latency: Timespec,
    responder: Responder<'a>,
    requests: Vec<Request>,
    exchanges: usize,
}

impl<'a> ScriptedPeer<'a> {
    pub fn new(time: &'a MockTime, mut respond: impl FnMut(Request) -> Frame + 'a) -> Self {
        Self::fallible(time, move |request| Ok(respond(request)))
    }

    pub fn fallible(
        time: &'a MockTime,
        respond: impl FnMut(Request) -> Result<Frame, TransportError> + 'a,
    ) -> Self {
        Self {
            time,
            latency: Timespec::ZERO,
            responder: Box::new(respond),
            requests: Vec::new(),
            exchanges: 0,
        }
    }

    /// Answers everything with [`answer`]
    pub fn healthy(time: &'a MockTime) -> Self {
        Self::new(time, answer)
    }

    /// Every exchange fails at the link level
    pub fn broken(time: &'a MockTime) -> Self {
        Self::fallible(time, |_| Err(TransportError::Io))
    }

    /// Advance the clock by `latency` on every exchange
    pub fn with_latency(mut self, latency: Timespec) -> Self {
        self.latency = latency;
        self
    }

    pub fn exchanges(&self) -> usize {
        self.exchanges
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn take_requests(&mut self) -> Vec<Request> {
        core::mem::take(&mut self.requests)
    }
}

impl Transport for ScriptedPeer<'_> {
    fn exchange(&mut self, request: &Frame) -> Result<Frame, TransportError> {
        let request = Request::parse(request).unwrap();
        self.exchanges += 1;
        self.requests.push(request);
        self.time.advance(self.latency);
        (self.responder)(request)
    }
}

/// One display call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shown {
    Speed(f32),
    Slope(Slope),
    Gas(bool),
    Brake(bool),
    Mixer(bool),
    Light(bool),
    Lamps(bool),
    Stop(bool),
    Distance(u32),
}

#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub shown: Vec<Shown>,
}

impl DisplaySink for RecordingDisplay {
    fn show_speed(&mut self, speed: f32) {
        self.shown.push(Shown::Speed(speed));
    }
    fn show_slope(&mut self, slope: Slope) {
        self.shown.push(Shown::Slope(slope));
    }
    fn show_gas(&mut self, on: bool) {
        self.shown.push(Shown::Gas(on));
    }
    fn show_brake(&mut self, on: bool) {
        self.shown.push(Shown::Brake(on));
    }
    fn show_mixer(&mut self, on: bool) {
        self.shown.push(Shown::Mixer(on));
    }
    fn show_light(&mut self, dark: bool) {
        self.shown.push(Shown::Light(dark));
    }
    fn show_lamps(&mut self, on: bool) {
        self.shown.push(Shown::Lamps(on));
    }
    fn show_stop(&mut self, stopped: bool) {
        self.shown.push(Shown::Stop(stopped));
    }
    fn show_distance(&mut self, distance: u32) {
        self.shown.push(Shown::Distance(distance));
    }
}
