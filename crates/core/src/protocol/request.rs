//! Requests issued by the controller

use super::error::ProtocolError;
use super::frame::{Frame, Subsystem, PAYLOAD_LEN};

/// Actuator switch verb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Switch {
    Set,
    Clear,
}

impl Switch {
    pub const fn from_bool(on: bool) -> Self {
        if on {
            Switch::Set
        } else {
            Switch::Clear
        }
    }

    pub const fn is_set(self) -> bool {
        matches!(self, Switch::Set)
    }

    const fn verb(self) -> &'static [u8] {
        match self {
            Switch::Set => b"SET",
            Switch::Clear => b"CLR",
        }
    }
}

/// One request frame, tagged by subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    Speed,
    Slope,
    Gas(Switch),
    Brake(Switch),
    Mixer(Switch),
    Light,
    Lamps(Switch),
    Movement,
    Distance,
    /// Announce the emergency to the peer (`ERR: SET`)
    FaultAck,
}

impl Request {
    pub const fn subsystem(self) -> Subsystem {
        match self {
            Request::Speed => Subsystem::Speed,
            Request::Slope => Subsystem::Slope,
            Request::Gas(_) => Subsystem::Gas,
            Request::Brake(_) => Subsystem::Brake,
            Request::Mixer(_) => Subsystem::Mixer,
            Request::Light => Subsystem::Light,
            Request::Lamps(_) => Subsystem::Lamps,
            Request::Movement => Subsystem::Movement,
            Request::Distance => Subsystem::Distance,
            Request::FaultAck => Subsystem::Error,
        }
    }

    const fn verb(self) -> &'static [u8] {
        match self {
            Request::Gas(s) | Request::Brake(s) | Request::Mixer(s) | Request::Lamps(s) => s.verb(),
            Request::FaultAck => Switch::Set.verb(),
            _ => b"REQ",
        }
    }

    /// Byte-exact frame, e.g. `"GAS: SET\n"` or `"DS:  REQ\n"`
    pub fn to_frame(self) -> Frame {
        let mut payload = [b' '; PAYLOAD_LEN];
        let prefix = self.subsystem().prefix();
        let verb = self.verb();
        payload[..prefix.len()].copy_from_slice(prefix);
        payload[PAYLOAD_LEN - verb.len()..].copy_from_slice(verb);
        Frame::from_payload(payload)
    }

    /// Parse a request frame, as a peer or simulator does
    pub fn parse(frame: &Frame) -> Result<Self, ProtocolError> {
        let (subsystem, _) = frame.split()?;
        let candidates: &[Request] = match subsystem {
            Subsystem::Speed => &[Request::Speed],
            Subsystem::Slope => &[Request::Slope],
            Subsystem::Light => &[Request::Light],
            Subsystem::Movement => &[Request::Movement],
            Subsystem::Distance => &[Request::Distance],
            Subsystem::Error => &[Request::FaultAck],
            Subsystem::Gas => &[Request::Gas(Switch::Set), Request::Gas(Switch::Clear)],
            Subsystem::Brake => &[Request::Brake(Switch::Set), Request::Brake(Switch::Clear)],
            Subsystem::Mixer => &[Request::Mixer(Switch::Set), Request::Mixer(Switch::Clear)],
            Subsystem::Lamps => &[Request::Lamps(Switch::Set), Request::Lamps(Switch::Clear)],
        };
        candidates
            .iter()
            .copied()
            .find(|r| r.to_frame() == *frame)
            .ok_or(ProtocolError::UnknownVerb(subsystem))
    }
}
