//! Tagged response parser and encoder

use core::fmt::Write;

use heapless::String;

use super::error::ProtocolError;
use super::frame::{padded_payload, Frame, Subsystem};

/// Track gradient reported by the slope sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slope {
    Down,
    #[default]
    Flat,
    Up,
}

impl Slope {
    /// -1, 0 or 1 as shown on the slope indicator
    pub const fn direction(self) -> i8 {
        match self {
            Slope::Down => -1,
            Slope::Flat => 0,
            Slope::Up => 1,
        }
    }

    const fn word(self) -> &'static [u8] {
        match self {
            Slope::Down => b"DOWN",
            Slope::Flat => b"FLAT",
            Slope::Up => b"UP",
        }
    }
}

/// Go/stop signal read while halted at a station
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Movement {
    Go,
    Stop,
}

impl Movement {
    const fn word(self) -> &'static [u8] {
        match self {
            Movement::Go => b"GO",
            Movement::Stop => b"STOP",
        }
    }
}

const OK: &[u8] = b"OK";

/// Parsed response, one variant per response shape
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    Speed(f32),
    Slope(Slope),
    Light(u8),
    Movement(Movement),
    Distance(u32),
    /// `"  OK"` status for an actuator or the fault acknowledge
    Ack(Subsystem),
    /// Transport fault sentinel
    Fault,
}

impl Response {
    /// Parse a response frame.
    ///
    /// The sentinel parses to [`Response::Fault`]; anything not byte-exact
    /// for its tag is an error rather than a partial value.
    pub fn parse(frame: &Frame) -> Result<Self, ProtocolError> {
        if frame.is_fault() {
            return Ok(Response::Fault);
        }
        let (subsystem, field) = frame.split()?;
        match subsystem {
            Subsystem::Speed => parse_number::<f32>(field)
                .filter(|v| v.is_finite())
                .map(Response::Speed)
                .ok_or(ProtocolError::MalformedValue(subsystem)),
            Subsystem::Light => parse_number::<u8>(field)
                .filter(|v| *v <= 100)
                .map(Response::Light)
                .ok_or(ProtocolError::MalformedValue(subsystem)),
            Subsystem::Distance => parse_number::<u32>(field)
                .map(Response::Distance)
                .ok_or(ProtocolError::MalformedValue(subsystem)),
            Subsystem::Slope => [Slope::Down, Slope::Flat, Slope::Up]
                .into_iter()
                .find(|s| word_matches(subsystem, field, s.word()))
                .map(Response::Slope)
                .ok_or(ProtocolError::UnknownStatus(subsystem)),
            Subsystem::Movement => [Movement::Go, Movement::Stop]
                .into_iter()
                .find(|m| word_matches(subsystem, field, m.word()))
                .map(Response::Movement)
                .ok_or(ProtocolError::UnknownStatus(subsystem)),
            Subsystem::Gas
            | Subsystem::Brake
            | Subsystem::Mixer
            | Subsystem::Lamps
            | Subsystem::Error => {
                if word_matches(subsystem, field, OK) {
                    Ok(Response::Ack(subsystem))
                } else {
                    Err(ProtocolError::UnknownStatus(subsystem))
                }
            }
        }
    }

    /// Parse and require the answer to come from `expected`
    pub fn parse_for(frame: &Frame, expected: Subsystem) -> Result<Self, ProtocolError> {
        let response = Self::parse(frame)?;
        match response.subsystem() {
            Some(actual) if actual != expected => {
                Err(ProtocolError::UnexpectedSubsystem { expected, actual })
            }
            _ => Ok(response),
        }
    }

    pub fn subsystem(&self) -> Option<Subsystem> {
        match self {
            Response::Speed(_) => Some(Subsystem::Speed),
            Response::Slope(_) => Some(Subsystem::Slope),
            Response::Light(_) => Some(Subsystem::Light),
            Response::Movement(_) => Some(Subsystem::Movement),
            Response::Distance(_) => Some(Subsystem::Distance),
            Response::Ack(s) => Some(*s),
            Response::Fault => None,
        }
    }

    /// Encode into a byte-exact frame.
    ///
    /// Numbers are zero-padded to the field width (`"DS:00500"`, `"LIT:0042"`),
    /// speed keeps one decimal when it fits (`"SPD:55.0"`).
    pub fn to_frame(&self) -> Result<Frame, ProtocolError> {
        let mut field: String<8> = String::new();
        let subsystem = match *self {
            Response::Fault => return Ok(Frame::FAULT),
            Response::Speed(v) => {
                let width = Subsystem::Speed.field_width();
                if !v.is_finite() || v < 0.0 {
                    return Err(ProtocolError::FieldOverflow(Subsystem::Speed));
                }
                write!(field, "{:0width$.1}", v, width = width)
                    .map_err(|_| ProtocolError::FieldOverflow(Subsystem::Speed))?;
                if field.len() > width {
                    field.clear();
                    write!(field, "{:0width$.0}", v, width = width)
                        .map_err(|_| ProtocolError::FieldOverflow(Subsystem::Speed))?;
                }
                Subsystem::Speed
            }
            Response::Light(v) => {
                let width = Subsystem::Light.field_width();
                write!(field, "{:0width$}", v, width = width)
                    .map_err(|_| ProtocolError::FieldOverflow(Subsystem::Light))?;
                Subsystem::Light
            }
            Response::Distance(v) => {
                let width = Subsystem::Distance.field_width();
                write!(field, "{:0width$}", v, width = width)
                    .map_err(|_| ProtocolError::FieldOverflow(Subsystem::Distance))?;
                Subsystem::Distance
            }
            Response::Slope(s) => return word_frame(Subsystem::Slope, s.word()),
            Response::Movement(m) => return word_frame(Subsystem::Movement, m.word()),
            Response::Ack(s) => return word_frame(s, OK),
        };
        word_frame(subsystem, field.as_bytes())
    }
}

fn word_frame(subsystem: Subsystem, word: &[u8]) -> Result<Frame, ProtocolError> {
    padded_payload(subsystem, word).map(Frame::from_payload)
}

/// Field equals `word` right-aligned with spaces
fn word_matches(subsystem: Subsystem, field: &[u8], word: &[u8]) -> bool {
    let width = subsystem.field_width();
    field.len() == width
        && word.len() <= width
        && field[width - word.len()..] == *word
        && field[..width - word.len()].iter().all(|b| *b == b' ')
}

/// Numeric field padded with spaces on either side.
///
/// The sign is left to `T`: unsigned fields reject `-`, speed accepts it.
fn parse_number<T: core::str::FromStr>(field: &[u8]) -> Option<T> {
    let text = core::str::from_utf8(field).ok()?;
    let text = text.trim_matches(' ');
    if text.is_empty() || text.starts_with('+') {
        return None;
    }
    text.parse().ok()
}
