//! Wire frame and subsystem tags

use core::fmt;

use super::error::ProtocolError;

/// Data bytes per frame
pub const PAYLOAD_LEN: usize = 8;
/// Data bytes plus terminator
pub const FRAME_LEN: usize = PAYLOAD_LEN + 1;
/// Line terminator closing every frame
pub const TERMINATOR: u8 = b'\n';

/// One request or response: 8 ASCII data bytes and a trailing `\n`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    /// Transport fault sentinel: eight NUL bytes and the terminator
    pub const FAULT: Frame = Frame([0, 0, 0, 0, 0, 0, 0, 0, TERMINATOR]);

    /// Frame around an exact 8-byte payload
    pub const fn from_payload(payload: [u8; PAYLOAD_LEN]) -> Self {
        let mut bytes = [TERMINATOR; FRAME_LEN];
        let mut i = 0;
        while i < PAYLOAD_LEN {
            bytes[i] = payload[i];
            i += 1;
        }
        Frame(bytes)
    }

    /// Frame from a payload text such as `"SPD:60.0"` (no terminator).
    pub fn from_text(text: &str) -> Result<Self, ProtocolError> {
        let bytes = text.as_bytes();
        let payload: [u8; PAYLOAD_LEN] =
            bytes.try_into().map_err(|_| ProtocolError::Length {
                expected: PAYLOAD_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self::from_payload(payload))
    }

    /// Frame from raw wire bytes; length and terminator are checked.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let raw: [u8; FRAME_LEN] = bytes.try_into().map_err(|_| ProtocolError::Length {
            expected: FRAME_LEN,
            actual: bytes.len(),
        })?;
        if raw[PAYLOAD_LEN] != TERMINATOR {
            return Err(ProtocolError::MissingTerminator);
        }
        Ok(Frame(raw))
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    pub fn payload(&self) -> &[u8] {
        &self.0[..PAYLOAD_LEN]
    }

    pub fn is_fault(&self) -> bool {
        *self == Self::FAULT
    }

    /// Split into subsystem tag and the field that follows it
    pub fn split(&self) -> Result<(Subsystem, &[u8]), ProtocolError> {
        let payload = self.payload();
        Subsystem::ALL
            .iter()
            .find(|s| payload.starts_with(s.prefix()))
            .map(|s| (*s, &payload[s.prefix().len()..]))
            .ok_or(ProtocolError::UnknownTag)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Frame(\"")?;
        for &b in self.payload() {
            match b {
                0 => f.write_str("\\0")?,
                0x20..=0x7e => write!(f, "{}", b as char)?,
                _ => write!(f, "\\x{:02x}", b)?,
            }
        }
        f.write_str("\\n\")")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Frame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Frame({=[u8]:a})", self.payload());
    }
}

/// Subsystem tag at the start of every payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Subsystem {
    Speed,
    Slope,
    Gas,
    Brake,
    Mixer,
    Light,
    Lamps,
    Movement,
    Distance,
    Error,
}

impl Subsystem {
    pub const ALL: [Subsystem; 10] = [
        Subsystem::Speed,
        Subsystem::Slope,
        Subsystem::Gas,
        Subsystem::Brake,
        Subsystem::Mixer,
        Subsystem::Light,
        Subsystem::Lamps,
        Subsystem::Movement,
        Subsystem::Distance,
        Subsystem::Error,
    ];

    /// Tag bytes including the colon
    pub const fn prefix(self) -> &'static [u8] {
        match self {
            Subsystem::Speed => b"SPD:",
            Subsystem::Slope => b"SLP:",
            Subsystem::Gas => b"GAS:",
            Subsystem::Brake => b"BRK:",
            Subsystem::Mixer => b"MIX:",
            Subsystem::Light => b"LIT:",
            Subsystem::Lamps => b"LAM:",
            Subsystem::Movement => b"STP:",
            Subsystem::Distance => b"DS:",
            Subsystem::Error => b"ERR:",
        }
    }

    /// Width of the field after the tag
    pub const fn field_width(self) -> usize {
        PAYLOAD_LEN - self.prefix().len()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Subsystem::Speed => "speed",
            Subsystem::Slope => "slope",
            Subsystem::Gas => "gas",
            Subsystem::Brake => "brake",
            Subsystem::Mixer => "mixer",
            Subsystem::Light => "light",
            Subsystem::Lamps => "lamps",
            Subsystem::Movement => "movement",
            Subsystem::Distance => "distance",
            Subsystem::Error => "error",
        }
    }
}

/// Write `prefix` then `field` right-aligned with spaces into a payload
pub(crate) fn padded_payload(
    subsystem: Subsystem,
    field: &[u8],
) -> Result<[u8; PAYLOAD_LEN], ProtocolError> {
    let prefix = subsystem.prefix();
    let width = subsystem.field_width();
    if field.len() > width {
        return Err(ProtocolError::FieldOverflow(subsystem));
    }
    let mut payload = [b' '; PAYLOAD_LEN];
    payload[..prefix.len()].copy_from_slice(prefix);
    payload[PAYLOAD_LEN - field.len()..].copy_from_slice(field);
    Ok(payload)
}
