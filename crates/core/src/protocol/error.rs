//! Protocol error types

use core::fmt;

use super::frame::Subsystem;

/// Failure to parse or encode a frame.
///
/// Malformed responses are a distinct error instead of a half-filled
/// buffer; tasks treat any of these as fail-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Raw byte slice is not exactly one frame long
    Length { expected: usize, actual: usize },
    /// Ninth byte is not the line terminator
    MissingTerminator,
    /// Payload does not start with a known subsystem tag
    UnknownTag,
    /// Value field of a numeric response does not parse
    MalformedValue(Subsystem),
    /// Status/enumerated field is not one of the recognized words
    UnknownStatus(Subsystem),
    /// Request verb is not `REQ`, `SET` or `CLR` as allowed for the tag
    UnknownVerb(Subsystem),
    /// Response answers a different subsystem than the one asked
    UnexpectedSubsystem { expected: Subsystem, actual: Subsystem },
    /// Encoded value does not fit the fixed field width
    FieldOverflow(Subsystem),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Length { expected, actual } => {
                write!(f, "frame length {} (expected {})", actual, expected)
            }
            ProtocolError::MissingTerminator => write!(f, "frame not terminated by newline"),
            ProtocolError::UnknownTag => write!(f, "unknown subsystem tag"),
            ProtocolError::MalformedValue(s) => write!(f, "malformed {} value", s.name()),
            ProtocolError::UnknownStatus(s) => write!(f, "unrecognized {} status", s.name()),
            ProtocolError::UnknownVerb(s) => write!(f, "unrecognized {} verb", s.name()),
            ProtocolError::UnexpectedSubsystem { expected, actual } => write!(
                f,
                "answer from {} while waiting for {}",
                actual.name(),
                expected.name()
            ),
            ProtocolError::FieldOverflow(s) => write!(f, "{} value does not fit its field", s.name()),
        }
    }
}
