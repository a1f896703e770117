//! Request/response channel consumed by the tasks

use core::fmt;

use crate::protocol::Frame;

/// Link failure reported by a transport instead of a response frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Underlying device read or write failed
    Io,
    /// Fewer bytes than a frame were moved
    ShortTransfer { expected: usize, actual: usize },
    /// Peer is gone
    Closed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Io => write!(f, "device I/O failed"),
            TransportError::ShortTransfer { expected, actual } => {
                write!(f, "short transfer: {} of {} bytes", actual, expected)
            }
            TransportError::Closed => write!(f, "peer closed the channel"),
        }
    }
}

/// Synchronous request/response exchange.
///
/// Blocks until the peer has answered. A fault on the far side is reported
/// in-band as [`Frame::FAULT`]; `Err` is for failures of the link itself.
pub trait Transport {
    fn exchange(&mut self, request: &Frame) -> Result<Frame, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn exchange(&mut self, request: &Frame) -> Result<Frame, TransportError> {
        (**self).exchange(request)
    }
}
