//! Settle-wait transport over a byte link
//!
//! The peer needs time between receiving a request and having its answer
//! ready, so every exchange is write, wait, read. Only the eight data bytes
//! travel on the link; the terminator is restored locally.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use std::thread;

use rail_ctrl_core::protocol::{Frame, PAYLOAD_LEN};
use rail_ctrl_core::time::Timespec;
use rail_ctrl_core::transport::{Transport, TransportError};
use rail_ctrl_core::{log_debug, log_warn};

use crate::error::{RailError, Result};

/// Delay between request and response on the hardware link
pub const DEFAULT_SETTLE: Timespec = Timespec::from_millis(400);

/// Blocking request/response transport over any `Read + Write` link
#[derive(Debug)]
pub struct SettledTransport<L> {
    link: L,
    settle: Timespec,
}

impl<L: Read + Write> SettledTransport<L> {
    pub fn new(link: L, settle: Timespec) -> Self {
        Self { link, settle }
    }

    pub fn settle(&self) -> Timespec {
        self.settle
    }

    pub fn into_inner(self) -> L {
        self.link
    }

    /// Read until `buf` is full or the link reports end of data
    fn read_payload(&mut self, buf: &mut [u8]) -> core::result::Result<usize, TransportError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.link.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    log_warn!("link read failed: {}", e);
                    return Err(TransportError::Io);
                }
            }
        }
        Ok(filled)
    }
}

impl SettledTransport<File> {
    /// Open a character device (serial port or I2C bridge) read/write
    pub fn open(path: impl AsRef<Path>, settle: Timespec) -> Result<Self> {
        let path = path.as_ref();
        let device = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| RailError::Device {
                path: path.to_path_buf(),
                source,
            })?;
        log_debug!("opened {}", path.display());
        Ok(Self::new(device, settle))
    }
}

impl<L: Read + Write> Transport for SettledTransport<L> {
    fn exchange(&mut self, request: &Frame) -> core::result::Result<Frame, TransportError> {
        if let Err(e) = self.link.write_all(request.payload()).and_then(|()| self.link.flush()) {
            log_warn!("link write failed: {}", e);
            return Err(TransportError::Io);
        }

        thread::sleep(self.settle.to_duration());

        let mut payload = [0u8; PAYLOAD_LEN];
        match self.read_payload(&mut payload)? {
            0 => Err(TransportError::Closed),
            PAYLOAD_LEN => Ok(Frame::from_payload(payload)),
            actual => Err(TransportError::ShortTransfer {
                expected: PAYLOAD_LEN,
                actual,
            }),
        }
    }
}
