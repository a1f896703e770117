//! Fixed-width ASCII request/response protocol
//!
//! Every exchange moves one [`Frame`]: eight ASCII data bytes followed by a
//! single `\n`. Requests are a subsystem tag, a colon and a right-aligned
//! four character verb (`"SPD: REQ"`, `"DS:  REQ"`); responses carry either
//! a value, a status marker or one of the enumerated words. Eight NUL bytes
//! plus the terminator is reserved as the transport fault sentinel.
//!
//! # Components
//!
//! - [`frame`]: the 9-byte frame and the fault sentinel
//! - [`request`]: requests the controller issues
//! - [`response`]: tagged response parser and encoder
//! - [`error`]: parse/encode failures

pub mod error;
pub mod frame;
pub mod request;
pub mod response;

pub use error::ProtocolError;
pub use frame::{Frame, Subsystem, FRAME_LEN, PAYLOAD_LEN, TERMINATOR};
pub use request::{Request, Switch};
pub use response::{Movement, Response, Slope};
