//! Serial Protocol Communication
//!
//! Implements the line-oriented ASCII command/response protocol spoken by
//! the OBD adapter microcontroller. One exchange is a single command byte
//! plus newline, answered by one terminated text line (or a fixed-length
//! acknowledgment for the clear command).

pub mod command;
mod error;
pub mod parser;
pub mod serial;
mod session;
mod transport;

pub use command::Command;
pub use error::ProtocolError;
pub use parser::ClearAck;
pub use serial::{clear_buffers, list_ports, open_port, PortInfo};
pub use session::{Session, SessionConfig, SessionState};
pub use transport::{SerialTransport, Transport};

/// Default serial device path
pub const DEFAULT_PORT: &str = "/dev/ttyACM0";

/// Default baud rate for adapter communication
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Per-read slice timeout applied at the port level, so that reads return
/// promptly with zero or more bytes instead of blocking
pub const PORT_READ_TIMEOUT_MS: u64 = 100;

/// Pause after opening the port, giving the adapter time to finish its
/// reset cycle before the first exchange. Hard device constraint.
pub const SETTLE_DELAY_MS: u64 = 2000;

/// Sleep between empty reads while accumulating a response
pub const POLL_INTERVAL_MS: u64 = 10;

/// Number of integer fields in a sensor response line
pub const SENSOR_FIELD_COUNT: usize = 5;

/// Exact length of the clear-DTCs acknowledgment (`1\r\n` or `0\r\n`)
pub const CLEAR_ACK_LEN: usize = 3;
