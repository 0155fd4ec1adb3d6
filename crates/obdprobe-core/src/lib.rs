//! # obdprobe Core Library
//!
//! Core functionality for the obdprobe OBD adapter polling tool.
//!
//! This library provides:
//! - Serial protocol communication with Arduino-based OBD adapters
//! - Parsing of sensor readings and diagnostic trouble codes (DTCs)
//! - A store holding the last successfully parsed values
//!
//! The adapter speaks a small line-oriented ASCII protocol: single-character
//! commands (`r` = read sensors, `d` = read DTCs, `c` = clear DTCs) each
//! followed by a newline, answered by a single text line (or a fixed-length
//! acknowledgment for clear).
//!
//! ## Example
//!
//! ```rust,ignore
//! use obdprobe_core::prelude::*;
//!
//! let mut session = Session::new(SessionConfig::default());
//! session.connect()?;
//!
//! let reading = session.read_sensors()?;
//! println!("RPM: {}", reading.engine_rpm);
//!
//! let codes = session.read_dtcs()?;
//! println!("DTCs: {}", codes);
//! ```

#![warn(missing_docs)]

pub mod protocol;
pub mod store;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::protocol::{
        list_ports, ClearAck, Command, PortInfo, ProtocolError, Session, SessionConfig,
        SessionState, Transport,
    };
    pub use crate::store::{ClearStatus, ReadingStore, SensorReading};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
