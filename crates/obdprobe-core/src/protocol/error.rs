//! Protocol errors

use thiserror::Error;

/// Errors that can occur during protocol communication
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Opening or configuring the serial device failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// An exchange was attempted while the session is closed
    #[error("Not connected to adapter")]
    NotConnected,

    /// Connect was called on an already open session
    #[error("Already connected")]
    AlreadyConnected,

    /// Transport-level I/O failure during an exchange
    #[error("Serial port error: {0}")]
    SerialError(String),

    /// The port accepted fewer bytes than the command frame
    #[error("Short write: wrote {wrote} of {expected} bytes")]
    ShortWrite {
        /// Bytes in the command frame
        expected: usize,
        /// Bytes the port accepted
        wrote: usize,
    },

    /// The response deadline elapsed before the completion condition held
    #[error("Response timeout")]
    Timeout,

    /// Sensor response did not contain the expected number of integers
    #[error("Expected {expected} sensor fields, got {actual} in {raw:?}")]
    InvalidFieldCount {
        /// Fields required by the schema
        expected: usize,
        /// Fields that parsed cleanly
        actual: usize,
        /// The offending response text
        raw: String,
    },

    /// Clear acknowledgment matched neither the success nor failure literal
    #[error("Unrecognized clear acknowledgment: {0:?}")]
    UnrecognizedAck(String),

    /// Underlying I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
