//! Transport abstraction over the serial device
//!
//! The session talks to the adapter through the [`Transport`] capability
//! trait rather than a concrete port, so the exchange logic can run against
//! a scripted test double. Exactly one real implementation exists,
//! [`SerialTransport`], wrapping a `serialport` handle. Closing is
//! ownership-based: dropping the transport releases the device handle.

use serialport::SerialPort;
use std::io::{ErrorKind, Read, Write};

use super::serial::{clear_buffers, open_port};
use super::ProtocolError;

/// Byte-stream capability the session requires from a device connection
pub trait Transport: Send {
    /// Write raw bytes, returning how many the device accepted
    fn write(&mut self, data: &[u8]) -> Result<usize, ProtocolError>;

    /// Read whatever bytes are available into `buf`, returning the count.
    ///
    /// Returns `Ok(0)` when nothing arrived within the port's short slice
    /// timeout; never blocks beyond that.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, ProtocolError>;

    /// Discard any bytes already buffered on the input side
    fn discard_input(&mut self) -> Result<(), ProtocolError>;
}

/// Real transport over a serial port
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    /// Open and configure the serial device at `path`
    pub fn open(path: &str, baud_rate: u32) -> Result<Self, ProtocolError> {
        let port = open_port(path, baud_rate)?;
        Ok(Self { port })
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, data: &[u8]) -> Result<usize, ProtocolError> {
        self.port
            .write(data)
            .map_err(|e| ProtocolError::SerialError(e.to_string()))
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, ProtocolError> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            // The port-level slice timeout is the normal "nothing arrived
            // yet" signal, not a failure
            Err(ref e) if e.kind() == ErrorKind::TimedOut || e.kind() == ErrorKind::WouldBlock => {
                Ok(0)
            }
            Err(e) => Err(ProtocolError::SerialError(e.to_string())),
        }
    }

    fn discard_input(&mut self) -> Result<(), ProtocolError> {
        clear_buffers(self.port.as_mut())
    }
}
