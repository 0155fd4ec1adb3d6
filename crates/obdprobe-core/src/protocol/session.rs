//! Session management
//!
//! Owns the transport, tracks connection state, and implements the three
//! protocol exchanges. Every exchange follows the same shape: flush stale
//! input, write the command frame, accumulate the response against a
//! deadline, parse, and commit to the store only on success.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::parser::{self, ClearAck};
use super::transport::{SerialTransport, Transport};
use super::{
    Command, ProtocolError, DEFAULT_BAUD_RATE, DEFAULT_PORT, POLL_INTERVAL_MS, SETTLE_DELAY_MS,
};
use crate::store::{ClearStatus, ReadingStore, SensorReading};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Not connected; all exchanges fail immediately
    Disconnected,
    /// Connected and ready for exchanges
    Connected,
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Serial device path
    pub port_name: String,
    /// Baud rate
    pub baud_rate: u32,
    /// Post-open pause for the adapter's reset cycle
    pub settle_delay: Duration,
    /// Response deadline for the sensor read exchange
    pub sensor_timeout: Duration,
    /// Response deadline for the DTC read exchange
    pub dtc_timeout: Duration,
    /// Response deadline for the clear exchange
    pub clear_timeout: Duration,
    /// Sleep between empty reads while accumulating a response
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            port_name: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            settle_delay: Duration::from_millis(SETTLE_DELAY_MS),
            sensor_timeout: Command::ReadSensors.default_timeout(),
            dtc_timeout: Command::ReadDtcs.default_timeout(),
            clear_timeout: Command::ClearDtcs.default_timeout(),
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
        }
    }
}

impl SessionConfig {
    fn timeout_for(&self, cmd: Command) -> Duration {
        match cmd {
            Command::ReadSensors => self.sensor_timeout,
            Command::ReadDtcs => self.dtc_timeout,
            Command::ClearDtcs => self.clear_timeout,
        }
    }
}

/// Adapter session: owns the transport and the last-known values
pub struct Session {
    /// Transport handle; `None` while disconnected
    transport: Option<Box<dyn Transport>>,
    /// Current session state
    state: SessionState,
    /// Session configuration
    config: SessionConfig,
    /// Last successfully parsed values
    store: ReadingStore,
}

impl Session {
    /// Create a new session (not yet connected)
    pub fn new(config: SessionConfig) -> Self {
        Self {
            transport: None,
            state: SessionState::Disconnected,
            config,
            store: ReadingStore::default(),
        }
    }

    /// Create a session over an already open transport.
    ///
    /// The session starts `Connected` and skips the open/settle sequence;
    /// intended for test doubles and alternate transports.
    pub fn with_transport(config: SessionConfig, transport: Box<dyn Transport>) -> Self {
        Self {
            transport: Some(transport),
            state: SessionState::Connected,
            config,
            store: ReadingStore::default(),
        }
    }

    /// Get current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Get the session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Last successfully parsed sensor reading, if any exchange succeeded yet
    pub fn last_reading(&self) -> Option<SensorReading> {
        self.store.last_reading()
    }

    /// Last successfully fetched DTC text (`Some("")` = fetched, no codes)
    pub fn dtcs(&self) -> Option<&str> {
        self.store.dtcs()
    }

    /// Outcome of the most recent clear attempt
    pub fn clear_status(&self) -> ClearStatus {
        self.store.clear_status()
    }

    /// Connect to the adapter.
    ///
    /// Opens and configures the device, discards anything already buffered
    /// on the line, then waits out the adapter's reset cycle before handing
    /// the session to the caller. The reset chatter that arrives during the
    /// wait is discarded too.
    pub fn connect(&mut self) -> Result<(), ProtocolError> {
        if self.state == SessionState::Connected {
            return Err(ProtocolError::AlreadyConnected);
        }

        info!(
            "connecting to {} at {} baud",
            self.config.port_name, self.config.baud_rate
        );
        let mut transport = SerialTransport::open(&self.config.port_name, self.config.baud_rate)?;
        transport.discard_input()?;

        debug!(
            "waiting {}ms for adapter reset",
            self.config.settle_delay.as_millis()
        );
        std::thread::sleep(self.config.settle_delay);
        transport.discard_input()?;

        self.transport = Some(Box::new(transport));
        self.state = SessionState::Connected;
        info!("connected");
        Ok(())
    }

    /// Disconnect from the adapter. Idempotent; dropping the transport
    /// releases the device handle.
    pub fn disconnect(&mut self) {
        if self.transport.take().is_some() {
            info!("disconnected");
        }
        self.state = SessionState::Disconnected;
    }

    /// Request current sensor readings.
    ///
    /// On success the store is updated atomically with the new reading; on
    /// any failure the previously stored values are retained.
    pub fn read_sensors(&mut self) -> Result<SensorReading, ProtocolError> {
        let raw = self.exchange(Command::ReadSensors)?;
        let reading = parser::parse_sensor_line(&raw)?;
        self.store.record_reading(reading);
        Ok(reading)
    }

    /// Request stored diagnostic trouble codes.
    ///
    /// Returns the trimmed DTC text; empty means the adapter reports no
    /// codes.
    pub fn read_dtcs(&mut self) -> Result<String, ProtocolError> {
        let raw = self.exchange(Command::ReadDtcs)?;
        let codes = parser::parse_dtc_line(&raw);
        self.store.record_dtcs(codes.clone());
        Ok(codes)
    }

    /// Ask the adapter to clear stored trouble codes.
    ///
    /// `Ok(ClearAck::Cleared)` means the adapter confirmed;
    /// `Ok(ClearAck::Refused)` means it explicitly declined, which is a
    /// recognized outcome distinct from an unrecognized or timed-out
    /// acknowledgment. Any completed attempt that did not clear records
    /// [`ClearStatus::Failed`] in the store.
    pub fn clear_dtcs(&mut self) -> Result<ClearAck, ProtocolError> {
        if self.state != SessionState::Connected {
            return Err(ProtocolError::NotConnected);
        }

        let outcome = self
            .exchange(Command::ClearDtcs)
            .and_then(|raw| parser::parse_clear_ack(&raw));

        match outcome {
            Ok(ClearAck::Cleared) => {
                self.store.record_clear(ClearStatus::Cleared);
                info!("adapter cleared stored DTCs");
                Ok(ClearAck::Cleared)
            }
            Ok(ClearAck::Refused) => {
                self.store.record_clear(ClearStatus::Failed);
                warn!("adapter declined to clear DTCs");
                Ok(ClearAck::Refused)
            }
            Err(e) => {
                self.store.record_clear(ClearStatus::Failed);
                Err(e)
            }
        }
    }

    /// One request/response exchange: flush, write the command frame, then
    /// accumulate bytes until the command's completion condition holds or
    /// the deadline elapses.
    fn exchange(&mut self, cmd: Command) -> Result<Vec<u8>, ProtocolError> {
        if self.state != SessionState::Connected {
            return Err(ProtocolError::NotConnected);
        }
        let timeout = self.config.timeout_for(cmd);
        let poll_interval = self.config.poll_interval;
        let transport = self.transport.as_mut().ok_or(ProtocolError::NotConnected)?;

        // Flush-before-send: a response must never be mistaken for leftover
        // bytes from an earlier exchange
        transport.discard_input()?;

        let frame = cmd.frame();
        debug!("exchange {:?}: sending {:02x?}", cmd, frame);
        let wrote = transport.write(&frame)?;
        if wrote != frame.len() {
            return Err(ProtocolError::ShortWrite {
                expected: frame.len(),
                wrote,
            });
        }

        let start = Instant::now();
        let deadline = start + timeout;
        let mut response = Vec::new();
        let mut chunk = [0u8; 128];

        loop {
            if cmd.response_complete(&response) {
                break;
            }
            if Instant::now() >= deadline {
                // A partial clear acknowledgment at the deadline is an
                // unrecognized frame carrying the offending bytes, not a
                // silent timeout; only a fully empty window times out
                if cmd == Command::ClearDtcs && !response.is_empty() {
                    debug!(
                        "exchange {:?}: deadline elapsed with partial ack ({} bytes)",
                        cmd,
                        response.len()
                    );
                    break;
                }
                debug!(
                    "exchange {:?}: deadline elapsed with {} bytes",
                    cmd,
                    response.len()
                );
                return Err(ProtocolError::Timeout);
            }

            let n = transport.read_available(&mut chunk)?;
            if n > 0 {
                response.extend_from_slice(&chunk[..n]);
                debug!(
                    "exchange {:?}: read {} bytes, total {}",
                    cmd,
                    n,
                    response.len()
                );
            } else {
                std::thread::sleep(poll_interval);
            }
        }

        debug!(
            "exchange {:?}: complete with {} bytes in {}ms",
            cmd,
            response.len(),
            start.elapsed().as_millis()
        );
        Ok(response)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.disconnect();
    }
}
