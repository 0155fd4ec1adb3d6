//! Protocol commands
//!
//! Defines the three single-character commands the adapter understands,
//! together with each command's framing, response deadline, and
//! response-completion condition.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::CLEAR_ACK_LEN;

/// Commands for adapter communication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Request current sensor readings ('r' command)
    ReadSensors,

    /// Request stored diagnostic trouble codes ('d' command)
    ReadDtcs,

    /// Clear stored diagnostic trouble codes ('c' command)
    ClearDtcs,
}

impl Command {
    /// Get the single-character command byte
    pub fn byte(&self) -> u8 {
        match self {
            Command::ReadSensors => b'r',
            Command::ReadDtcs => b'd',
            Command::ClearDtcs => b'c',
        }
    }

    /// The command frame as sent on the wire: command byte plus newline
    pub fn frame(&self) -> [u8; 2] {
        [self.byte(), b'\n']
    }

    /// Default response deadline for this command.
    ///
    /// Generous values reflecting the adapter's expected latency; the DTC
    /// scan takes longest on the peer side.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Command::ReadSensors => Duration::from_millis(3000),
            Command::ReadDtcs => Duration::from_millis(5000),
            Command::ClearDtcs => Duration::from_millis(3000),
        }
    }

    /// Whether the accumulated response buffer is complete for this command.
    ///
    /// Line commands finish on the terminator; the clear acknowledgment is a
    /// fixed-length frame with no terminator of its own to wait for.
    pub fn response_complete(&self, buf: &[u8]) -> bool {
        match self {
            Command::ReadSensors | Command::ReadDtcs => buf.contains(&b'\n'),
            Command::ClearDtcs => buf.len() >= CLEAR_ACK_LEN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_bytes() {
        assert_eq!(Command::ReadSensors.byte(), b'r');
        assert_eq!(Command::ReadDtcs.byte(), b'd');
        assert_eq!(Command::ClearDtcs.byte(), b'c');
    }

    #[test]
    fn test_command_frame_is_terminated() {
        assert_eq!(Command::ReadSensors.frame(), *b"r\n");
        assert_eq!(Command::ClearDtcs.frame(), *b"c\n");
    }

    #[test]
    fn test_line_completion() {
        assert!(!Command::ReadSensors.response_complete(b"10,20,30"));
        assert!(Command::ReadSensors.response_complete(b"10,20,30,40,50\n"));
        assert!(Command::ReadDtcs.response_complete(b"\n"));
    }

    #[test]
    fn test_clear_completion_is_length_based() {
        assert!(!Command::ClearDtcs.response_complete(b"1\r"));
        assert!(Command::ClearDtcs.response_complete(b"1\r\n"));
        // A newline alone is not enough bytes for the fixed ack frame
        assert!(!Command::ClearDtcs.response_complete(b"\n"));
    }

    #[test]
    fn test_dtc_deadline_is_longest() {
        assert!(Command::ReadDtcs.default_timeout() > Command::ReadSensors.default_timeout());
        assert!(Command::ReadDtcs.default_timeout() > Command::ClearDtcs.default_timeout());
    }
}
