//! Response parsers
//!
//! Pure functions turning raw accumulated response bytes into validated
//! typed results. Nothing here touches the transport; the session hands in
//! whatever the accumulate loop collected and commits to the store only on
//! success.

use tracing::warn;

use super::{ProtocolError, CLEAR_ACK_LEN, SENSOR_FIELD_COUNT};
use crate::store::SensorReading;

/// Outcome of a clear-DTCs acknowledgment that matched a known literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearAck {
    /// The adapter confirmed the codes were cleared (`1\r\n`)
    Cleared,
    /// The adapter explicitly declined to clear (`0\r\n`)
    Refused,
}

/// Parse a sensor response line into a [`SensorReading`].
///
/// The line is split on commas and each token parsed as an integer. A token
/// that fails to parse is logged and skipped rather than aborting, so any
/// bad field surfaces as a count mismatch instead of a silently substituted
/// default. Exactly five integers must remain, mapped in fixed order:
/// coolant temperature, RPM, speed, tire pressure, MAF.
pub fn parse_sensor_line(raw: &[u8]) -> Result<SensorReading, ProtocolError> {
    let text = String::from_utf8_lossy(raw);

    let mut values = Vec::with_capacity(SENSOR_FIELD_COUNT);
    for token in text.split(',') {
        match token.trim().parse::<i32>() {
            Ok(v) => values.push(v),
            Err(_) => warn!("skipping unparsable sensor field {:?}", token.trim()),
        }
    }

    if values.len() != SENSOR_FIELD_COUNT {
        return Err(ProtocolError::InvalidFieldCount {
            expected: SENSOR_FIELD_COUNT,
            actual: values.len(),
            raw: text.trim_end().to_string(),
        });
    }

    Ok(SensorReading {
        coolant_temp: values[0],
        engine_rpm: values[1],
        vehicle_speed: values[2],
        tire_pressure: values[3],
        maf: values[4],
    })
}

/// Parse a DTC response line into its trimmed text.
///
/// Strips one trailing line terminator (`\n`, or `\r\n` if the peer sent a
/// carriage return too) and returns the rest verbatim. Empty means "no
/// codes"; the payload format is otherwise opaque to this layer.
pub fn parse_dtc_line(raw: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(raw).into_owned();
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

/// Parse the fixed 3-byte clear acknowledgment.
///
/// Only the first [`CLEAR_ACK_LEN`] bytes are considered. Exactly `1\r\n`
/// means cleared, exactly `0\r\n` means the peer declined; anything else,
/// including a short buffer at the deadline, is unrecognized.
pub fn parse_clear_ack(raw: &[u8]) -> Result<ClearAck, ProtocolError> {
    if raw.len() >= CLEAR_ACK_LEN {
        match &raw[..CLEAR_ACK_LEN] {
            b"1\r\n" => return Ok(ClearAck::Cleared),
            b"0\r\n" => return Ok(ClearAck::Refused),
            _ => {}
        }
    }
    Err(ProtocolError::UnrecognizedAck(
        String::from_utf8_lossy(raw).into_owned(),
    ))
}
