//! Reading store
//!
//! Holds the last successfully parsed values from the adapter. The session
//! commits to the store only after a full exchange validates, so a partially
//! received or malformed response can never leave a half-updated state.

use serde::{Deserialize, Serialize};

/// One complete set of sensor values from a single successful exchange.
///
/// Fields arrive on the wire as five comma-separated integers in this
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Coolant temperature in °C
    pub coolant_temp: i32,
    /// Engine speed in RPM
    pub engine_rpm: i32,
    /// Vehicle speed in km/h
    pub vehicle_speed: i32,
    /// Tire pressure in PSI
    pub tire_pressure: i32,
    /// Mass air flow in g/s
    pub maf: i32,
}

/// Outcome of the most recent clear-DTCs attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClearStatus {
    /// No clear has been attempted this session
    #[default]
    NotAttempted,
    /// The adapter confirmed the codes were cleared
    Cleared,
    /// An attempt completed without clearing (declined, unrecognized
    /// acknowledgment, or timeout)
    Failed,
}

/// Last-known values, updated only on successful exchanges
#[derive(Debug, Clone, Default)]
pub struct ReadingStore {
    reading: Option<SensorReading>,
    dtcs: Option<String>,
    clear_status: ClearStatus,
}

impl ReadingStore {
    /// Replace the stored reading with a newly validated one
    pub fn record_reading(&mut self, reading: SensorReading) {
        self.reading = Some(reading);
    }

    /// Replace the stored DTC text with a newly fetched one
    pub fn record_dtcs(&mut self, codes: String) {
        self.dtcs = Some(codes);
    }

    /// Record the outcome of a clear attempt
    pub fn record_clear(&mut self, status: ClearStatus) {
        self.clear_status = status;
    }

    /// Last successful sensor reading, if any
    pub fn last_reading(&self) -> Option<SensorReading> {
        self.reading
    }

    /// Last fetched DTC text; `Some("")` means fetched with no codes,
    /// `None` means never fetched
    pub fn dtcs(&self) -> Option<&str> {
        self.dtcs.as_deref()
    }

    /// Outcome of the most recent clear attempt
    pub fn clear_status(&self) -> ClearStatus {
        self.clear_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_starts_empty() {
        let store = ReadingStore::default();
        assert!(store.last_reading().is_none());
        assert!(store.dtcs().is_none());
        assert_eq!(store.clear_status(), ClearStatus::NotAttempted);
    }

    #[test]
    fn test_record_reading_replaces_whole_value() {
        let mut store = ReadingStore::default();
        let first = SensorReading {
            coolant_temp: 90,
            engine_rpm: 850,
            vehicle_speed: 0,
            tire_pressure: 32,
            maf: 4,
        };
        store.record_reading(first);
        assert_eq!(store.last_reading(), Some(first));

        let second = SensorReading {
            coolant_temp: 95,
            engine_rpm: 2400,
            vehicle_speed: 60,
            tire_pressure: 32,
            maf: 18,
        };
        store.record_reading(second);
        assert_eq!(store.last_reading(), Some(second));
    }

    #[test]
    fn test_empty_dtcs_distinct_from_never_fetched() {
        let mut store = ReadingStore::default();
        assert!(store.dtcs().is_none());
        store.record_dtcs(String::new());
        assert_eq!(store.dtcs(), Some(""));
    }
}
