//! Telemetry types shared between the decoder and the aggregation loop.

use chrono::{DateTime, Utc};

/// Fields decoded from a single broadcast frame.
///
/// The wire protocol uses zero as an "absent" sentinel. The decoder maps
/// those zeros to `None`, so a field that was genuinely missing from a
/// broadcast can never be confused with an observed value downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetryFragment {
    /// Computed heart rate in BPM.
    pub heart_rate: Option<u8>,

    /// Device number of the transmitting sensor (extended broadcasts only).
    pub device_number: Option<u16>,

    /// Manufacturer ID (page 2 broadcasts only).
    pub manufacturer_id: Option<u8>,

    /// Manufacturer serial number (page 2 broadcasts only).
    pub serial: Option<u16>,
}

impl TelemetryFragment {
    /// True when no field was present in the broadcast.
    pub fn is_empty(&self) -> bool {
        self.heart_rate.is_none()
            && self.device_number.is_none()
            && self.manufacturer_id.is_none()
            && self.serial.is_none()
    }
}

/// Last-known values merged from the broadcast stream.
///
/// Owned by a single aggregation loop; created when the channel opens and
/// discarded at shutdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedState {
    pub heart_rate: Option<u8>,
    pub device_number: Option<u16>,
    pub manufacturer_id: Option<u8>,
    pub serial: Option<u16>,

    /// When a fragment last contributed at least one field.
    pub last_seen: Option<DateTime<Utc>>,
}

impl AggregatedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a fragment field-by-field. A present field overwrites the
    /// stored value; an absent field never does, so a sensor that omits a
    /// field from one broadcast keeps its last-known value.
    ///
    /// Returns `true` when at least one field was applied.
    pub fn apply(&mut self, fragment: &TelemetryFragment) -> bool {
        if fragment.is_empty() {
            return false;
        }

        if let Some(hr) = fragment.heart_rate {
            self.heart_rate = Some(hr);
        }
        if let Some(device) = fragment.device_number {
            self.device_number = Some(device);
        }
        if let Some(manufacturer) = fragment.manufacturer_id {
            self.manufacturer_id = Some(manufacturer);
        }
        if let Some(serial) = fragment.serial {
            self.serial = Some(serial);
        }

        self.last_seen = Some(Utc::now());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fragment_is_empty() {
        assert!(TelemetryFragment::default().is_empty());

        let fragment = TelemetryFragment {
            heart_rate: Some(80),
            ..Default::default()
        };
        assert!(!fragment.is_empty());
    }

    #[test]
    fn test_apply_merges_present_fields() {
        let mut state = AggregatedState::new();

        let applied = state.apply(&TelemetryFragment {
            heart_rate: Some(80),
            manufacturer_id: Some(2),
            ..Default::default()
        });

        assert!(applied);
        assert_eq!(state.heart_rate, Some(80));
        assert_eq!(state.manufacturer_id, Some(2));
        assert_eq!(state.device_number, None);
        assert!(state.last_seen.is_some());
    }

    #[test]
    fn test_absent_fields_never_overwrite() {
        let mut state = AggregatedState::new();

        state.apply(&TelemetryFragment {
            heart_rate: Some(80),
            ..Default::default()
        });
        state.apply(&TelemetryFragment {
            device_number: Some(1234),
            ..Default::default()
        });

        assert_eq!(state.heart_rate, Some(80));
        assert_eq!(state.device_number, Some(1234));
    }

    #[test]
    fn test_empty_fragment_is_a_no_op() {
        let mut state = AggregatedState::new();
        state.apply(&TelemetryFragment {
            heart_rate: Some(80),
            ..Default::default()
        });
        let before = state.clone();

        let applied = state.apply(&TelemetryFragment::default());

        assert!(!applied);
        assert_eq!(state, before);
    }

    #[test]
    fn test_present_field_overwrites() {
        let mut state = AggregatedState::new();

        state.apply(&TelemetryFragment {
            heart_rate: Some(80),
            ..Default::default()
        });
        state.apply(&TelemetryFragment {
            heart_rate: Some(85),
            ..Default::default()
        });

        assert_eq!(state.heart_rate, Some(85));
    }
}
