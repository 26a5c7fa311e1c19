//! Per-device-class channel parameters.

use crate::error::{Error, Result};

/// Highest RF frequency the radio accepts (2400 + 124 MHz).
const MAX_RF_FREQUENCY: u8 = 124;

/// Channel configuration for one device class.
///
/// All parameters except `device_number` are fixed per class; new classes
/// are added as new constructors rather than by duplicating handshake
/// logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    /// Channel number the radio assigns for this pairing.
    pub channel_number: u8,

    /// Network number the channel is assigned to.
    pub network_number: u8,

    /// 0x00 = bidirectional slave (receives broadcasts).
    pub channel_type: u8,

    /// RF frequency offset from 2400 MHz.
    pub rf_frequency: u8,

    /// Transmission type; 0 matches any.
    pub transmission_type: u8,

    /// Device type the channel searches for.
    pub device_type: u8,

    /// Target device number; 0 pairs with the first sensor found.
    pub device_number: u16,

    /// Channel period in 1/32768 s units.
    pub channel_period: u16,

    /// Search timeout in 2.5 s units.
    pub search_timeout: u8,
}

impl DeviceProfile {
    /// Heart-rate monitor profile.
    ///
    /// 8070 counts gives the standard ~4.06 Hz broadcast rate; a search
    /// timeout of 12 allows 30 seconds to find a transmitting sensor.
    pub fn heart_rate(device_number: u16) -> Self {
        Self {
            channel_number: 1,
            network_number: 1,
            channel_type: 0x00,
            rf_frequency: 57,
            transmission_type: 0,
            device_type: 120,
            device_number,
            channel_period: 8070,
            search_timeout: 12,
        }
    }

    /// Validate the profile before it is pushed to the radio.
    pub fn validate(&self) -> Result<()> {
        if self.rf_frequency > MAX_RF_FREQUENCY {
            return Err(Error::Validation(format!(
                "RF frequency {} out of range (max {})",
                self.rf_frequency, MAX_RF_FREQUENCY
            )));
        }
        if self.channel_period == 0 {
            return Err(Error::Validation("channel period must be non-zero".into()));
        }
        Ok(())
    }
}
