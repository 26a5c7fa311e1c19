//! Error types for antbeat-core

use std::fmt;

use crate::constants::response_codes::EVENT_RX_FAIL;

/// Result type alias for core protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// A channel response (0x40) carrying a non-zero code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelErrorEvent {
    /// Channel the response refers to.
    pub channel: u8,

    /// Message id the radio is responding to, or 1 for unsolicited events.
    pub msg_id: u8,

    /// Response/event code.
    pub code: u8,
}

impl fmt::Display for ChannelErrorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "channel {} responded to message 0x{:02X} with code {}",
            self.channel, self.msg_id, self.code
        )
    }
}

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// First byte of a frame is not the sync byte
    #[error("Invalid sync byte: expected 0xA4, got 0x{found:02X}")]
    InvalidSync { found: u8 },

    /// Frame or payload size outside protocol bounds
    #[error("Invalid length: {len} bytes")]
    InvalidLength { len: usize },

    /// Declared length byte disagrees with the actual payload size
    #[error("Length mismatch: declared {declared} bytes, found {actual}")]
    LengthMismatch { declared: u8, actual: usize },

    /// XOR over the whole frame is non-zero
    #[error("Checksum mismatch: frame XOR residue 0x{residue:02X}")]
    ChecksumMismatch { residue: u8 },

    /// Message id with no known meaning
    #[error("Unknown message id: 0x{0:02X}")]
    UnknownMessage(u8),

    /// Radio reported an error on a channel
    #[error("Channel error: {0}")]
    Channel(ChannelErrorEvent),
}

impl Error {
    /// True for the EVENT_RX_FAIL channel event, which just means no data
    /// arrived in a receive slot. Recoverable while polling; every other
    /// error here is fatal at its call site.
    pub fn is_rx_fail(&self) -> bool {
        matches!(self, Self::Channel(event) if event.code == EVENT_RX_FAIL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rx_fail_is_recoverable() {
        let err = Error::Channel(ChannelErrorEvent {
            channel: 1,
            msg_id: 1,
            code: 2,
        });
        assert!(err.is_rx_fail());
    }

    #[test]
    fn test_other_channel_codes_are_not() {
        let err = Error::Channel(ChannelErrorEvent {
            channel: 1,
            msg_id: 0x42,
            code: 21,
        });
        assert!(!err.is_rx_fail());
    }

    #[test]
    fn test_framing_errors_are_not_recoverable() {
        assert!(!Error::ChecksumMismatch { residue: 0x11 }.is_rx_fail());
    }
}
