//! Protocol constants

use std::time::Duration;

/// Frame sync byte; every frame starts with it.
pub const SYNC: u8 = 0xA4;

/// Bytes a frame adds around its payload: sync, length, message id, checksum.
pub const FRAME_OVERHEAD: usize = 4;

/// Smallest frame the radio emits (overhead with an empty payload slot).
pub const MIN_FRAME_SIZE: usize = FRAME_OVERHEAD;

/// Largest frame the radio's endpoints carry.
pub const MAX_FRAME_SIZE: usize = 56;

/// Largest payload that still fits a frame.
pub const MAX_PAYLOAD_SIZE: usize = MAX_FRAME_SIZE - FRAME_OVERHEAD;

/// ANT+ managed-network key, required to participate in the ANT+ network.
pub const NETWORK_KEY: [u8; 8] = [0xB9, 0xA5, 0x21, 0xFB, 0xBD, 0x72, 0xC3, 0x45];

/// Flag byte for the enable-extended-messages command: include channel id
/// data with every broadcast.
pub const EXTENDED_ENABLE_FLAGS: u8 = 0xE0;

/// Settling time the radio needs after a system reset before it accepts
/// the next command. Hardware requirement, not tunable.
pub const RESET_SETTLE: Duration = Duration::from_millis(500);

/// Channel response codes (payload byte 2 of a 0x40 message).
pub mod response_codes {
    /// Command accepted.
    pub const RESPONSE_NO_ERROR: u8 = 0;

    /// A receive slot passed without data; routine while a channel is
    /// searching for a sensor.
    pub const EVENT_RX_FAIL: u8 = 2;
}
