//! Broadcast data-page decoding
//!
//! A broadcast payload (after the channel-number byte) is an 8-byte data
//! page, optionally followed by extended message bytes when the radio has
//! extended messaging enabled.

use byteorder::{ByteOrder, LittleEndian};

use antbeat_types::TelemetryFragment;

/// Size of the fixed data page at the front of every broadcast.
pub const PAGE_LEN: usize = 8;

/// Page carrying manufacturer id and serial number.
pub const MANUFACTURER_INFO_PAGE: u8 = 2;

/// Decoder input length that signals extended message content (declared
/// broadcast payload of 20 minus the channel-number byte).
pub const EXTENDED_DATA_LEN: usize = 19;

/// Byte positions of the device number inside an extended broadcast,
/// relative to the first byte of the data page.
///
/// Captured empirically against an ANTUSB-m stick. Both the positions and
/// the big-endian byte order disagree with the published extended-data
/// layout; keep them here, in one place, until validated against more
/// hardware.
pub mod ext_offsets {
    pub const DEVICE_NUMBER_MSB: usize = 10;
    pub const DEVICE_NUMBER_LSB: usize = 11;
}

/// Decode one broadcast payload (channel-number byte already stripped).
///
/// The heart rate always sits in the final byte of the 8-byte page, no
/// matter which page it is. Page 2 additionally carries the manufacturer
/// id and a little-endian serial number. A field whose wire value is zero
/// is reported as `None`: the protocol uses zero to mean "absent".
///
/// Input shorter than [`PAGE_LEN`] carries no data page and decodes to an
/// empty fragment. The dispatcher's length check keeps frames off the
/// wire from ever being that short.
pub fn decode(data: &[u8]) -> TelemetryFragment {
    let mut fragment = TelemetryFragment::default();
    if data.len() < PAGE_LEN {
        return fragment;
    }

    // High bit is the page-change toggle
    let page = data[0] & 0x7F;
    if page == MANUFACTURER_INFO_PAGE {
        fragment.manufacturer_id = non_zero_u8(data[1]);
        fragment.serial = non_zero_u16(LittleEndian::read_u16(&data[2..4]));
    }

    fragment.heart_rate = non_zero_u8(data[PAGE_LEN - 1]);

    if data.len() == EXTENDED_DATA_LEN {
        let device_number = u16::from(data[ext_offsets::DEVICE_NUMBER_MSB]) << 8
            | u16::from(data[ext_offsets::DEVICE_NUMBER_LSB]);
        fragment.device_number = non_zero_u16(device_number);
    }

    fragment
}

fn non_zero_u8(value: u8) -> Option<u8> {
    (value != 0).then_some(value)
}

fn non_zero_u16(value: u16) -> Option<u16> {
    (value != 0).then_some(value)
}
