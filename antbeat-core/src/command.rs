//! Outbound command construction
//!
//! Each channel-configuration command is a message id plus a bit-exact
//! payload. The payload layouts come straight from the radio's serial
//! message reference; multi-byte fields are little-endian.

use bytes::{BufMut, Bytes, BytesMut};

use antbeat_types::DeviceProfile;

use crate::{
    constants::{EXTENDED_ENABLE_FLAGS, NETWORK_KEY},
    frame::Frame,
    message::MessageId,
};

/// One outbound semantic unit: message id and payload, ready to frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub id: MessageId,
    pub payload: Bytes,
}

impl CommandRequest {
    fn new(id: MessageId, payload: impl Into<Bytes>) -> Self {
        Self {
            id,
            payload: payload.into(),
        }
    }

    /// System reset. The radio needs a settling delay afterwards, see
    /// [`RESET_SETTLE`](crate::constants::RESET_SETTLE).
    pub fn reset() -> Self {
        Self::new(MessageId::ResetSystem, Bytes::from_static(&[0x00]))
    }

    /// Install the ANT+ managed-network key on the profile's network.
    pub fn set_network_key(profile: &DeviceProfile) -> Self {
        let mut payload = BytesMut::with_capacity(1 + NETWORK_KEY.len());
        payload.put_u8(profile.network_number);
        payload.put_slice(&NETWORK_KEY);
        Self::new(MessageId::SetNetworkKey, payload.freeze())
    }

    /// Assign the channel with its type on the profile's network.
    pub fn assign_channel(profile: &DeviceProfile) -> Self {
        Self::new(
            MessageId::AssignChannel,
            vec![
                profile.channel_number,
                profile.channel_type,
                profile.network_number,
            ],
        )
    }

    pub fn set_rf_frequency(profile: &DeviceProfile) -> Self {
        Self::new(
            MessageId::SetRfFrequency,
            vec![profile.channel_number, profile.rf_frequency],
        )
    }

    /// Set the channel id: target device number (little-endian), device
    /// type, and transmission type.
    pub fn set_channel_id(profile: &DeviceProfile) -> Self {
        let mut payload = BytesMut::with_capacity(5);
        payload.put_u8(profile.channel_number);
        payload.put_u16_le(profile.device_number);
        payload.put_u8(profile.device_type);
        payload.put_u8(profile.transmission_type);
        Self::new(MessageId::SetChannelId, payload.freeze())
    }

    pub fn set_channel_period(profile: &DeviceProfile) -> Self {
        let mut payload = BytesMut::with_capacity(3);
        payload.put_u8(profile.channel_number);
        payload.put_u16_le(profile.channel_period);
        Self::new(MessageId::SetChannelPeriod, payload.freeze())
    }

    pub fn set_search_timeout(profile: &DeviceProfile) -> Self {
        Self::new(
            MessageId::SetSearchTimeout,
            vec![profile.channel_number, profile.search_timeout],
        )
    }

    /// Enable extended messages so broadcasts carry channel id data.
    pub fn enable_extended() -> Self {
        Self::new(
            MessageId::EnableExtended,
            Bytes::from_static(&[0x00, EXTENDED_ENABLE_FLAGS]),
        )
    }

    pub fn open_channel(profile: &DeviceProfile) -> Self {
        Self::new(MessageId::OpenChannel, vec![profile.channel_number])
    }

    pub fn close_channel(profile: &DeviceProfile) -> Self {
        Self::new(MessageId::CloseChannel, vec![profile.channel_number])
    }

    /// Wrap the command in a wire frame.
    pub fn to_frame(&self) -> Frame {
        Frame::new(self.id.into(), self.payload.clone())
    }
}
