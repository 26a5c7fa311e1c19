//! Message id definitions and inbound frame classification

use std::fmt;

use tracing::debug;

use antbeat_types::TelemetryFragment;

use crate::{
    broadcast,
    constants::response_codes::RESPONSE_NO_ERROR,
    error::{ChannelErrorEvent, Error, Result},
    frame::Frame,
};

/// Protocol message ids.
///
/// Host-to-radio ids cover the channel configuration sequence; the radio
/// answers with channel responses, broadcast data, or a startup message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageId {
    // Host to radio
    ResetSystem = 0x4A,
    SetNetworkKey = 0x46,
    AssignChannel = 0x42,
    SetRfFrequency = 0x45,
    SetChannelId = 0x51,
    SetChannelPeriod = 0x43,
    SetSearchTimeout = 0x44,
    EnableExtended = 0x6E,
    OpenChannel = 0x4B,
    CloseChannel = 0x4C,

    // Radio to host
    ChannelResponse = 0x40,
    BroadcastData = 0x4E,
    Startup = 0x6F,
}

impl MessageId {
    /// True for ids the radio sends to the host.
    pub fn is_inbound(self) -> bool {
        matches!(
            self,
            Self::ChannelResponse | Self::BroadcastData | Self::Startup
        )
    }

    /// Get message name
    pub fn name(self) -> &'static str {
        match self {
            Self::ResetSystem => "RESET_SYSTEM",
            Self::SetNetworkKey => "SET_NETWORK_KEY",
            Self::AssignChannel => "ASSIGN_CHANNEL",
            Self::SetRfFrequency => "SET_RF_FREQUENCY",
            Self::SetChannelId => "SET_CHANNEL_ID",
            Self::SetChannelPeriod => "SET_CHANNEL_PERIOD",
            Self::SetSearchTimeout => "SET_SEARCH_TIMEOUT",
            Self::EnableExtended => "ENABLE_EXTENDED",
            Self::OpenChannel => "OPEN_CHANNEL",
            Self::CloseChannel => "CLOSE_CHANNEL",
            Self::ChannelResponse => "CHANNEL_RESPONSE",
            Self::BroadcastData => "BROADCAST_DATA",
            Self::Startup => "STARTUP",
        }
    }
}

impl From<MessageId> for u8 {
    fn from(id: MessageId) -> u8 {
        id as u8
    }
}

impl TryFrom<u8> for MessageId {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x4A => Ok(Self::ResetSystem),
            0x46 => Ok(Self::SetNetworkKey),
            0x42 => Ok(Self::AssignChannel),
            0x45 => Ok(Self::SetRfFrequency),
            0x51 => Ok(Self::SetChannelId),
            0x43 => Ok(Self::SetChannelPeriod),
            0x44 => Ok(Self::SetSearchTimeout),
            0x6E => Ok(Self::EnableExtended),
            0x4B => Ok(Self::OpenChannel),
            0x4C => Ok(Self::CloseChannel),
            0x40 => Ok(Self::ChannelResponse),
            0x4E => Ok(Self::BroadcastData),
            0x6F => Ok(Self::Startup),
            _ => Err(Error::UnknownMessage(value)),
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}

/// Classification of one inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// Channel response with code 0: the command was accepted.
    ChannelAck {
        channel: u8,
        /// Id of the command being acknowledged.
        responding_to: u8,
    },

    /// Broadcast data carrying decoded telemetry fields.
    Telemetry(TelemetryFragment),

    /// Radio startup message; informational only.
    Startup,

    /// Id with no known meaning. Never fatal.
    Unrecognized(u8),
}

/// Classify one decoded frame.
///
/// Stateless: every frame is classified on its own. A channel response
/// with a non-zero code surfaces as [`Error::Channel`]; an id this engine
/// does not know is logged and reported as [`Dispatched::Unrecognized`].
pub fn dispatch(frame: &Frame) -> Result<Dispatched> {
    match MessageId::try_from(frame.msg_id) {
        Ok(MessageId::ChannelResponse) => {
            let payload = &frame.payload;
            if payload.len() != 3 {
                return Err(Error::InvalidLength { len: payload.len() });
            }

            let (channel, responding_to, code) = (payload[0], payload[1], payload[2]);
            if code != RESPONSE_NO_ERROR {
                return Err(Error::Channel(ChannelErrorEvent {
                    channel,
                    msg_id: responding_to,
                    code,
                }));
            }

            Ok(Dispatched::ChannelAck {
                channel,
                responding_to,
            })
        }

        Ok(MessageId::BroadcastData) => {
            // Channel-number byte followed by an 8-byte data page
            if frame.payload.len() < 9 {
                return Err(Error::InvalidLength {
                    len: frame.payload.len(),
                });
            }

            Ok(Dispatched::Telemetry(broadcast::decode(&frame.payload[1..])))
        }

        Ok(MessageId::Startup) => Ok(Dispatched::Startup),

        // Outbound ids echoed back, or ids we have no decoder for
        Ok(_) | Err(Error::UnknownMessage(_)) => {
            debug!(msg_id = format!("0x{:02X}", frame.msg_id), "unrecognized message");
            Ok(Dispatched::Unrecognized(frame.msg_id))
        }

        Err(e) => Err(e),
    }
}
