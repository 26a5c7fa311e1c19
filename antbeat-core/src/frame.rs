//! ANT wire frame structure and encoding/decoding

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

use crate::{
    checksum,
    constants::{FRAME_OVERHEAD, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE, MIN_FRAME_SIZE, SYNC},
    error::{Error, Result},
};

/// One unit of the wire protocol.
///
/// # Frame structure
///
/// ```text
/// ┌──────────┬──────────┬──────────┬───────────────┬──────────┐
/// │   Sync   │  Length  │  MsgId   │    Payload    │ Checksum │
/// │  1 byte  │  1 byte  │  1 byte  │ Length bytes  │  1 byte  │
/// │  (0xA4)  │          │          │               │  (XOR)   │
/// └──────────┴──────────┴──────────┴───────────────┴──────────┘
/// ```
///
/// The checksum is the XOR of every preceding byte, so a complete frame
/// XORs to zero. Total frame size never exceeds 56 bytes.
///
/// # Examples
///
/// ```
/// use antbeat_core::Frame;
///
/// let frame = Frame::new(0x4B, vec![0x01]);
/// let encoded = frame.encode().unwrap();
///
/// let decoded = Frame::decode(&encoded).unwrap();
/// assert_eq!(decoded.msg_id, 0x4B);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message id
    pub msg_id: u8,

    /// Message payload (id-specific data)
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame. Payload bounds are enforced by [`encode`],
    /// not here, so inbound frames of any shape can be represented.
    ///
    /// [`encode`]: Frame::encode
    pub fn new(msg_id: u8, payload: impl Into<Bytes>) -> Self {
        Self {
            msg_id,
            payload: payload.into(),
        }
    }

    /// Encode the frame to wire bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] when the payload is empty or would
    /// push the frame past the 56-byte limit.
    pub fn encode(&self) -> Result<BytesMut> {
        let len = self.payload.len();
        if len == 0 || len > MAX_PAYLOAD_SIZE {
            return Err(Error::InvalidLength { len });
        }

        let mut buf = BytesMut::with_capacity(len + FRAME_OVERHEAD);
        buf.put_u8(SYNC);
        buf.put_u8(len as u8);
        buf.put_u8(self.msg_id);
        buf.put_slice(&self.payload);

        // Written last so the whole frame XORs to zero
        buf.put_u8(checksum::xor(&buf));

        Ok(buf)
    }

    /// Decode a frame from wire bytes.
    ///
    /// Pure transform; checks run in a fixed order:
    ///
    /// 1. total size within 4..=56 bytes, else [`Error::InvalidLength`]
    /// 2. whole-frame XOR is zero, else [`Error::ChecksumMismatch`]
    /// 3. sync byte, else [`Error::InvalidSync`]
    /// 4. declared length matches, else [`Error::LengthMismatch`]
    ///
    /// The checksum runs before the sync check so that any single-bit
    /// corruption of a valid frame surfaces as [`Error::ChecksumMismatch`],
    /// including flips in the sync byte itself.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        if raw.len() < MIN_FRAME_SIZE || raw.len() > MAX_FRAME_SIZE {
            return Err(Error::InvalidLength { len: raw.len() });
        }

        let residue = checksum::residue(raw);
        if residue != 0 {
            return Err(Error::ChecksumMismatch { residue });
        }

        if raw[0] != SYNC {
            return Err(Error::InvalidSync { found: raw[0] });
        }

        let declared = raw[1];
        let actual = raw.len() - FRAME_OVERHEAD;
        if declared as usize != actual {
            return Err(Error::LengthMismatch { declared, actual });
        }

        Ok(Self {
            msg_id: raw[2],
            payload: Bytes::copy_from_slice(&raw[3..raw.len() - 1]),
        })
    }

    /// Total size of the encoded frame.
    pub fn size(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("msg_id", &format!("0x{:02X}", self.msg_id))
            .field("payload", &hex::encode(&self.payload))
            .finish()
    }
}
