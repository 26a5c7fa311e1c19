//! In-memory transports and frame builders for tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use bytes::BytesMut;

use antbeat_core::Frame;
use antbeat_transport::{Error as TransportError, Transport};

/// Transport that records every sent frame and replays queued replies in
/// order. An empty reply queue reads as a closed connection.
pub struct ScriptedTransport {
    pub sent: Vec<Vec<u8>>,
    replies: VecDeque<Vec<u8>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            replies: VecDeque::new(),
        }
    }

    pub fn queue(&mut self, frame: Frame) {
        self.replies.push_back(frame.encode().unwrap().to_vec());
    }

    /// Message ids of everything sent so far, in order.
    pub fn sent_ids(&self) -> Vec<u8> {
        self.sent.iter().map(|frame| frame[2]).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.sent.push(data.to_vec());
        Ok(())
    }

    async fn receive(&mut self) -> Result<BytesMut, TransportError> {
        match self.replies.pop_front() {
            Some(reply) => Ok(BytesMut::from(reply.as_slice())),
            None => Err(TransportError::Closed),
        }
    }
}

/// Transport whose reads never complete; sends are swallowed.
pub struct PendingTransport;

#[async_trait]
impl Transport for PendingTransport {
    async fn send(&mut self, _data: &[u8]) -> Result<(), TransportError> {
        Ok(())
    }

    async fn receive(&mut self) -> Result<BytesMut, TransportError> {
        std::future::pending().await
    }
}

/// Channel response acknowledging `responding_to` with code 0.
pub fn ack(responding_to: u8) -> Frame {
    Frame::new(0x40, vec![1, responding_to, 0])
}

/// Channel response reporting a non-zero `code` for `responding_to`.
pub fn channel_error(responding_to: u8, code: u8) -> Frame {
    Frame::new(0x40, vec![1, responding_to, code])
}

/// Startup message, as the radio emits after a reset.
pub fn startup() -> Frame {
    Frame::new(0x6F, vec![0x20])
}

/// Broadcast frame for channel 1 wrapping the given decoder input.
pub fn broadcast(data: &[u8]) -> Frame {
    let mut payload = vec![1u8];
    payload.extend_from_slice(data);
    Frame::new(0x4E, payload)
}

/// Plain (non-extended) page payload with the given heart rate.
pub fn hr_page(heart_rate: u8) -> Vec<u8> {
    vec![0x04, 0, 0, 0, 0, 0, 0, heart_rate]
}
