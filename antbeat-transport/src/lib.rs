//! Transport layer for the ANT protocol engine
//!
//! Abstracts the radio's duplex byte channel. USB device discovery and
//! endpoint binding are out of scope; anything that exposes the radio as
//! an async byte stream (a USB-serial gateway socket, a PTY, an in-memory
//! duplex in tests) plugs in through [`StreamTransport`].

pub mod error;
pub mod stream;

pub use error::{Error, Result};
pub use stream::StreamTransport;

use async_trait::async_trait;
use bytes::BytesMut;

/// Duplex byte channel carrying whole wire frames.
///
/// Protocol I/O is strictly sequential: one write followed by one read,
/// no pipelining. Implementations only need to preserve frame boundaries;
/// they never interpret frame contents.
#[async_trait]
pub trait Transport: Send {
    /// Write one encoded frame.
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Read exactly one frame, waiting until it is available.
    ///
    /// Callers that need prompt cancellation race this future against
    /// their shutdown signal; a cancelled read mid-frame may discard
    /// partial bytes, which is acceptable only during teardown.
    async fn receive(&mut self) -> Result<BytesMut>;
}
