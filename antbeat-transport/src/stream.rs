//! Byte-stream transport
//!
//! Reassembles frame boundaries on top of any async byte stream. The
//! radio's bulk endpoints deliver one frame per transfer; a byte stream
//! loses that boundary, so reads go header-first: the two-byte
//! `[sync, length]` prefix tells us how many bytes complete the frame.

use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

use antbeat_core::constants::{FRAME_OVERHEAD, MAX_PAYLOAD_SIZE};

use crate::{error::*, Transport};

/// Transport over any `AsyncRead + AsyncWrite` byte stream.
pub struct StreamTransport<S> {
    stream: S,
}

impl<S> StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Give the underlying stream back, e.g. to shut it down.
    pub fn into_inner(self) -> S {
        self.stream
    }

    async fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        match self.stream.read_exact(buf).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Err(Error::Closed),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

#[async_trait::async_trait]
impl<S> Transport for StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        trace!("sending {} bytes: {}", data.len(), hex::encode(data));

        self.stream.write_all(data).await?;
        self.stream.flush().await?;

        Ok(())
    }

    async fn receive(&mut self) -> Result<BytesMut> {
        // [sync, length] first; length tells us how much is left
        let mut header = [0u8; 2];
        self.read_exact(&mut header).await?;

        let declared = header[1] as usize;
        if declared > MAX_PAYLOAD_SIZE {
            return Err(Error::FrameTooLarge { declared });
        }

        // msg id + payload + checksum
        let mut rest = vec![0u8; declared + FRAME_OVERHEAD - 2];
        self.read_exact(&mut rest).await?;

        let mut buf = BytesMut::with_capacity(declared + FRAME_OVERHEAD);
        buf.put_slice(&header);
        buf.put_slice(&rest);

        trace!("received {} bytes: {}", buf.len(), hex::encode(&buf));

        Ok(buf)
    }
}
