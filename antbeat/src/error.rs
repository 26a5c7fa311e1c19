//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Protocol error: {0}")]
    Protocol(#[from] antbeat_core::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] antbeat_transport::Error),

    #[error("Profile error: {0}")]
    Profile(#[from] antbeat_types::Error),

    #[error("Timed out waiting for the close-channel acknowledgment")]
    CloseTimeout,
}

impl Error {
    /// True for the routine "no data in this receive slot" channel event.
    /// The telemetry loop skips these; everything else is fatal.
    pub fn is_rx_fail(&self) -> bool {
        matches!(self, Self::Protocol(e) if e.is_rx_fail())
    }
}
