//! Channel configuration handshake

use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::{debug, info};

use antbeat_core::{constants::RESET_SETTLE, dispatch, CommandRequest, Dispatched, Frame};
use antbeat_transport::Transport;
use antbeat_types::DeviceProfile;

use crate::error::{Error, Result};

/// Time allowed for the close-channel acknowledgment during teardown.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Handshake progress. States advance strictly in declaration order;
/// [`Open`](ChannelState::Open) is the terminal success state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChannelState {
    /// No command sent yet.
    Idle,
    Reset,
    NetworkKeySet,
    ChannelAssigned,
    RfSet,
    IdSet,
    PeriodSet,
    TimeoutSet,
    ExtendedEnabled,
    Open,
    Closed,
}

/// Drives the ordered configuration sequence that opens a channel.
///
/// Each step sends exactly one command and waits for exactly one reply;
/// the first non-zero response code aborts the remaining sequence with no
/// retry.
pub struct ChannelConfigurator<'a, T: ?Sized> {
    transport: &'a mut T,
    profile: DeviceProfile,
    state: ChannelState,
}

impl<'a, T: Transport + ?Sized> ChannelConfigurator<'a, T> {
    pub fn new(transport: &'a mut T, profile: DeviceProfile) -> Self {
        Self {
            transport,
            profile,
            state: ChannelState::Idle,
        }
    }

    /// Current handshake state.
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Run the full configuration sequence and open the channel.
    ///
    /// # Errors
    ///
    /// Returns the first framing, transport, or channel error; on a
    /// channel error the radio's event is surfaced unchanged and no
    /// further commands are sent.
    pub async fn open(&mut self) -> Result<()> {
        self.profile.validate()?;

        info!(
            device_number = self.profile.device_number,
            device_type = self.profile.device_type,
            "configuring channel"
        );

        let steps = [
            (CommandRequest::reset(), ChannelState::Reset),
            (
                CommandRequest::set_network_key(&self.profile),
                ChannelState::NetworkKeySet,
            ),
            (
                CommandRequest::assign_channel(&self.profile),
                ChannelState::ChannelAssigned,
            ),
            (
                CommandRequest::set_rf_frequency(&self.profile),
                ChannelState::RfSet,
            ),
            (
                CommandRequest::set_channel_id(&self.profile),
                ChannelState::IdSet,
            ),
            (
                CommandRequest::set_channel_period(&self.profile),
                ChannelState::PeriodSet,
            ),
            (
                CommandRequest::set_search_timeout(&self.profile),
                ChannelState::TimeoutSet,
            ),
            (
                CommandRequest::enable_extended(),
                ChannelState::ExtendedEnabled,
            ),
            (
                CommandRequest::open_channel(&self.profile),
                ChannelState::Open,
            ),
        ];

        for (request, reached) in steps {
            self.exchange(&request).await?;
            self.state = reached;
            debug!(state = ?self.state, "configuration step acknowledged");

            if reached == ChannelState::Reset {
                // The radio ignores commands until it has settled
                sleep(RESET_SETTLE).await;
            }
        }

        info!("channel open");
        Ok(())
    }

    /// Best-effort teardown: one close-channel exchange with a bounded
    /// wait. Runs to completion even when external shutdown is already in
    /// progress, so a cancelled process still tries to close cleanly.
    pub async fn close(&mut self) -> Result<()> {
        let request = CommandRequest::close_channel(&self.profile);

        match timeout(CLOSE_TIMEOUT, self.exchange(&request)).await {
            Ok(Ok(_)) => {
                self.state = ChannelState::Closed;
                info!("channel closed");
                Ok(())
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(Error::CloseTimeout),
        }
    }

    /// One write, then one read. The radio offers no correlation ids, so
    /// the reply to each command is assumed to be the next inbound frame.
    ///
    /// Any classified reply counts as acceptance: a reset, for instance,
    /// is answered with a startup message rather than a channel response.
    async fn exchange(&mut self, request: &CommandRequest) -> Result<Dispatched> {
        debug!(command = %request.id, "sending");

        let encoded = request.to_frame().encode()?;
        self.transport.send(&encoded).await?;

        let raw = self.transport.receive().await?;
        let reply = Frame::decode(&raw)?;
        Ok(dispatch(&reply)?)
    }
}
