//! Outbound notification seam
//!
//! The telemetry loop pushes heart-rate changes to a [`Notifier`]. What
//! sits behind it (a smart-light bridge, a metrics sink) is a
//! collaborator concern; its failures are logged by the loop and never
//! interrupt polling.

use async_trait::async_trait;
use tracing::info;

#[cfg(test)]
use mockall::automock;

/// Failure from a notifier backend.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct NotifyError(#[from] pub anyhow::Error);

/// External consumer of heart-rate updates.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Push a heart-rate update for one sensor. Must be idempotent: the
    /// loop may re-send the same value after a reconnect.
    async fn notify(&self, sensor_id: &str, heart_rate: u8) -> Result<(), NotifyError>;
}

/// Notifier that just logs; useful as a default and in examples.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, sensor_id: &str, heart_rate: u8) -> Result<(), NotifyError> {
        info!(sensor = sensor_id, heart_rate, "heart rate changed");
        Ok(())
    }
}
