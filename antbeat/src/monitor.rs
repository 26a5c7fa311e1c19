//! Telemetry aggregation loop

use tokio::sync::watch;
use tracing::{debug, info, trace, warn};

use antbeat_core::{dispatch, Dispatched, Frame};
use antbeat_transport::Transport;
use antbeat_types::{AggregatedState, TelemetryFragment};

use crate::{error::Result, notify::Notifier};

/// Polls the open channel and folds broadcast fragments into a running
/// [`AggregatedState`].
///
/// The loop is the state's only writer. It runs until the shutdown signal
/// fires or a fatal error surfaces; it is not restartable afterwards.
pub struct HeartRateMonitor<'a, T: ?Sized, N> {
    transport: &'a mut T,
    notifier: N,
    sensor_id: String,
    state: AggregatedState,
    shutdown: watch::Receiver<bool>,
    snapshots: watch::Sender<AggregatedState>,
}

impl<'a, T: Transport + ?Sized, N: Notifier> HeartRateMonitor<'a, T, N> {
    pub fn new(
        transport: &'a mut T,
        notifier: N,
        sensor_id: impl Into<String>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        let (snapshots, _) = watch::channel(AggregatedState::new());

        Self {
            transport,
            notifier,
            sensor_id: sensor_id.into(),
            state: AggregatedState::new(),
            shutdown,
            snapshots,
        }
    }

    /// Watch the stream of merged snapshots; one is published after every
    /// applied fragment.
    pub fn subscribe(&self) -> watch::Receiver<AggregatedState> {
        self.snapshots.subscribe()
    }

    /// Last merged state.
    pub fn state(&self) -> &AggregatedState {
        &self.state
    }

    /// Poll frames until shutdown or a fatal error.
    ///
    /// Recoverable: the EVENT_RX_FAIL channel event (an empty receive
    /// slot while searching) skips the iteration. Fatal: any framing
    /// error, any other channel error, and transport errors. Notifier
    /// failures are logged and never fatal.
    pub async fn run(&mut self) -> Result<()> {
        info!(sensor = %self.sensor_id, "telemetry loop started");

        loop {
            let raw = tokio::select! {
                _ = self.shutdown.changed() => {
                    info!("shutdown requested, stopping telemetry loop");
                    return Ok(());
                }
                received = self.transport.receive() => received?,
            };

            match Frame::decode(&raw).and_then(|frame| dispatch(&frame)) {
                Ok(Dispatched::Telemetry(fragment)) => self.merge(fragment).await,
                Ok(other) => trace!(?other, "non-telemetry frame"),
                Err(e) if e.is_rx_fail() => trace!("receive slot passed with no data"),
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Fold one fragment into the state, pushing a notification when the
    /// merged heart rate lands on a new value.
    async fn merge(&mut self, fragment: TelemetryFragment) {
        let previous = self.state.heart_rate;
        if !self.state.apply(&fragment) {
            return;
        }

        if let Some(heart_rate) = self.state.heart_rate {
            // Suppress repeats: only a changed value goes out
            if previous != Some(heart_rate) {
                if let Err(e) = self.notifier.notify(&self.sensor_id, heart_rate).await {
                    warn!(error = %e, "heart-rate notification failed");
                }
            }
        }

        debug!(
            heart_rate = self.state.heart_rate,
            device_number = self.state.device_number,
            manufacturer_id = self.state.manufacturer_id,
            serial = self.state.serial,
            "merged telemetry"
        );
        self.snapshots.send_replace(self.state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::notify::{MockNotifier, NotifyError};
    use crate::testkit::{broadcast, channel_error, hr_page, startup, PendingTransport, ScriptedTransport};
    use antbeat_transport::Error as TransportError;
    use pretty_assertions::assert_eq;

    fn shutdown_never() -> (watch::Sender<bool>, watch::Receiver<bool>) {
        watch::channel(false)
    }

    fn assert_closed(result: Result<()>) {
        assert!(matches!(
            result,
            Err(Error::Transport(TransportError::Closed))
        ));
    }

    #[tokio::test]
    async fn test_repeated_heart_rate_notifies_once() {
        let mut transport = ScriptedTransport::new();
        transport.queue(broadcast(&hr_page(80)));
        transport.queue(broadcast(&hr_page(80)));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|_, hr| *hr == 80)
            .times(1)
            .returning(|_, _| Ok(()));

        let (_tx, rx) = shutdown_never();
        let mut monitor = HeartRateMonitor::new(&mut transport, notifier, "hrm-1", rx);

        assert_closed(monitor.run().await);
        assert_eq!(monitor.state().heart_rate, Some(80));
    }

    #[tokio::test]
    async fn test_each_new_heart_rate_notifies() {
        let mut transport = ScriptedTransport::new();
        transport.queue(broadcast(&hr_page(80)));
        transport.queue(broadcast(&hr_page(85)));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|_, hr| *hr == 80)
            .times(1)
            .returning(|_, _| Ok(()));
        notifier
            .expect_notify()
            .withf(|_, hr| *hr == 85)
            .times(1)
            .returning(|_, _| Ok(()));

        let (_tx, rx) = shutdown_never();
        let mut monitor = HeartRateMonitor::new(&mut transport, notifier, "hrm-1", rx);

        assert_closed(monitor.run().await);
        assert_eq!(monitor.state().heart_rate, Some(85));
    }

    #[tokio::test]
    async fn test_rx_fail_event_does_not_stop_the_loop() {
        let mut transport = ScriptedTransport::new();
        transport.queue(channel_error(1, 2));
        transport.queue(broadcast(&hr_page(80)));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .times(1)
            .returning(|_, _| Ok(()));

        let (_tx, rx) = shutdown_never();
        let mut monitor = HeartRateMonitor::new(&mut transport, notifier, "hrm-1", rx);

        assert_closed(monitor.run().await);
        assert_eq!(monitor.state().heart_rate, Some(80));
    }

    #[tokio::test]
    async fn test_other_channel_error_is_fatal() {
        let mut transport = ScriptedTransport::new();
        transport.queue(channel_error(1, 21));
        transport.queue(broadcast(&hr_page(80)));

        let (_tx, rx) = shutdown_never();
        let mut monitor = HeartRateMonitor::new(&mut transport, MockNotifier::new(), "hrm-1", rx);

        assert!(matches!(
            monitor.run().await,
            Err(Error::Protocol(antbeat_core::Error::Channel(event))) if event.code == 21
        ));
    }

    #[tokio::test]
    async fn test_absent_fields_never_overwrite() {
        let mut transport = ScriptedTransport::new();
        transport.queue(broadcast(&hr_page(80)));

        // Extended broadcast with no heart rate but a device number
        let mut data = hr_page(0);
        data.resize(19, 0);
        data[10] = 0x04;
        data[11] = 0xD2;
        transport.queue(broadcast(&data));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|_, hr| *hr == 80)
            .times(1)
            .returning(|_, _| Ok(()));

        let (_tx, rx) = shutdown_never();
        let mut monitor = HeartRateMonitor::new(&mut transport, notifier, "hrm-1", rx);

        assert_closed(monitor.run().await);
        assert_eq!(monitor.state().heart_rate, Some(80));
        assert_eq!(monitor.state().device_number, Some(1234));
    }

    #[tokio::test]
    async fn test_notifier_failure_is_not_fatal() {
        let mut transport = ScriptedTransport::new();
        transport.queue(broadcast(&hr_page(80)));
        transport.queue(broadcast(&hr_page(85)));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .times(2)
            .returning(|_, _| Err(NotifyError(anyhow::anyhow!("bridge unreachable"))));

        let (_tx, rx) = shutdown_never();
        let mut monitor = HeartRateMonitor::new(&mut transport, notifier, "hrm-1", rx);

        assert_closed(monitor.run().await);
        assert_eq!(monitor.state().heart_rate, Some(85));
    }

    #[tokio::test]
    async fn test_non_telemetry_frames_are_skipped() {
        let mut transport = ScriptedTransport::new();
        transport.queue(startup());
        transport.queue(Frame::new(0x99, vec![1, 2, 3]));
        transport.queue(broadcast(&hr_page(80)));

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(1).returning(|_, _| Ok(()));

        let (_tx, rx) = shutdown_never();
        let mut monitor = HeartRateMonitor::new(&mut transport, notifier, "hrm-1", rx);

        assert_closed(monitor.run().await);
        assert_eq!(monitor.state().heart_rate, Some(80));
    }

    #[tokio::test]
    async fn test_shutdown_signal_ends_loop_cleanly() {
        let mut transport = PendingTransport;

        let (tx, rx) = watch::channel(false);
        let mut monitor = HeartRateMonitor::new(&mut transport, MockNotifier::new(), "hrm-1", rx);

        tx.send(true).unwrap();
        monitor.run().await.unwrap();
    }

    #[tokio::test]
    async fn test_snapshots_are_published() {
        let mut transport = ScriptedTransport::new();
        transport.queue(broadcast(&hr_page(80)));

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(1).returning(|_, _| Ok(()));

        let (_tx, rx) = shutdown_never();
        let mut monitor = HeartRateMonitor::new(&mut transport, notifier, "hrm-1", rx);
        let snapshots = monitor.subscribe();

        assert_closed(monitor.run().await);
        assert_eq!(snapshots.borrow().heart_rate, Some(80));
    }
}
