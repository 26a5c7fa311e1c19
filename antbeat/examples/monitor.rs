//! Monitor a heart-rate sensor through a radio exposed as a TCP byte
//! stream (e.g. a ser2net/socat gateway in front of the USB stick).

use tokio::sync::watch;
use tracing::info;

use antbeat::{ChannelConfigurator, HeartRateMonitor, LogNotifier};
use antbeat_transport::StreamTransport;
use antbeat_types::DeviceProfile;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let addr = std::env::var("RADIO_ADDR").unwrap_or_else(|_| "127.0.0.1:7557".to_string());
    let device_number: u16 = std::env::var("DEVICE_NUMBER")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    info!("connecting to radio at {addr}");
    let stream = tokio::net::TcpStream::connect(&addr).await?;
    let mut transport = StreamTransport::new(stream);

    let profile = DeviceProfile::heart_rate(device_number);
    ChannelConfigurator::new(&mut transport, profile).open().await?;

    // Ctrl-C flips the shutdown signal; the monitor loop sees it and stops
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        let _ = shutdown_tx.send(true);
    });

    let result = {
        let mut monitor =
            HeartRateMonitor::new(&mut transport, LogNotifier, "hrm-1", shutdown_rx);
        monitor.run().await
    };

    // Best-effort close, bounded internally, even after a loop error
    if let Err(e) = ChannelConfigurator::new(&mut transport, profile).close().await {
        tracing::warn!(error = %e, "channel close failed");
    }

    result?;
    Ok(())
}
