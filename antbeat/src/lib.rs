//! # antbeat
//!
//! Protocol engine for ANT+ heart-rate sensors.
//!
//! ## Features
//!
//! - Type-safe wire protocol implementation
//! - Async/await API using Tokio
//! - Channel handshake state machine
//! - Telemetry aggregation with change notifications
//!
//! ## Quick Start
//!
//! ```no_run
//! use antbeat::{ChannelConfigurator, HeartRateMonitor, LogNotifier};
//! use antbeat_transport::StreamTransport;
//! use antbeat_types::DeviceProfile;
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> antbeat::Result<()> {
//!     // Any byte stream that reaches the radio works here
//!     let stream = tokio::net::TcpStream::connect("127.0.0.1:7557").await
//!         .map_err(antbeat_transport::Error::Io)?;
//!     let mut transport = StreamTransport::new(stream);
//!
//!     let profile = DeviceProfile::heart_rate(0);
//!     ChannelConfigurator::new(&mut transport, profile).open().await?;
//!
//!     let (_shutdown, shutdown_rx) = watch::channel(false);
//!     {
//!         let mut monitor =
//!             HeartRateMonitor::new(&mut transport, LogNotifier, "hrm-1", shutdown_rx);
//!         monitor.run().await?;
//!     }
//!
//!     ChannelConfigurator::new(&mut transport, profile).close().await?;
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod error;
pub mod monitor;
pub mod notify;

#[cfg(test)]
mod testkit;

// Re-exports
pub use channel::{ChannelConfigurator, ChannelState};
pub use error::{Error, Result};
pub use monitor::HeartRateMonitor;
pub use notify::{LogNotifier, Notifier, NotifyError};

// Re-export protocol types
pub use antbeat_core::{CommandRequest, Dispatched, Frame, MessageId};
pub use antbeat_types::{AggregatedState, DeviceProfile, TelemetryFragment};
