//! Type definitions for antbeat

pub mod error;
pub mod profile;
pub mod telemetry;

pub use error::{Error, Result};
pub use profile::DeviceProfile;
pub use telemetry::{AggregatedState, TelemetryFragment};
