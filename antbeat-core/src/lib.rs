//! # antbeat-core
//!
//! Core protocol implementation for the ANT radio wire format.
//!
//! This crate provides the low-level protocol primitives:
//! - Frame structure and encoding/decoding
//! - XOR checksum calculation
//! - Outbound command construction
//! - Inbound message classification
//! - Broadcast data-page decoding
//! - Protocol constants

pub mod broadcast;
pub mod checksum;
pub mod command;
pub mod constants;
pub mod error;
pub mod frame;
pub mod message;

pub use command::CommandRequest;
pub use error::{ChannelErrorEvent, Error, Result};
pub use frame::Frame;
pub use message::{dispatch, Dispatched, MessageId};
