//! Transport errors

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Connection closed by remote")]
    Closed,

    #[error("Declared frame payload of {declared} bytes exceeds the protocol maximum")]
    FrameTooLarge { declared: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
