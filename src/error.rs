//! Centralized error type for the midiwire umbrella crate.
//!
//! Wraps both subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Building a message or kind failed.
    #[error(transparent)]
    Message(#[from] midiwire_msg::Error),

    /// Reading or writing the byte stream failed.
    #[error("Stream: {0}")]
    Stream(#[from] midiwire_io::Error),
}

impl Error {
    /// The message-model error, whether raised directly or while decoding.
    pub fn as_message_error(&self) -> Option<&midiwire_msg::Error> {
        match self {
            Error::Message(e) => Some(e),
            Error::Stream(e) => e.as_message_error(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
