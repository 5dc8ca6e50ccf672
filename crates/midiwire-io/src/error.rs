//! Error types for the MIDI byte-stream codec.

use std::fmt;

use thiserror::Error;

/// Why a byte source stopped delivering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interruption {
    Timeout,
    Ended,
}

impl fmt::Display for Interruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interruption::Timeout => f.write_str("timed out"),
            Interruption::Ended => f.write_str("stream ended"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// Field, channel or status validation failed.
    #[error(transparent)]
    Message(#[from] midiwire_msg::Error),

    #[error("Byte source timed out")]
    StreamTimeout,

    #[error("Byte source ended")]
    StreamEnded,

    /// The source stopped after the status byte was consumed.
    ///
    /// `received` counts the bytes already taken from the source, status included.
    #[error("Partial message (status {status:#04X}, {received} bytes read): {cause}")]
    PartialMessage {
        status: u8,
        received: usize,
        cause: Interruption,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The message-model error, if this is one.
    pub fn as_message_error(&self) -> Option<&midiwire_msg::Error> {
        match self {
            Error::Message(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn interruption(&self) -> Option<Interruption> {
        match self {
            Error::StreamTimeout => Some(Interruption::Timeout),
            Error::StreamEnded => Some(Interruption::Ended),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
