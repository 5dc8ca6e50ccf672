//! Error types for the MIDI message model.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A field value outside its documented range, or the wrong number of data bytes.
    #[error("Invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid channel {0}: must be within [1, 16]")]
    InvalidChannel(u8),

    /// The status byte does not map to any known message kind.
    #[error("Unrecognized status byte {0:#04X}")]
    UnrecognizedStatus(u8),
}

impl Error {
    pub(crate) fn field(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
