//! 7-bit data values.

use crate::error::{Error, Result};

/// A MIDI data byte, guaranteed to be within [0, 127].
///
/// Every field of a channel message is one of these. The only way to get one
/// is through a range check, so a `MessageKind` built from `U7`s is valid by
/// construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct U7(u8);

impl U7 {
    pub const MIN: U7 = U7(0);
    pub const MAX: U7 = U7(127);

    /// Range-checks `value`, naming `field` in the error.
    pub fn checked(field: &'static str, value: u8) -> Result<Self> {
        if value <= Self::MAX.0 {
            Ok(Self(value))
        } else {
            Err(Error::field(
                field,
                format!("{} is outside [0, 127]", value),
            ))
        }
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for U7 {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::checked("data byte", value)
    }
}

impl From<U7> for u8 {
    #[inline]
    fn from(value: U7) -> u8 {
        value.0
    }
}

impl std::fmt::Display for U7 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
