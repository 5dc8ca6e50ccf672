//! MIDI channels, numbered 1-16 externally and 0-15 on the wire.

use crate::error::{Error, Result};

/// A MIDI channel (1-16).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct Channel(u8);

impl Channel {
    /// Number of channels on a MIDI line.
    pub const COUNT: u8 = 16;

    /// Create a channel from its 1-based number.
    pub fn new(number: u8) -> Result<Self> {
        if (1..=Self::COUNT).contains(&number) {
            Ok(Self(number))
        } else {
            Err(Error::InvalidChannel(number))
        }
    }

    /// Create a channel from the low nibble of a status byte.
    ///
    /// Only the low 4 bits are used, so this cannot fail.
    #[inline]
    pub const fn from_index(index: u8) -> Self {
        Self((index & 0x0F) + 1)
    }

    /// 1-based channel number.
    #[inline]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// 0-based wire value (the status byte's low nibble).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0 - 1
    }

    /// All 16 channels, in wire order.
    pub fn all() -> impl Iterator<Item = Channel> {
        (0..Self::COUNT).map(Self::from_index)
    }
}

impl TryFrom<u8> for Channel {
    type Error = Error;

    fn try_from(number: u8) -> Result<Self> {
        Self::new(number)
    }
}

impl From<Channel> for u8 {
    #[inline]
    fn from(channel: Channel) -> u8 {
        channel.0
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
