//! Reader/connector configuration.

use std::fmt;
use std::time::Duration;

use midiwire_msg::{Channel, Message};

use crate::error::Result;

/// Standard MIDI serial rate in bits per second.
///
/// Informational: the transport is configured by whoever opens it.
pub const MIDI_BAUD_RATE: u32 = 31_250;

/// Which channel a reader listens on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelFilter {
    /// Accept every channel.
    #[default]
    Omni,
    Only(Channel),
}

impl ChannelFilter {
    /// Listen on a single channel (1-16).
    pub fn only(channel: u8) -> Result<Self> {
        Ok(ChannelFilter::Only(Channel::new(channel)?))
    }

    /// SysEx has no channel and is always accepted.
    #[inline]
    pub fn accepts(&self, message: &Message) -> bool {
        match (self, message.channel()) {
            (ChannelFilter::Omni, _) | (_, None) => true,
            (ChannelFilter::Only(wanted), Some(channel)) => *wanted == channel,
        }
    }
}

impl From<Option<Channel>> for ChannelFilter {
    fn from(channel: Option<Channel>) -> Self {
        channel.map_or(ChannelFilter::Omni, ChannelFilter::Only)
    }
}

impl From<Channel> for ChannelFilter {
    fn from(channel: Channel) -> Self {
        ChannelFilter::Only(channel)
    }
}

impl fmt::Display for ChannelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelFilter::Omni => f.write_str("omni"),
            ChannelFilter::Only(channel) => write!(f, "channel {}", channel),
        }
    }
}

/// What the reader does with data bytes found where a status byte should be.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResyncPolicy {
    /// Treat the first byte of every read as a status byte.
    #[default]
    Off,
    /// Discard bytes below `0x80` until a status byte arrives.
    ///
    /// Recovers the stream after a `PartialMessage`.
    SkipDataBytes,
}

impl fmt::Display for ResyncPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResyncPolicy::Off => f.write_str("off"),
            ResyncPolicy::SkipDataBytes => f.write_str("skip-data-bytes"),
        }
    }
}

/// Plain-data configuration for [`crate::StreamReader`] and [`crate::MidiConnector`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ConnectorConfig {
    /// Maximum wait per byte, passed through to the source. `None` blocks.
    pub timeout: Option<Duration>,
    pub listen: ChannelFilter,
    pub resync: ResyncPolicy,
    /// Send channel messages on all 16 channels by default.
    pub broadcast: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use midiwire_msg::MessageKind;

    fn note_on(channel: u8) -> Message {
        Message::new(MessageKind::note_on(60, 100).unwrap(), channel).unwrap()
    }

    #[test]
    fn test_omni_accepts_everything() {
        let filter = ChannelFilter::Omni;
        assert!(filter.accepts(&note_on(1)));
        assert!(filter.accepts(&note_on(16)));
    }

    #[test]
    fn test_only_filters_channels() {
        let filter = ChannelFilter::only(3).unwrap();
        assert!(filter.accepts(&note_on(3)));
        assert!(!filter.accepts(&note_on(7)));
        assert!(filter.accepts(&Message::sysex(43, vec![1]).unwrap()));
    }

    #[test]
    fn test_only_validates_channel() {
        assert!(ChannelFilter::only(0).is_err());
        assert!(ChannelFilter::only(17).is_err());
    }

    #[test]
    fn test_baud_rate_byte_time() {
        // 8N1 framing: 10 bits on the wire per byte
        let byte_time = Duration::from_micros(10 * 1_000_000 / u64::from(MIDI_BAUD_RATE));
        assert_eq!(byte_time, Duration::from_micros(320));
        assert_eq!(byte_time * 3, Duration::from_micros(960));
    }

    #[test]
    fn test_default_config() {
        let config = ConnectorConfig::default();
        assert_eq!(config.timeout, None);
        assert_eq!(config.listen, ChannelFilter::Omni);
        assert_eq!(config.resync, ResyncPolicy::Off);
        assert!(!config.broadcast);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_from_json() {
        let config: ConnectorConfig =
            serde_json::from_str(r#"{"listen":{"Only":3},"resync":"SkipDataBytes"}"#).unwrap();
        assert_eq!(config.listen, ChannelFilter::only(3).unwrap());
        assert_eq!(config.resync, ResyncPolicy::SkipDataBytes);
        assert_eq!(config.timeout, None);

        assert!(serde_json::from_str::<ConnectorConfig>(r#"{"listen":{"Only":0}}"#).is_err());
    }
}
