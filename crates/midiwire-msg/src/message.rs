//! The message envelope: a kind plus the channel it travels on.

use std::fmt;

use smallvec::SmallVec;

use crate::channel::Channel;
use crate::error::Result;
use crate::kind::{FieldValue, MessageKind};
use crate::status::{status_value, SYSEX_END, SYSEX_START};

/// Wire bytes of one message. Channel messages fit inline; SysEx spills to the heap.
pub type Content = SmallVec<[u8; 3]>;

/// A complete MIDI message.
///
/// Immutable once built. SysEx messages carry no channel, so two SysEx
/// messages are equal when their kinds are.
///
/// # Example
/// ```
/// use midiwire_msg::{Message, MessageKind};
///
/// let msg = Message::new(MessageKind::note_on(82, 127)?, 1)?;
/// assert_eq!(msg.status_byte(), 0x90);
/// assert_eq!(msg.content().as_slice(), &[0x90, 82, 127]);
/// # Ok::<(), midiwire_msg::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "crate::serde_support::RawMessage")
)]
pub struct Message {
    kind: MessageKind,
    channel: Option<Channel>,
}

impl Message {
    /// Wrap `kind` for sending on `channel` (1-16).
    ///
    /// The channel is ignored for SysEx.
    pub fn new(kind: MessageKind, channel: u8) -> Result<Self> {
        if kind.is_sysex() {
            return Ok(Self {
                kind,
                channel: None,
            });
        }
        Ok(Self::on_channel(kind, Channel::new(channel)?))
    }

    /// Like [`Message::new`] with an already validated channel.
    pub fn on_channel(kind: MessageKind, channel: Channel) -> Self {
        let channel = (!kind.is_sysex()).then_some(channel);
        Self { kind, channel }
    }

    /// System Exclusive message (no channel).
    pub fn sysex(manufacturer_id: u8, data: impl Into<Vec<u8>>) -> Result<Self> {
        Ok(Self {
            kind: MessageKind::sysex(manufacturer_id, data)?,
            channel: None,
        })
    }

    #[inline]
    pub fn kind(&self) -> &MessageKind {
        &self.kind
    }

    pub fn into_kind(self) -> MessageKind {
        self.kind
    }

    /// `None` for SysEx.
    #[inline]
    pub fn channel(&self) -> Option<Channel> {
        self.channel
    }

    #[inline]
    pub fn is_sysex(&self) -> bool {
        self.kind.is_sysex()
    }

    /// Same data on another channel. SysEx messages come back unchanged.
    pub fn with_channel(&self, channel: Channel) -> Self {
        Self::on_channel(self.kind.clone(), channel)
    }

    /// Look up a field of the wrapped kind by name.
    #[inline]
    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.kind.field(name)
    }

    // ==================== Wire view ====================

    pub fn status_byte(&self) -> u8 {
        match self.channel {
            Some(channel) => status_value(self.kind.nibble(), channel),
            None => SYSEX_START,
        }
    }

    /// The exact bytes sent on the wire, status first.
    ///
    /// SysEx content is `[0xF0, manufacturer_id, data.., 0xF7]`.
    pub fn content(&self) -> Content {
        let mut content = Content::new();
        content.push(self.status_byte());
        content.push(self.kind.data1());
        match &self.kind {
            MessageKind::SysEx { data, .. } => {
                content.extend_from_slice(data.as_slice());
                content.push(SYSEX_END);
            }
            kind => content.extend(kind.data2()),
        }
        content
    }

    /// Number of wire bytes.
    pub fn len(&self) -> usize {
        match &self.kind {
            MessageKind::SysEx { data, .. } => data.len() + 3,
            kind => 2 + kind.data2().map_or(0, |_| 1),
        }
    }

    /// Always false: every message has at least a status and one data byte.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Wire byte at `index`.
    pub fn get(&self, index: usize) -> Option<u8> {
        match (index, &self.kind) {
            (0, _) => Some(self.status_byte()),
            (1, kind) => Some(kind.data1()),
            (_, MessageKind::SysEx { data, .. }) => {
                let data = data.as_slice();
                match index - 2 {
                    i if i < data.len() => Some(data[i]),
                    i if i == data.len() => Some(SYSEX_END),
                    _ => None,
                }
            }
            (2, kind) => kind.data2(),
            _ => None,
        }
    }

    pub fn bytes(&self) -> impl Iterator<Item = u8> {
        self.content().into_iter()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.channel {
            Some(channel) => write!(f, "Message({}, channel={})", self.kind, channel),
            None => write!(f, "Message({})", self.kind),
        }
    }
}
