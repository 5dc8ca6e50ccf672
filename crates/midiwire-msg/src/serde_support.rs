//! Serde support for messages.
//!
//! Field types validate themselves on deserialize (`U7`, `Channel`, ...). The
//! envelope additionally needs a channel for every non-SysEx kind, which is
//! checked here before a `Message` is produced.

use serde::Deserialize;

use crate::channel::Channel;
use crate::error::{Error, Result};
use crate::kind::MessageKind;
use crate::message::Message;

// Same shape as the serialized `Message`
#[derive(Deserialize)]
pub(crate) struct RawMessage {
    kind: MessageKind,
    channel: Option<Channel>,
}

impl TryFrom<RawMessage> for Message {
    type Error = Error;

    fn try_from(raw: RawMessage) -> Result<Self> {
        match (raw.channel, raw.kind.is_sysex()) {
            (_, true) => Ok(Message::on_channel(raw.kind, Channel::from_index(0))),
            (Some(channel), false) => Ok(Message::on_channel(raw.kind, channel)),
            // Out-of-range numbers are caught by `Channel`; this is the missing case
            (None, false) => Err(Error::InvalidChannel(0)),
        }
    }
}
