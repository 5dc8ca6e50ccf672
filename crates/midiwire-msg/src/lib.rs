//! MIDI 1.0 message model.
//!
//! Validated message kinds ([`MessageKind`]) and the channel envelope that
//! turns them into wire bytes ([`Message`]). Everything here is pure data;
//! reading and writing byte streams lives in `midiwire-io`.
//!
//! # Example
//!
//! ```
//! use midiwire_msg::{Message, MessageKind};
//!
//! let msg = Message::new(MessageKind::control_change(74, 64)?, 2)?;
//! assert_eq!(msg.content().as_slice(), &[0xB1, 74, 64]);
//! assert_eq!(msg.to_string(), "Message(ControlChange(74, 64), channel=2)");
//! # Ok::<(), midiwire_msg::Error>(())
//! ```
//!
//! # Features
//!
//! - `serde`: Serialize/Deserialize, re-validating every field on the way in
//! - `midi-msg`: [`Message::to_midi_msg`] conversion

pub mod error;
pub use error::{Error, Result};

pub(crate) mod channel;
pub(crate) mod kind;
pub(crate) mod message;
pub(crate) mod status;
pub(crate) mod u7;

pub use channel::Channel;
pub use kind::{FieldValue, MessageKind, Program, SysExData};
pub use message::{Content, Message};
pub use status::{
    channel_from_status, nibble_from_status, status_value, StatusNibble, SYSEX_END, SYSEX_START,
};
pub use u7::U7;

#[cfg(feature = "serde")]
pub(crate) mod serde_support;

#[cfg(feature = "midi-msg")]
pub(crate) mod interop;
