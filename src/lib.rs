//! # midiwire - MIDI 1.0 over serial byte streams
//!
//! Encodes and decodes MIDI channel and System Exclusive messages to and from
//! a raw byte stream, such as a UART running at 31250 baud.
//!
//! ## Architecture
//!
//! midiwire is an umbrella crate over:
//! - **midiwire-msg** - Message model: validated kinds, channels, wire layout
//! - **midiwire-io** - Byte-stream codec: reader state machine, writer, connector
//!
//! ## Quick Start
//!
//! ```
//! use std::collections::VecDeque;
//! use midiwire::prelude::*;
//!
//! let mut midi = MidiConnector::builder().build(VecDeque::<u8>::new())?;
//!
//! let msg = Message::new(MessageKind::program_change(1)?, 10)?;
//! midi.send(&msg)?;
//!
//! let received = midi.read()?.expect("loopback delivers the message");
//! assert_eq!(received.kind().program_number(), Some(1));
//! # Ok::<(), midiwire::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default) - `std::io` and crossbeam-channel transport adapters
//! - `serde` - Serialize/Deserialize for messages and configuration
//! - `midi-msg` - Conversion into `midi_msg::MidiMsg`
//! - `full` - Everything enabled

pub mod error;
pub use error::{Error, Result};

/// Message model (re-export of midiwire-msg)
pub use midiwire_msg as msg;

/// Byte-stream codec (re-export of midiwire-io)
pub use midiwire_io as io;

pub use midiwire_msg::{Channel, FieldValue, Message, MessageKind, StatusNibble};

pub use midiwire_io::{
    decode, encode, ByteSink, ByteSource, ChannelFilter, ConnectorConfig, MidiConnector,
    ResyncPolicy, StreamReader, StreamWriter, MIDI_BAUD_RATE,
};

/// Convenience prelude for common imports
pub mod prelude {
    // Messages
    pub use crate::{Channel, Message, MessageKind};

    // Codec
    pub use crate::{ChannelFilter, MidiConnector, ResyncPolicy, StreamReader, StreamWriter};

    // Transport contract
    pub use crate::{ByteSink, ByteSource};

    #[cfg(feature = "std")]
    pub use midiwire_io::IoPort;
}
