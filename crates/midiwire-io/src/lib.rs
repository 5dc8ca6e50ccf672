//! MIDI byte-stream codec.
//!
//! Turns an unbounded, possibly noisy stream of bytes into [`Message`]s and
//! back. The transport is abstract: anything implementing [`ByteSource`]
//! (one blocking byte read with an optional timeout) and [`ByteSink`] (one
//! byte write) will do.
//!
//! - [`StreamReader`]: status-driven read state machine with channel filtering
//! - [`StreamWriter`]: message serialization, with all-channel broadcast
//! - [`MidiConnector`]: both directions over one transport, built from a [`ConnectorConfig`]
//! - [`decode`] / [`encode`]: one-shot helpers over byte slices
//!
//! Feature gates: `std` (crossbeam-channel and `std::io` adapters), `serde`
//! (config serialization).
//!
//! [`Message`]: midiwire_msg::Message

pub mod error;
pub use error::{Error, Interruption, Result};

pub(crate) mod codec;
pub(crate) mod config;
pub(crate) mod connector;
pub(crate) mod reader;
pub(crate) mod source;
pub(crate) mod writer;

pub use codec::{decode, decode_all, encode, encode_broadcast};
pub use config::{ChannelFilter, ConnectorConfig, ResyncPolicy, MIDI_BAUD_RATE};
pub use connector::{MidiConnector, MidiConnectorBuilder};
pub use reader::{Messages, StreamReader};
pub use source::{ByteSink, ByteSource, SliceSource};
pub use writer::StreamWriter;

#[cfg(feature = "std")]
pub(crate) mod channel_port;

#[cfg(feature = "std")]
pub(crate) mod io_port;

#[cfg(feature = "std")]
pub use io_port::IoPort;
