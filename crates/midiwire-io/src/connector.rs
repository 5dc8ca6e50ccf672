//! Bidirectional MIDI connector over a single transport.
//!
//! ## Quick Start
//!
//! ```
//! use std::collections::VecDeque;
//! use midiwire_io::MidiConnector;
//! use midiwire_msg::{Message, MessageKind};
//!
//! // A VecDeque is an in-memory loopback line
//! let mut midi = MidiConnector::builder().channel(1).build(VecDeque::<u8>::new())?;
//!
//! let msg = Message::new(MessageKind::note_on(60, 100)?, 1)?;
//! assert_eq!(midi.send(&msg)?, 3);
//! assert_eq!(midi.read()?, Some(msg));
//! # Ok::<(), midiwire_io::Error>(())
//! ```

use std::fmt;
use std::time::Duration;

use midiwire_msg::{Channel, Message};
use tracing::debug;

use crate::config::{ChannelFilter, ConnectorConfig, ResyncPolicy};
use crate::error::Result;
use crate::reader::{Messages, StreamReader};
use crate::source::{ByteSink, ByteSource};
use crate::writer::write_message;

/// Reads and writes MIDI messages on one exclusively owned transport.
///
/// The read side is a [`StreamReader`] configured from the connector's
/// [`ConnectorConfig`]; writes go to the same transport. Concurrent use of
/// the transport is not supported; every operation takes `&mut self`.
pub struct MidiConnector<T> {
    reader: StreamReader<T>,
    config: ConnectorConfig,
}

impl MidiConnector<()> {
    pub fn builder() -> MidiConnectorBuilder {
        MidiConnectorBuilder::default()
    }
}

impl<T> MidiConnector<T> {
    pub fn new(transport: T, config: ConnectorConfig) -> Self {
        debug!(
            "MIDI connector: timeout={:?}, listen={}, resync={}",
            config.timeout, config.listen, config.resync
        );
        Self {
            reader: StreamReader::with_config(transport, &config),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// Whether the transport reported end-of-stream on a read.
    #[inline]
    pub fn is_ended(&self) -> bool {
        self.reader.is_ended()
    }

    pub fn get_ref(&self) -> &T {
        self.reader.get_ref()
    }

    pub fn get_mut(&mut self) -> &mut T {
        self.reader.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.reader.into_inner()
    }
}

impl<T: ByteSource> MidiConnector<T> {
    /// Read one message on the configured channel.
    ///
    /// `Ok(None)` on a timeout before the status byte, at end-of-stream, or
    /// when the message was for another channel.
    #[inline]
    pub fn read(&mut self) -> Result<Option<Message>> {
        self.reader.read()
    }

    /// Read one message, listening on `listen` for this call only.
    #[inline]
    pub fn read_channel(&mut self, listen: ChannelFilter) -> Result<Option<Message>> {
        self.reader.read_channel(listen)
    }

    /// Iterate over incoming messages until the transport ends.
    pub fn messages(&mut self) -> Messages<'_, T> {
        self.reader.messages()
    }
}

impl<T: ByteSink> MidiConnector<T> {
    /// Send a message, on all channels if the connector broadcasts by default.
    ///
    /// Returns the number of bytes written.
    pub fn send(&mut self, message: &Message) -> Result<usize> {
        write_message(self.reader.get_mut(), message, self.config.broadcast)
    }

    /// Send on the message's own channel regardless of the broadcast setting.
    pub fn write(&mut self, message: &Message) -> Result<usize> {
        write_message(self.reader.get_mut(), message, false)
    }

    /// Send a channel message on all 16 channels.
    pub fn send_all_channels(&mut self, message: &Message) -> Result<usize> {
        write_message(self.reader.get_mut(), message, true)
    }
}

impl<T> fmt::Debug for MidiConnector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MidiConnector")
            .field("config", &self.config)
            .field("ended", &self.reader.is_ended())
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for MidiConnector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MidiConnector(timeout={:?}, listen={}, resync={}, broadcast={})",
            self.config.timeout, self.config.listen, self.config.resync, self.config.broadcast
        )
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`MidiConnector`].
///
/// Channel numbers are validated in [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct MidiConnectorBuilder {
    timeout: Option<Duration>,
    channel: Option<u8>,
    resync: ResyncPolicy,
    broadcast: bool,
}

impl MidiConnectorBuilder {
    /// Start from an existing configuration.
    pub fn from_config(config: &ConnectorConfig) -> Self {
        Self {
            timeout: config.timeout,
            channel: match config.listen {
                ChannelFilter::Omni => None,
                ChannelFilter::Only(channel) => Some(channel.number()),
            },
            resync: config.resync,
            broadcast: config.broadcast,
        }
    }

    /// Maximum wait per byte when reading. Unset blocks.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Only deliver messages from this channel (1-16). SysEx always passes.
    pub fn channel(mut self, channel: u8) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Deliver messages from every channel (the default).
    pub fn omni(mut self) -> Self {
        self.channel = None;
        self
    }

    pub fn resync(mut self, resync: ResyncPolicy) -> Self {
        self.resync = resync;
        self
    }

    /// Make [`MidiConnector::send`] write on all 16 channels.
    pub fn broadcast(mut self) -> Self {
        self.broadcast = true;
        self
    }

    pub fn config(&self) -> Result<ConnectorConfig> {
        let listen = self
            .channel
            .map(Channel::new)
            .transpose()?
            .map_or(ChannelFilter::Omni, ChannelFilter::Only);
        Ok(ConnectorConfig {
            timeout: self.timeout,
            listen,
            resync: self.resync,
            broadcast: self.broadcast,
        })
    }

    pub fn build<T>(self, transport: T) -> Result<MidiConnector<T>> {
        Ok(MidiConnector::new(transport, self.config()?))
    }
}
