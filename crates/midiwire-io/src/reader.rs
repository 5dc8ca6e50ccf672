//! Incremental MIDI stream reader.
//!
//! Reconstructs one [`Message`] per call from a byte source:
//!
//! 1. Await a status byte. A timeout or end-of-stream here is a clean
//!    "no message" (`Ok(None)`), and the caller may retry.
//! 2. Read the trailing data bytes the status nibble calls for: one for
//!    Program Change and Channel Aftertouch, everything up to `0xF7` for
//!    SysEx, two for all other nibbles.
//! 3. Build the kind from the wire bytes, rewrite `NoteOn` velocity 0 as
//!    `NoteOff`, and wrap it with the status byte's channel.
//! 4. Drop the message if the channel filter rejects it. The bytes are
//!    consumed either way; nothing is carried over to the next call.
//!
//! Running out of bytes after the status byte is a `PartialMessage` error,
//! never a silent `None`.

use std::time::Duration;

use midiwire_msg::{
    nibble_from_status, Channel, Error as MsgError, Message, MessageKind, StatusNibble, SYSEX_END,
    SYSEX_START,
};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::config::{ChannelFilter, ConnectorConfig, ResyncPolicy};
use crate::error::{Error, Interruption, Result};
use crate::source::ByteSource;

/// Outcome of one read attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Poll {
    Message(Message),
    /// A complete message arrived on a channel nobody listens to.
    Filtered,
    /// The source timed out before a status byte.
    Idle,
    /// The source is closed.
    Ended,
}

/// Read and decode one message from `source`.
pub(crate) fn read_message<S: ByteSource + ?Sized>(
    source: &mut S,
    timeout: Option<Duration>,
    listen: ChannelFilter,
    resync: ResyncPolicy,
) -> Result<Poll> {
    // AwaitStatus
    let status = loop {
        match source.read_byte(timeout) {
            Ok(byte) if byte < 0x80 && resync == ResyncPolicy::SkipDataBytes => {
                trace!("Skipping data byte {:#04X} while awaiting status", byte);
            }
            Ok(byte) => break byte,
            Err(Error::StreamTimeout) => {
                debug!("No MIDI message before timeout");
                return Ok(Poll::Idle);
            }
            Err(Error::StreamEnded) => {
                debug!("MIDI byte source ended");
                return Ok(Poll::Ended);
            }
            Err(e) => return Err(e),
        }
    };

    // AwaitData / SysExAccumulate
    let mut frame = Frame::new(source, status, timeout);
    let mut data: SmallVec<[u8; 3]> = SmallVec::new();
    match nibble_from_status(status) {
        0xC | 0xD => data.push(frame.next()?),
        _ if status == SYSEX_START => {
            let manufacturer_id = frame.next()?;
            if manufacturer_id == SYSEX_END {
                // Empty frame: stop here so the next message survives
                warn!("Empty SysEx frame dropped");
                return Err(MsgError::InvalidField {
                    field: "manufacturer_id",
                    reason: "SysEx frame ended before a manufacturer id".into(),
                }
                .into());
            }
            data.push(manufacturer_id);
            loop {
                let byte = frame.next()?;
                if byte == SYSEX_END {
                    break;
                }
                data.push(byte);
            }
        }
        _ => {
            data.push(frame.next()?);
            data.push(frame.next()?);
        }
    }

    // Done
    let nibble = StatusNibble::from_status(status).inspect_err(|_| {
        warn!(
            "Unrecognized MIDI status {:#04X} ({} bytes dropped)",
            status, frame.received
        );
    })?;
    let kind = MessageKind::from_wire(nibble, &data)?.normalized();
    // SysEx drops the channel
    let message = Message::on_channel(kind, Channel::from_index(status));
    trace!("Decoded {}", message);

    if listen.accepts(&message) {
        Ok(Poll::Message(message))
    } else {
        debug!("Dropped {} (listening on {})", message, listen);
        Ok(Poll::Filtered)
    }
}

/// Byte pulls after the status byte, where running dry is a partial message.
struct Frame<'a, S: ?Sized> {
    source: &'a mut S,
    status: u8,
    timeout: Option<Duration>,
    received: usize,
}

impl<'a, S: ByteSource + ?Sized> Frame<'a, S> {
    fn new(source: &'a mut S, status: u8, timeout: Option<Duration>) -> Self {
        Self {
            source,
            status,
            timeout,
            received: 1,
        }
    }

    fn next(&mut self) -> Result<u8> {
        match self.source.read_byte(self.timeout) {
            Ok(byte) => {
                self.received += 1;
                Ok(byte)
            }
            Err(e) => match e.interruption() {
                Some(cause) => {
                    warn!(
                        "MIDI message {:#04X} interrupted after {} bytes: {}",
                        self.status, self.received, cause
                    );
                    Err(Error::PartialMessage {
                        status: self.status,
                        received: self.received,
                        cause,
                    })
                }
                None => Err(e),
            },
        }
    }
}

// ============================================================================
// StreamReader
// ============================================================================

/// Reads messages from an exclusively owned byte source.
///
/// # Example
/// ```
/// use midiwire_io::{SliceSource, StreamReader};
///
/// let mut reader = StreamReader::new(SliceSource::new(&[0x90, 60, 0]));
/// let msg = reader.read()?.unwrap();
/// // NoteOn with velocity 0 arrives as NoteOff
/// assert_eq!(msg.kind().name(), "NoteOff");
/// # Ok::<(), midiwire_io::Error>(())
/// ```
#[derive(Debug)]
pub struct StreamReader<S> {
    source: S,
    timeout: Option<Duration>,
    listen: ChannelFilter,
    resync: ResyncPolicy,
    ended: bool,
}

impl<S> StreamReader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            timeout: None,
            listen: ChannelFilter::Omni,
            resync: ResyncPolicy::Off,
            ended: false,
        }
    }

    /// Take the read-side settings from `config`.
    pub fn with_config(source: S, config: &ConnectorConfig) -> Self {
        Self::new(source)
            .timeout(config.timeout)
            .listen(config.listen)
            .resync(config.resync)
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn listen(mut self, listen: impl Into<ChannelFilter>) -> Self {
        self.listen = listen.into();
        self
    }

    pub fn resync(mut self, resync: ResyncPolicy) -> Self {
        self.resync = resync;
        self
    }

    /// Whether the source reported end-of-stream.
    #[inline]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    #[inline]
    pub fn channel_filter(&self) -> ChannelFilter {
        self.listen
    }

    #[inline]
    pub fn read_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    #[inline]
    pub fn resync_policy(&self) -> ResyncPolicy {
        self.resync
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S: ByteSource> StreamReader<S> {
    /// Read one message on the configured channel.
    ///
    /// `Ok(None)` when the source timed out or ended before a status byte,
    /// or when the message was for another channel.
    pub fn read(&mut self) -> Result<Option<Message>> {
        self.read_channel(self.listen)
    }

    /// Like [`read`](Self::read), overriding the channel filter for this call.
    pub fn read_channel(&mut self, listen: ChannelFilter) -> Result<Option<Message>> {
        let poll = read_message(&mut self.source, self.timeout, listen, self.resync);
        match poll {
            Ok(Poll::Message(message)) => Ok(Some(message)),
            Ok(Poll::Filtered | Poll::Idle) => Ok(None),
            Ok(Poll::Ended) => {
                self.ended = true;
                Ok(None)
            }
            Err(e) => {
                if matches!(
                    e,
                    Error::PartialMessage {
                        cause: Interruption::Ended,
                        ..
                    }
                ) {
                    self.ended = true;
                }
                Err(e)
            }
        }
    }

    /// Iterate over incoming messages until the source ends.
    ///
    /// Timeouts and filtered messages are skipped, so with a source that
    /// never ends this blocks like repeated [`read`](Self::read) calls.
    pub fn messages(&mut self) -> Messages<'_, S> {
        Messages { reader: self }
    }
}

/// Iterator returned by [`StreamReader::messages`].
pub struct Messages<'a, S> {
    reader: &'a mut StreamReader<S>,
}

impl<S: ByteSource> Iterator for Messages<'_, S> {
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.reader.ended {
            match self.reader.read() {
                Ok(Some(message)) => return Some(Ok(message)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}
