//! MIDI stream writer.

use midiwire_msg::{Channel, Message};
use tracing::trace;

use crate::error::Result;
use crate::source::ByteSink;

/// Write `message` one byte at a time and return the byte count.
///
/// With `broadcast`, a channel message is repeated on channels 1-16 with only
/// the status nibble changing. SysEx is written once either way.
pub(crate) fn write_message<W: ByteSink + ?Sized>(
    sink: &mut W,
    message: &Message,
    broadcast: bool,
) -> Result<usize> {
    if !broadcast || message.is_sysex() {
        return write_content(sink, message);
    }

    let mut written = 0;
    for channel in Channel::all() {
        written += write_content(sink, &message.with_channel(channel))?;
    }
    trace!("Broadcast {} on all channels ({} bytes)", message.kind(), written);
    Ok(written)
}

fn write_content<W: ByteSink + ?Sized>(sink: &mut W, message: &Message) -> Result<usize> {
    let content = message.content();
    for &byte in &content {
        sink.write_byte(byte)?;
    }
    trace!("Sent {}", message);
    Ok(content.len())
}

/// Writes messages to an exclusively owned byte sink.
///
/// Writes are unbuffered: every byte has been handed to the sink when a
/// `write` call returns.
#[derive(Debug)]
pub struct StreamWriter<W> {
    sink: W,
}

impl<W: ByteSink> StreamWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Send one message. Returns the number of bytes written.
    pub fn write(&mut self, message: &Message) -> Result<usize> {
        write_message(&mut self.sink, message, false)
    }

    /// Send a channel message on all 16 channels.
    ///
    /// The message's own channel is ignored. SysEx is sent once.
    pub fn write_all_channels(&mut self, message: &Message) -> Result<usize> {
        write_message(&mut self.sink, message, true)
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
