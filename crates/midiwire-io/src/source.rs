//! Byte source and sink contracts.
//!
//! The codec never touches a port directly. It pulls one byte at a time from a
//! [`ByteSource`] and pushes one byte at a time into a [`ByteSink`]; opening,
//! configuring and closing the transport is the caller's business.

use std::collections::VecDeque;
use std::time::Duration;

use crate::error::{Error, Result};

/// Blocking, single-byte input.
pub trait ByteSource {
    /// Read exactly one byte.
    ///
    /// Waits at most `timeout` when one is given, then fails with
    /// `Error::StreamTimeout`. A closed source fails with `Error::StreamEnded`.
    fn read_byte(&mut self, timeout: Option<Duration>) -> Result<u8>;
}

/// Blocking, single-byte output. The codec calls this once per byte, in wire order.
pub trait ByteSink {
    fn write_byte(&mut self, byte: u8) -> Result<()>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn read_byte(&mut self, timeout: Option<Duration>) -> Result<u8> {
        (**self).read_byte(timeout)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    #[inline]
    fn read_byte(&mut self, timeout: Option<Duration>) -> Result<u8> {
        (**self).read_byte(timeout)
    }
}

impl<W: ByteSink + ?Sized> ByteSink for &mut W {
    #[inline]
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        (**self).write_byte(byte)
    }
}

impl<W: ByteSink + ?Sized> ByteSink for Box<W> {
    #[inline]
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        (**self).write_byte(byte)
    }
}

// ============================================================================
// In-memory sources and sinks
// ============================================================================

/// A queue of pending bytes. Draining it ends the stream.
impl ByteSource for VecDeque<u8> {
    fn read_byte(&mut self, _timeout: Option<Duration>) -> Result<u8> {
        self.pop_front().ok_or(Error::StreamEnded)
    }
}

/// Both ends of an in-memory line: reads from the front, writes to the back.
impl ByteSink for VecDeque<u8> {
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.push_back(byte);
        Ok(())
    }
}

impl ByteSink for Vec<u8> {
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.push(byte);
        Ok(())
    }
}

/// Reads from a borrowed byte slice.
#[derive(Clone, Debug)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn read_byte(&mut self, _timeout: Option<Duration>) -> Result<u8> {
        let byte = *self.bytes.get(self.pos).ok_or(Error::StreamEnded)?;
        self.pos += 1;
        Ok(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vecdeque_is_a_loopback() {
        let mut line = VecDeque::new();
        line.write_byte(0x90).unwrap();
        line.write_byte(60).unwrap();
        assert_eq!(line.read_byte(None).unwrap(), 0x90);
        assert_eq!(line.read_byte(None).unwrap(), 60);
        assert!(matches!(line.read_byte(None), Err(Error::StreamEnded)));
    }

    #[test]
    fn test_slice_source_position() {
        let mut src = SliceSource::new(&[1, 2, 3]);
        assert_eq!(src.read_byte(None).unwrap(), 1);
        assert_eq!(src.position(), 1);
        assert_eq!(src.remaining(), &[2, 3]);
        src.read_byte(None).unwrap();
        src.read_byte(None).unwrap();
        assert!(matches!(src.read_byte(None), Err(Error::StreamEnded)));
        assert_eq!(src.position(), 3);
    }

    #[test]
    fn test_boxed_source() {
        let mut src: Box<dyn ByteSource> = Box::new(SliceSource::new(&[7]));
        assert_eq!(src.read_byte(None).unwrap(), 7);
    }
}
