//! Adapter for `std::io` transports.

use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::source::{ByteSink, ByteSource};

/// Wraps any `Read + Write` handle, such as an opened serial port.
///
/// Port configuration (baud rate, read timeout) stays with the handle: the
/// `timeout` argument of [`ByteSource::read_byte`] is not applied here, and a
/// handle-level timeout surfaces as `StreamTimeout`.
#[derive(Debug)]
pub struct IoPort<T> {
    inner: T,
}

impl<T> IoPort<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read> ByteSource for IoPort<T> {
    fn read_byte(&mut self, _timeout: Option<Duration>) -> Result<u8> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Err(Error::StreamEnded),
                Ok(_) => return Ok(buf[0]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                    return Err(Error::StreamTimeout)
                }
                Err(e) => return Err(Error::Io(e)),
            }
        }
    }
}

impl<T: Write> ByteSink for IoPort<T> {
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.inner.write_all(&[byte])?;
        self.inner.flush()?;
        Ok(())
    }
}
