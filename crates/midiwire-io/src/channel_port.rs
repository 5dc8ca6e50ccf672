//! Byte source/sink over crossbeam channels.
//!
//! Useful when a driver thread owns the serial port and forwards raw bytes:
//! the per-read timeout maps directly onto `recv_timeout`.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use crate::error::{Error, Result};
use crate::source::{ByteSink, ByteSource};

impl ByteSource for Receiver<u8> {
    fn read_byte(&mut self, timeout: Option<Duration>) -> Result<u8> {
        match timeout {
            Some(timeout) => self.recv_timeout(timeout).map_err(|e| match e {
                RecvTimeoutError::Timeout => Error::StreamTimeout,
                RecvTimeoutError::Disconnected => Error::StreamEnded,
            }),
            None => self.recv().map_err(|_| Error::StreamEnded),
        }
    }
}

impl ByteSink for Sender<u8> {
    fn write_byte(&mut self, byte: u8) -> Result<()> {
        // A dropped receiver is the same as an unplugged cable
        self.send(byte).map_err(|_| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "MIDI byte receiver disconnected",
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receiver_timeout() {
        let (_tx, mut rx) = crossbeam_channel::unbounded::<u8>();
        let err = rx.read_byte(Some(Duration::from_millis(1))).unwrap_err();
        assert!(matches!(err, Error::StreamTimeout));
    }

    #[test]
    fn test_receiver_disconnected() {
        let (tx, mut rx) = crossbeam_channel::unbounded::<u8>();
        drop(tx);
        assert!(matches!(rx.read_byte(None), Err(Error::StreamEnded)));
        assert!(matches!(
            rx.read_byte(Some(Duration::from_millis(1))),
            Err(Error::StreamEnded)
        ));
    }

    #[test]
    fn test_sender_to_receiver() {
        let (mut tx, mut rx) = crossbeam_channel::unbounded::<u8>();
        tx.write_byte(0xF0).unwrap();
        assert_eq!(rx.read_byte(None).unwrap(), 0xF0);

        drop(rx);
        assert!(matches!(tx.write_byte(1), Err(Error::Io(_))));
    }
}
