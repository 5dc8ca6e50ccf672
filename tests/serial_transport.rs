//! Codec over thread-backed transports.
//!
//! A driver thread stands in for the serial port and feeds bytes through a
//! crossbeam channel, so timeouts are real waits.

#![cfg(feature = "std")]

use std::io::Cursor;
use std::thread;
use std::time::Duration;

use midiwire::io::{Error as StreamError, Interruption};
use midiwire::prelude::*;

#[test]
fn test_read_from_driver_thread() {
    let (tx, rx) = crossbeam_channel::unbounded::<u8>();
    let driver = thread::spawn(move || {
        let mut writer = StreamWriter::new(tx);
        let msg = Message::new(MessageKind::control_change(74, 64).unwrap(), 2).unwrap();
        writer.write(&msg).unwrap();
        writer.write(&Message::sysex(41, vec![0x10, 0x42]).unwrap()).unwrap();
    });

    let mut reader = StreamReader::new(rx).timeout(Some(Duration::from_secs(5)));
    let cc = reader.read().unwrap().unwrap();
    assert_eq!(cc.kind().control_number(), Some(74));
    let sysex = reader.read().unwrap().unwrap();
    assert_eq!(sysex.kind().data(), Some(&[0x10, 0x42][..]));

    driver.join().unwrap();
    // Sender dropped with the writer
    assert_eq!(reader.read().unwrap(), None);
    assert!(reader.is_ended());
}

#[test]
fn test_idle_line_times_out_cleanly() {
    let (_tx, rx) = crossbeam_channel::unbounded::<u8>();
    let mut reader = StreamReader::new(rx).timeout(Some(Duration::from_millis(5)));
    assert_eq!(reader.read().unwrap(), None);
    assert!(!reader.is_ended());
}

#[test]
fn test_stalled_sysex_is_partial() {
    let (tx, rx) = crossbeam_channel::unbounded::<u8>();
    for b in [0xF0, 43, 1, 2] {
        tx.send(b).unwrap();
    }
    let mut reader = StreamReader::new(rx).timeout(Some(Duration::from_millis(5)));
    match reader.read() {
        Err(StreamError::PartialMessage {
            status: 0xF0,
            received: 4,
            cause: Interruption::Timeout,
        }) => {}
        other => panic!("Expected PartialMessage, got {:?}", other),
    }
    drop(tx);
}

#[test]
fn test_io_port_loop() {
    let msg = Message::new(MessageKind::pitch_bend(0, 64).unwrap(), 16).unwrap();

    let mut out = IoPort::new(Vec::new());
    let mut writer = StreamWriter::new(&mut out);
    assert_eq!(writer.write(&msg).unwrap(), 3);

    let bytes = out.into_inner();
    assert_eq!(bytes, vec![0xEF, 0, 64]);

    let mut midi = MidiConnector::builder()
        .build(IoPort::new(Cursor::new(bytes)))
        .unwrap();
    let back = midi.read().unwrap().unwrap();
    assert_eq!(back, msg);
    assert_eq!(back.kind().bend_value(), Some(8192));
}
