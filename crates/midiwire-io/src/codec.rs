//! One-shot encode/decode over in-memory buffers.

use midiwire_msg::{Channel, Message};

use crate::config::{ChannelFilter, ResyncPolicy};
use crate::error::{Error, Result};
use crate::reader::{read_message, Poll};
use crate::source::SliceSource;

/// Wire bytes of `message`.
pub fn encode(message: &Message) -> Vec<u8> {
    message.content().to_vec()
}

/// Wire bytes of `message` repeated on all 16 channels.
///
/// SysEx has no channel and is encoded once.
pub fn encode_broadcast(message: &Message) -> Vec<u8> {
    if message.is_sysex() {
        return encode(message);
    }
    Channel::all()
        .flat_map(|channel| message.with_channel(channel).content())
        .collect()
}

/// Decode the first message in `bytes`.
///
/// Returns the message and the number of bytes it occupied.
pub fn decode(bytes: &[u8]) -> Result<(Message, usize)> {
    let mut source = SliceSource::new(bytes);
    match read_message(&mut source, None, ChannelFilter::Omni, ResyncPolicy::Off)? {
        Poll::Message(message) => Ok((message, source.position())),
        _ => Err(Error::StreamEnded),
    }
}

/// Decode every message in `bytes`. Fails on the first malformed one.
pub fn decode_all(bytes: &[u8]) -> Result<Vec<Message>> {
    let mut source = SliceSource::new(bytes);
    let mut messages = Vec::new();
    loop {
        match read_message(&mut source, None, ChannelFilter::Omni, ResyncPolicy::Off)? {
            Poll::Message(message) => messages.push(message),
            _ => return Ok(messages),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::StreamWriter;
    use midiwire_msg::MessageKind;

    #[test]
    fn test_decode_reports_length() {
        let (msg, len) = decode(&[0xB0, 7, 100, 0x90]).unwrap();
        assert_eq!(msg.kind().control_number(), Some(7));
        assert_eq!(len, 3);
    }

    #[test]
    fn test_decode_empty() {
        assert!(matches!(decode(&[]), Err(Error::StreamEnded)));
    }

    #[test]
    fn test_decode_truncated() {
        assert!(matches!(
            decode(&[0xE0, 0]),
            Err(Error::PartialMessage { received: 2, .. })
        ));
    }

    #[test]
    fn test_roundtrip_every_kind() {
        let kinds = [
            MessageKind::note_off(0, 127).unwrap(),
            MessageKind::note_on(127, 1).unwrap(),
            MessageKind::polyphonic_aftertouch(60, 64).unwrap(),
            MessageKind::control_change(74, 0).unwrap(),
            MessageKind::program_change(128).unwrap(),
            MessageKind::channel_aftertouch(99).unwrap(),
            MessageKind::pitch_bend(127, 127).unwrap(),
        ];
        for kind in kinds {
            for channel in Channel::all() {
                let msg = Message::on_channel(kind.clone(), channel);
                let (back, len) = decode(&encode(&msg)).unwrap();
                assert_eq!(back, msg);
                assert_eq!(len, msg.len());
            }
        }

        let sysex = Message::sysex(43, vec![255, 0, 127, 54]).unwrap();
        assert_eq!(decode(&encode(&sysex)).unwrap().0, sysex);
    }

    #[test]
    fn test_decode_all() {
        let msg = Message::new(MessageKind::note_on(60, 100).unwrap(), 1).unwrap();
        let decoded = decode_all(&encode_broadcast(&msg)).unwrap();
        assert_eq!(decoded.len(), 16);
        for (channel, msg) in Channel::all().zip(&decoded) {
            assert_eq!(msg.channel(), Some(channel));
        }
    }

    #[test]
    fn test_encode_broadcast_matches_writer() {
        let msg = Message::new(MessageKind::control_change(64, 127).unwrap(), 9).unwrap();
        let mut writer = StreamWriter::new(Vec::new());
        writer.write_all_channels(&msg).unwrap();
        assert_eq!(encode_broadcast(&msg), writer.into_inner());

        let sysex = Message::sysex(43, vec![1, 2]).unwrap();
        assert_eq!(encode_broadcast(&sysex), encode(&sysex));
    }
}
