//! Property tests over generated messages.

use midiwire::io::decode_all;
use midiwire::msg::Error as MsgError;
use midiwire::prelude::*;
use midiwire::{decode, encode, StatusNibble};
use proptest::collection::vec;
use proptest::prelude::*;

fn u7() -> impl Strategy<Value = u8> {
    0u8..=127
}

/// Any channel message kind that decodes back to itself.
///
/// NoteOn starts at velocity 1: velocity 0 arrives as NoteOff.
fn channel_kind() -> impl Strategy<Value = MessageKind> {
    prop_oneof![
        (u7(), u7()).prop_map(|(n, v)| MessageKind::note_off(n, v).unwrap()),
        (u7(), 1u8..=127).prop_map(|(n, v)| MessageKind::note_on(n, v).unwrap()),
        (u7(), u7()).prop_map(|(n, p)| MessageKind::polyphonic_aftertouch(n, p).unwrap()),
        (u7(), u7()).prop_map(|(c, v)| MessageKind::control_change(c, v).unwrap()),
        (1u8..=128).prop_map(|p| MessageKind::program_change(p).unwrap()),
        u7().prop_map(|p| MessageKind::channel_aftertouch(p).unwrap()),
        (u7(), u7()).prop_map(|(l, m)| MessageKind::pitch_bend(l, m).unwrap()),
    ]
}

/// SysEx payloads, including status-range bytes other than the terminator.
fn sysex_payload() -> impl Strategy<Value = Vec<u8>> {
    vec(any::<u8>().prop_filter("0xF7 terminates SysEx", |b| *b != 0xF7), 1..64)
}

fn any_message() -> impl Strategy<Value = Message> {
    prop_oneof![
        3 => (channel_kind(), 1u8..=16).prop_map(|(kind, ch)| Message::new(kind, ch).unwrap()),
        1 => (u7(), sysex_payload()).prop_map(|(id, data)| Message::sysex(id, data).unwrap()),
    ]
}

fn expected_len(msg: &Message) -> usize {
    match msg.kind().nibble() {
        StatusNibble::ProgramChange | StatusNibble::ChannelAftertouch => 2,
        StatusNibble::SysEx => msg.kind().data().map_or(0, <[u8]>::len) + 3,
        _ => 3,
    }
}

proptest! {
    #[test]
    fn test_decode_inverts_encode(msg in any_message()) {
        let bytes = encode(&msg);
        let (back, used) = decode(&bytes).unwrap();
        prop_assert_eq!(&back, &msg);
        prop_assert_eq!(used, bytes.len());
    }

    #[test]
    fn test_byte_count_per_kind(msg in any_message()) {
        let expected = expected_len(&msg);
        prop_assert_eq!(encode(&msg).len(), expected);
        prop_assert_eq!(msg.len(), expected);
    }

    #[test]
    fn test_back_to_back_messages(messages in vec(any_message(), 0..16)) {
        let bytes: Vec<u8> = messages.iter().flat_map(encode).collect();
        prop_assert_eq!(decode_all(&bytes).unwrap(), messages);
    }

    #[test]
    fn test_status_byte_carries_channel(kind in channel_kind(), ch in 1u8..=16) {
        let msg = Message::new(kind, ch).unwrap();
        prop_assert_eq!(msg.status_byte() & 0x0F, ch - 1);
        prop_assert_eq!(msg.status_byte() >> 4, msg.kind().nibble().as_u8());
    }

    #[test]
    fn test_note_on_zero_velocity_arrives_as_note_off(note in u7(), ch in 1u8..=16) {
        let msg = Message::new(MessageKind::note_on(note, 0).unwrap(), ch).unwrap();
        let (back, _) = decode(&encode(&msg)).unwrap();
        prop_assert_eq!(back.kind(), &MessageKind::note_off(note, 0).unwrap());
        prop_assert_eq!(back.channel(), msg.channel());
    }

    #[test]
    fn test_out_of_range_values_rejected(bad in 128u8..=255, ok in u7()) {
        let is_invalid_field = |r: Result<MessageKind, MsgError>| {
            matches!(r, Err(MsgError::InvalidField { .. }))
        };
        prop_assert!(is_invalid_field(MessageKind::note_on(bad, ok)));
        prop_assert!(is_invalid_field(MessageKind::control_change(ok, bad)));
        prop_assert!(is_invalid_field(MessageKind::pitch_bend(ok, bad)));
        prop_assert!(is_invalid_field(MessageKind::sysex(bad, vec![ok])));
    }

    #[test]
    fn test_channel_out_of_range_rejected(ch in prop_oneof![Just(0u8), 17u8..=255]) {
        let kind = MessageKind::channel_aftertouch(1).unwrap();
        prop_assert_eq!(Message::new(kind, ch), Err(MsgError::InvalidChannel(ch)));
    }
}
