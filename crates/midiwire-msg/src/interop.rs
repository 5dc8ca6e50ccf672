//! Conversion into `midi-msg` types.

use midi_msg::{ChannelVoiceMsg, ControlChange, MidiMsg};

use crate::kind::MessageKind;
use crate::message::Message;

impl Message {
    /// The equivalent `midi_msg::MidiMsg`, for channel messages.
    ///
    /// Returns `None` for SysEx.
    pub fn to_midi_msg(&self) -> Option<MidiMsg> {
        let channel = midi_msg::Channel::from_u8(self.channel()?.index());
        let msg = match self.kind() {
            MessageKind::NoteOff {
                note_number,
                velocity,
            } => ChannelVoiceMsg::NoteOff {
                note: note_number.as_u8(),
                velocity: velocity.as_u8(),
            },
            MessageKind::NoteOn {
                note_number,
                velocity,
            } => ChannelVoiceMsg::NoteOn {
                note: note_number.as_u8(),
                velocity: velocity.as_u8(),
            },
            MessageKind::PolyphonicAftertouch {
                note_number,
                pressure,
            } => ChannelVoiceMsg::PolyPressure {
                note: note_number.as_u8(),
                pressure: pressure.as_u8(),
            },
            MessageKind::ControlChange {
                control_number,
                value,
            } => ChannelVoiceMsg::ControlChange {
                control: ControlChange::CC {
                    control: control_number.as_u8(),
                    value: value.as_u8(),
                },
            },
            MessageKind::ProgramChange { program } => ChannelVoiceMsg::ProgramChange {
                program: program.wire(),
            },
            MessageKind::ChannelAftertouch { pressure } => ChannelVoiceMsg::ChannelPressure {
                pressure: pressure.as_u8(),
            },
            MessageKind::PitchBend { .. } => ChannelVoiceMsg::PitchBend {
                bend: self.kind().bend_value()?,
            },
            MessageKind::SysEx { .. } => return None,
        };
        Some(MidiMsg::ChannelVoice { channel, msg })
    }
}
