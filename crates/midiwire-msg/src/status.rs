//! Status byte layout and the per-kind field table.
//!
//! The high nibble of a status byte selects the message kind, the low nibble
//! the channel. SysEx is the exception: its status is always `0xF0`.

use crate::channel::Channel;
use crate::error::{Error, Result};

/// First byte of a System Exclusive frame.
pub const SYSEX_START: u8 = 0xF0;

/// Last byte of a System Exclusive frame. Never part of the payload.
pub const SYSEX_END: u8 = 0xF7;

/// The message kind encoded in a status byte's high nibble.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum StatusNibble {
    NoteOff = 0x8,
    NoteOn = 0x9,
    PolyphonicAftertouch = 0xA,
    ControlChange = 0xB,
    ProgramChange = 0xC,
    ChannelAftertouch = 0xD,
    PitchBend = 0xE,
    SysEx = 0xF,
}

/// Field names per kind, indexed by `nibble - 0x8`.
static FIELD_TABLE: [&[&str]; 8] = [
    &["note_number", "velocity"],
    &["note_number", "velocity"],
    &["note_number", "pressure"],
    &["control_number", "value"],
    &["program_number"],
    &["pressure"],
    &["lsbyte", "msbyte"],
    &["manufacturer_id", "data"],
];

impl StatusNibble {
    pub const ALL: [StatusNibble; 8] = [
        StatusNibble::NoteOff,
        StatusNibble::NoteOn,
        StatusNibble::PolyphonicAftertouch,
        StatusNibble::ControlChange,
        StatusNibble::ProgramChange,
        StatusNibble::ChannelAftertouch,
        StatusNibble::PitchBend,
        StatusNibble::SysEx,
    ];

    /// Classify a full status byte.
    ///
    /// Bytes below `0x80` are data bytes, and `0xF1..=0xFF` (system common and
    /// real-time) are not modeled, so both fail with `UnrecognizedStatus`.
    pub fn from_status(status: u8) -> Result<Self> {
        match status {
            0x80..=0xEF => Self::from_nibble(status >> 4).ok_or(Error::UnrecognizedStatus(status)),
            SYSEX_START => Ok(StatusNibble::SysEx),
            _ => Err(Error::UnrecognizedStatus(status)),
        }
    }

    /// Map a bare 4-bit kind number (`0x8..=0xF`).
    pub const fn from_nibble(nibble: u8) -> Option<Self> {
        match nibble {
            0x8 => Some(StatusNibble::NoteOff),
            0x9 => Some(StatusNibble::NoteOn),
            0xA => Some(StatusNibble::PolyphonicAftertouch),
            0xB => Some(StatusNibble::ControlChange),
            0xC => Some(StatusNibble::ProgramChange),
            0xD => Some(StatusNibble::ChannelAftertouch),
            0xE => Some(StatusNibble::PitchBend),
            0xF => Some(StatusNibble::SysEx),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            StatusNibble::NoteOff => "NoteOff",
            StatusNibble::NoteOn => "NoteOn",
            StatusNibble::PolyphonicAftertouch => "PolyphonicAftertouch",
            StatusNibble::ControlChange => "ControlChange",
            StatusNibble::ProgramChange => "ProgramChange",
            StatusNibble::ChannelAftertouch => "ChannelAftertouch",
            StatusNibble::PitchBend => "PitchBend",
            StatusNibble::SysEx => "SysEx",
        }
    }

    /// Names of the fields this kind carries, in wire order.
    #[inline]
    pub fn field_names(self) -> &'static [&'static str] {
        FIELD_TABLE[(self as u8 - 0x8) as usize]
    }

    /// Number of data bytes following the status byte.
    ///
    /// `None` for SysEx, whose length is only known once `0xF7` arrives.
    pub const fn data_len(self) -> Option<usize> {
        match self {
            StatusNibble::ProgramChange | StatusNibble::ChannelAftertouch => Some(1),
            StatusNibble::SysEx => None,
            _ => Some(2),
        }
    }

    #[inline]
    pub const fn is_channel_message(self) -> bool {
        !matches!(self, StatusNibble::SysEx)
    }
}

impl TryFrom<u8> for StatusNibble {
    type Error = Error;

    fn try_from(status: u8) -> Result<Self> {
        Self::from_status(status)
    }
}

/// High nibble of a status byte.
#[inline]
pub const fn nibble_from_status(status: u8) -> u8 {
    status >> 4
}

/// 1-based channel carried in a status byte's low nibble.
#[inline]
pub const fn channel_from_status(status: u8) -> u8 {
    (status & 0x0F) + 1
}

/// Status byte for a channel message: kind in the high nibble, channel index in the low.
///
/// SysEx is not channel-scoped and always yields `0xF0`.
#[inline]
pub const fn status_value(nibble: StatusNibble, channel: Channel) -> u8 {
    match nibble {
        StatusNibble::SysEx => SYSEX_START,
        _ => (nibble.as_u8() << 4) | channel.index(),
    }
}
