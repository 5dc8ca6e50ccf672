//! Message kinds: the payload of a MIDI message, without its channel.
//!
//! Each variant carries exactly the fields its status nibble defines, and
//! every field is range-checked when the kind is built:
//!
//! | Kind | Fields | Data bytes |
//! |---|---|---|
//! | `NoteOff` / `NoteOn` | note_number, velocity | 2 |
//! | `PolyphonicAftertouch` | note_number, pressure | 2 |
//! | `ControlChange` | control_number, value | 2 |
//! | `ProgramChange` | program_number (1-128) | 1 |
//! | `ChannelAftertouch` | pressure | 1 |
//! | `PitchBend` | lsbyte, msbyte | 2 |
//! | `SysEx` | manufacturer_id, data | variable |
//!
//! # Example
//! ```
//! use midiwire_msg::MessageKind;
//!
//! let kind = MessageKind::note_on(60, 100)?;
//! assert_eq!(kind.velocity(), Some(100));
//! assert_eq!(kind.pressure(), None);
//!
//! // Program numbers are 1-based; the wire byte is one less.
//! let pc = MessageKind::program_change(1)?;
//! assert_eq!(pc.program_number(), Some(1));
//! assert_eq!(pc.data1(), 0);
//! # Ok::<(), midiwire_msg::Error>(())
//! ```

use std::fmt;

use crate::error::{Error, Result};
use crate::status::{StatusNibble, SYSEX_END};
use crate::u7::U7;

/// A Program Change program, stored as its wire value.
///
/// MIDI numbers programs 1-128, while the wire carries 0-127. Only
/// [`Program::new`] applies the offset; [`Program::from_wire`] takes the byte
/// as-is, so the number is never shifted twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub struct Program(U7);

impl Program {
    /// Create a program from its 1-based number (1-128).
    pub fn new(program_number: u8) -> Result<Self> {
        if (1..=128).contains(&program_number) {
            Ok(Self(U7::checked("program_number", program_number - 1)?))
        } else {
            Err(Error::field(
                "program_number",
                format!("{} is outside [1, 128]", program_number),
            ))
        }
    }

    #[inline]
    pub const fn from_wire(byte: U7) -> Self {
        Self(byte)
    }

    /// 1-based program number.
    #[inline]
    pub const fn number(self) -> u8 {
        self.0.as_u8() + 1
    }

    /// 0-based wire byte.
    #[inline]
    pub const fn wire(self) -> u8 {
        self.0.as_u8()
    }
}

impl TryFrom<u8> for Program {
    type Error = Error;

    fn try_from(program_number: u8) -> Result<Self> {
        Self::new(program_number)
    }
}

impl From<Program> for u8 {
    #[inline]
    fn from(program: Program) -> u8 {
        program.number()
    }
}

/// System Exclusive payload: at least one byte, never the `0xF7` terminator.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct SysExData(Vec<u8>);

impl SysExData {
    pub fn new(data: impl Into<Vec<u8>>) -> Result<Self> {
        let data = data.into();
        if data.is_empty() {
            return Err(Error::field("data", "SysEx requires at least one data byte"));
        }
        if let Some(pos) = data.iter().position(|&b| b == SYSEX_END) {
            return Err(Error::field(
                "data",
                format!("byte {} is the reserved SysEx terminator 0xF7", pos),
            ));
        }
        Ok(Self(data))
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<u8>> for SysExData {
    type Error = Error;

    fn try_from(data: Vec<u8>) -> Result<Self> {
        Self::new(data)
    }
}

impl From<SysExData> for Vec<u8> {
    fn from(data: SysExData) -> Vec<u8> {
        data.0
    }
}

impl AsRef<[u8]> for SysExData {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Value of a named field, as returned by [`MessageKind::field`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Byte(u8),
    Bytes(&'a [u8]),
}

impl FieldValue<'_> {
    pub fn as_byte(&self) -> Option<u8> {
        match self {
            FieldValue::Byte(b) => Some(*b),
            FieldValue::Bytes(_) => None,
        }
    }
}

/// The payload of a MIDI message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageKind {
    NoteOff { note_number: U7, velocity: U7 },
    NoteOn { note_number: U7, velocity: U7 },
    PolyphonicAftertouch { note_number: U7, pressure: U7 },
    ControlChange { control_number: U7, value: U7 },
    ProgramChange { program: Program },
    ChannelAftertouch { pressure: U7 },
    PitchBend { lsbyte: U7, msbyte: U7 },
    SysEx { manufacturer_id: U7, data: SysExData },
}

impl MessageKind {
    // ==================== Constructors ====================

    pub fn note_off(note_number: u8, velocity: u8) -> Result<Self> {
        Ok(MessageKind::NoteOff {
            note_number: U7::checked("note_number", note_number)?,
            velocity: U7::checked("velocity", velocity)?,
        })
    }

    /// A velocity of 0 is kept as-is here; only the decoder rewrites it to `NoteOff`.
    pub fn note_on(note_number: u8, velocity: u8) -> Result<Self> {
        Ok(MessageKind::NoteOn {
            note_number: U7::checked("note_number", note_number)?,
            velocity: U7::checked("velocity", velocity)?,
        })
    }

    pub fn polyphonic_aftertouch(note_number: u8, pressure: u8) -> Result<Self> {
        Ok(MessageKind::PolyphonicAftertouch {
            note_number: U7::checked("note_number", note_number)?,
            pressure: U7::checked("pressure", pressure)?,
        })
    }

    pub fn control_change(control_number: u8, value: u8) -> Result<Self> {
        Ok(MessageKind::ControlChange {
            control_number: U7::checked("control_number", control_number)?,
            value: U7::checked("value", value)?,
        })
    }

    /// `program_number` is 1-based (1-128).
    pub fn program_change(program_number: u8) -> Result<Self> {
        Ok(MessageKind::ProgramChange {
            program: Program::new(program_number)?,
        })
    }

    pub fn channel_aftertouch(pressure: u8) -> Result<Self> {
        Ok(MessageKind::ChannelAftertouch {
            pressure: U7::checked("pressure", pressure)?,
        })
    }

    pub fn pitch_bend(lsbyte: u8, msbyte: u8) -> Result<Self> {
        Ok(MessageKind::PitchBend {
            lsbyte: U7::checked("lsbyte", lsbyte)?,
            msbyte: U7::checked("msbyte", msbyte)?,
        })
    }

    /// Pitch bend from a 14-bit value (0-16383, 8192 = center).
    pub fn pitch_bend_value(value: u16) -> Result<Self> {
        if value > 0x3FFF {
            return Err(Error::field(
                "pitch_bend",
                format!("{} is outside [0, 16383]", value),
            ));
        }
        Self::pitch_bend((value & 0x7F) as u8, (value >> 7) as u8)
    }

    /// System Exclusive message. `data` may hold any byte except `0xF7`.
    pub fn sysex(manufacturer_id: u8, data: impl Into<Vec<u8>>) -> Result<Self> {
        Ok(MessageKind::SysEx {
            manufacturer_id: U7::checked("manufacturer_id", manufacturer_id)?,
            data: SysExData::new(data)?,
        })
    }

    /// Build a kind from the data bytes that followed its status byte.
    ///
    /// This is the decoder path: the Program Change byte is taken as the wire
    /// value (no 1-based remap). For SysEx, `data` is the manufacturer id
    /// followed by the payload, without `0xF0`/`0xF7`.
    pub fn from_wire(nibble: StatusNibble, data: &[u8]) -> Result<Self> {
        if let Some(expected) = nibble.data_len() {
            if data.len() != expected {
                return Err(Error::field(
                    "data",
                    format!(
                        "{} takes {} data bytes, got {}",
                        nibble.name(),
                        expected,
                        data.len()
                    ),
                ));
            }
        }

        match nibble {
            StatusNibble::NoteOff => Self::note_off(data[0], data[1]),
            StatusNibble::NoteOn => Self::note_on(data[0], data[1]),
            StatusNibble::PolyphonicAftertouch => Self::polyphonic_aftertouch(data[0], data[1]),
            StatusNibble::ControlChange => Self::control_change(data[0], data[1]),
            StatusNibble::ProgramChange => Ok(MessageKind::ProgramChange {
                program: Program::from_wire(U7::checked("program_number", data[0])?),
            }),
            StatusNibble::ChannelAftertouch => Self::channel_aftertouch(data[0]),
            StatusNibble::PitchBend => Self::pitch_bend(data[0], data[1]),
            StatusNibble::SysEx => match data.split_first() {
                Some((&manufacturer_id, payload)) => Self::sysex(manufacturer_id, payload),
                None => Err(Error::field("manufacturer_id", "missing")),
            },
        }
    }

    /// Rewrite `NoteOn` with velocity 0 as the equivalent `NoteOff`.
    pub fn normalized(self) -> Self {
        match self {
            MessageKind::NoteOn {
                note_number,
                velocity,
            } if velocity == U7::MIN => MessageKind::NoteOff {
                note_number,
                velocity,
            },
            other => other,
        }
    }

    // ==================== Classification ====================

    pub fn nibble(&self) -> StatusNibble {
        match self {
            MessageKind::NoteOff { .. } => StatusNibble::NoteOff,
            MessageKind::NoteOn { .. } => StatusNibble::NoteOn,
            MessageKind::PolyphonicAftertouch { .. } => StatusNibble::PolyphonicAftertouch,
            MessageKind::ControlChange { .. } => StatusNibble::ControlChange,
            MessageKind::ProgramChange { .. } => StatusNibble::ProgramChange,
            MessageKind::ChannelAftertouch { .. } => StatusNibble::ChannelAftertouch,
            MessageKind::PitchBend { .. } => StatusNibble::PitchBend,
            MessageKind::SysEx { .. } => StatusNibble::SysEx,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.nibble().name()
    }

    #[inline]
    pub fn is_sysex(&self) -> bool {
        !self.nibble().is_channel_message()
    }

    #[inline]
    pub fn field_names(&self) -> &'static [&'static str] {
        self.nibble().field_names()
    }

    // ==================== Field access ====================

    #[inline]
    pub fn note_number(&self) -> Option<u8> {
        match self {
            MessageKind::NoteOff { note_number, .. }
            | MessageKind::NoteOn { note_number, .. }
            | MessageKind::PolyphonicAftertouch { note_number, .. } => Some(note_number.as_u8()),
            _ => None,
        }
    }

    #[inline]
    pub fn velocity(&self) -> Option<u8> {
        match self {
            MessageKind::NoteOff { velocity, .. } | MessageKind::NoteOn { velocity, .. } => {
                Some(velocity.as_u8())
            }
            _ => None,
        }
    }

    #[inline]
    pub fn pressure(&self) -> Option<u8> {
        match self {
            MessageKind::PolyphonicAftertouch { pressure, .. }
            | MessageKind::ChannelAftertouch { pressure } => Some(pressure.as_u8()),
            _ => None,
        }
    }

    #[inline]
    pub fn control_number(&self) -> Option<u8> {
        match self {
            MessageKind::ControlChange { control_number, .. } => Some(control_number.as_u8()),
            _ => None,
        }
    }

    #[inline]
    pub fn value(&self) -> Option<u8> {
        match self {
            MessageKind::ControlChange { value, .. } => Some(value.as_u8()),
            _ => None,
        }
    }

    /// 1-based program number (1-128).
    #[inline]
    pub fn program_number(&self) -> Option<u8> {
        match self {
            MessageKind::ProgramChange { program } => Some(program.number()),
            _ => None,
        }
    }

    #[inline]
    pub fn lsbyte(&self) -> Option<u8> {
        match self {
            MessageKind::PitchBend { lsbyte, .. } => Some(lsbyte.as_u8()),
            _ => None,
        }
    }

    #[inline]
    pub fn msbyte(&self) -> Option<u8> {
        match self {
            MessageKind::PitchBend { msbyte, .. } => Some(msbyte.as_u8()),
            _ => None,
        }
    }

    /// 14-bit pitch bend value (`msbyte << 7 | lsbyte`).
    #[inline]
    pub fn bend_value(&self) -> Option<u16> {
        match self {
            MessageKind::PitchBend { lsbyte, msbyte } => {
                Some(((msbyte.as_u8() as u16) << 7) | lsbyte.as_u8() as u16)
            }
            _ => None,
        }
    }

    #[inline]
    pub fn manufacturer_id(&self) -> Option<u8> {
        match self {
            MessageKind::SysEx {
                manufacturer_id, ..
            } => Some(manufacturer_id.as_u8()),
            _ => None,
        }
    }

    /// SysEx payload, without the manufacturer id.
    #[inline]
    pub fn data(&self) -> Option<&[u8]> {
        match self {
            MessageKind::SysEx { data, .. } => Some(data.as_slice()),
            _ => None,
        }
    }

    /// Look up a field by name. `None` if this kind does not define it.
    pub fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        if !self.field_names().contains(&name) {
            return None;
        }
        let byte = match name {
            "note_number" => self.note_number(),
            "velocity" => self.velocity(),
            "pressure" => self.pressure(),
            "control_number" => self.control_number(),
            "value" => self.value(),
            "program_number" => self.program_number(),
            "lsbyte" => self.lsbyte(),
            "msbyte" => self.msbyte(),
            "manufacturer_id" => self.manufacturer_id(),
            "data" => return self.data().map(FieldValue::Bytes),
            _ => None,
        };
        byte.map(FieldValue::Byte)
    }

    // ==================== Wire bytes ====================

    /// First data byte on the wire. For SysEx, the manufacturer id.
    pub fn data1(&self) -> u8 {
        match self {
            MessageKind::NoteOff { note_number, .. }
            | MessageKind::NoteOn { note_number, .. }
            | MessageKind::PolyphonicAftertouch { note_number, .. } => note_number.as_u8(),
            MessageKind::ControlChange { control_number, .. } => control_number.as_u8(),
            MessageKind::ProgramChange { program } => program.wire(),
            MessageKind::ChannelAftertouch { pressure } => pressure.as_u8(),
            MessageKind::PitchBend { lsbyte, .. } => lsbyte.as_u8(),
            MessageKind::SysEx {
                manufacturer_id, ..
            } => manufacturer_id.as_u8(),
        }
    }

    /// Second data byte on the wire, for two-byte kinds.
    pub fn data2(&self) -> Option<u8> {
        match self {
            MessageKind::NoteOff { velocity, .. } | MessageKind::NoteOn { velocity, .. } => {
                Some(velocity.as_u8())
            }
            MessageKind::PolyphonicAftertouch { pressure, .. } => Some(pressure.as_u8()),
            MessageKind::ControlChange { value, .. } => Some(value.as_u8()),
            MessageKind::PitchBend { msbyte, .. } => Some(msbyte.as_u8()),
            MessageKind::ProgramChange { .. }
            | MessageKind::ChannelAftertouch { .. }
            | MessageKind::SysEx { .. } => None,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::ProgramChange { program } => {
                write!(f, "{}({})", self.name(), program.number())
            }
            MessageKind::SysEx {
                manufacturer_id,
                data,
            } => write!(f, "{}({}, {:?})", self.name(), manufacturer_id, data.as_slice()),
            _ => match self.data2() {
                Some(data2) => write!(f, "{}({}, {})", self.name(), self.data1(), data2),
                None => write!(f, "{}({})", self.name(), self.data1()),
            },
        }
    }
}
