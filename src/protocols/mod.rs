//! The packed event word the sequencer host uses to hand MIDI input to controller drivers.
//!
//! ```text
//!  31      24 23  20 19  16 15       8 7        0
//! +----------+------+------+----------+----------+
//! | device   | type | chan | data 1   | data 2   |
//! +----------+------+------+----------+----------+
//! ```
//!
//! `type` and `chan` together are just the MIDI status byte.

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
/// The upper nibble of a MIDI channel-voice status byte
pub enum EventType {
    NoteOff,
    NoteOn,
    PolyPressure,
    ControlChange,
    ProgramChange,
    ChannelPressure,
    PitchBend,
    /// Anything below 0x8 (running data) or 0xF (system messages)
    Other(u8),
}

impl EventType {
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0x8 => Self::NoteOff,
            0x9 => Self::NoteOn,
            0xA => Self::PolyPressure,
            0xB => Self::ControlChange,
            0xC => Self::ProgramChange,
            0xD => Self::ChannelPressure,
            0xE => Self::PitchBend,
            other => Self::Other(other),
        }
    }

    pub fn nibble(self) -> u8 {
        match self {
            Self::NoteOff => 0x8,
            Self::NoteOn => 0x9,
            Self::PolyPressure => 0xA,
            Self::ControlChange => 0xB,
            Self::ProgramChange => 0xC,
            Self::ChannelPressure => 0xD,
            Self::PitchBend => 0xE,
            Self::Other(nibble) => nibble,
        }
    }
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
/// One MIDI short message, tagged with the index of the device it came from
pub struct Event(pub u32);

impl Event {
    /// Pack a raw short message as delivered by the MIDI backend. Missing data bytes are stored
    /// as zero. Returns `None` for empty input and for sysex, which doesn't fit into the word.
    pub fn from_bytes(device_index: u8, data: &[u8]) -> Option<Self> {
        let (status, data1, data2) = match *data {
            [] => return None,
            [0xF0, ..] => return None,
            [status] => (status, 0, 0),
            [status, data1] => (status, data1, 0),
            [status, data1, data2, ..] => (status, data1, data2),
        };

        Some(Self(
            (device_index as u32) << 24
                | (status as u32) << 16
                | (data1 as u32) << 8
                | data2 as u32,
        ))
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    /// Index of the originating device, as assigned by the device manager
    pub fn device_index(self) -> u8 {
        ((self.0 & 0xFF00_0000) >> 24) as u8
    }

    pub fn status(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub fn event_type(self) -> EventType {
        EventType::from_nibble(((self.0 & 0x00F0_0000) >> 20) as u8)
    }

    /// The 1-based MIDI channel (1..=16)
    pub fn channel(self) -> u8 {
        (self.status() & 0x0F) + 1
    }

    pub fn note(self) -> u8 {
        ((self.0 >> 8) & 0x7F) as u8
    }

    pub fn velocity(self) -> u8 {
        (self.0 & 0x7F) as u8
    }

    /// `(note, velocity)` if this is a note-on, `None` for every other event type
    pub fn note_on(self) -> Option<(u8, u8)> {
        match self.event_type() {
            EventType::NoteOn => Some((self.note(), self.velocity())),
            _ => None,
        }
    }
}
