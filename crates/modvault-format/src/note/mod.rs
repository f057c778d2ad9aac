//! ProTracker note cell codec and period/pitch-name mapping.
//!
//! A MOD note occupies four bytes:
//!
//! ```text
//!  byte 0      byte 1      byte 2      byte 3
//! iiii pppp   pppp pppp   iiii eeee   xxxx xxxx
//! ```
//!
//! `p` is the 12-bit period, the two `i` nibbles are the high and low halves of
//! the instrument number, `e` is the effect command and `x` its parameter.

mod period;


pub use period::{period_for_name, pitch_name, PERIOD_TABLE};

/// Size of one packed note in bytes.
pub const NOTE_SIZE: usize = 4;

/// Largest period a note cell can hold (12 bits).
pub const MAX_PERIOD: u16 = 0x0FFF;

/// Largest effect command (one nibble).
pub const MAX_EFFECT: u8 = 0x0F;

/// A decoded note cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Note {
    /// Amiga period (0 = no note).
    pub period: u16,
    /// Sample/instrument number (0 = none).
    pub instrument: u8,
    /// Effect command nibble.
    pub effect: u8,
    /// Effect parameter byte.
    pub parameter: u8,
}

impl Note {
    /// Create an empty note.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Unpack a note from its four-byte representation.
    pub fn decode(bytes: [u8; NOTE_SIZE]) -> Self {
        let [b0, b1, b2, b3] = bytes;
        Self {
            period: (((b0 & 0x0F) as u16) << 8) | b1 as u16,
            instrument: (b0 & 0xF0) | ((b2 & 0xF0) >> 4),
            effect: b2 & 0x0F,
            parameter: b3,
        }
    }

    /// Pack the note into four bytes; the exact inverse of [`Note::decode`].
    pub fn encode(&self) -> [u8; NOTE_SIZE] {
        [
            (self.instrument & 0xF0) | ((self.period >> 8) & 0x0F) as u8,
            (self.period & 0xFF) as u8,
            ((self.instrument & 0x0F) << 4) | (self.effect & 0x0F),
            self.parameter,
        ]
    }

    /// True when every field is zero.
    pub fn is_empty(&self) -> bool {
        self.period == 0 && self.instrument == 0 && self.effect == 0 && self.parameter == 0
    }

    /// Pitch name of this note's period, if it is an exact table entry.
    pub fn pitch_name(&self) -> Option<&'static str> {
        pitch_name(self.period).ok()
    }
}
