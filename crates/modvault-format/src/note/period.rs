//! Equal-tempered Amiga period table (finetune 0), five octaves C-0..B-4.

use crate::error::{ModuleError, Result};

/// Number of octaves covered by [`PERIOD_TABLE`].
pub const OCTAVES: usize = 5;

/// Periods per octave, C through B.
pub const NOTES_PER_OCTAVE: usize = 12;

/// Periods for octaves 0-4, highest period (lowest pitch) first.
pub static PERIOD_TABLE: [[u16; NOTES_PER_OCTAVE]; OCTAVES] = [
    [1712, 1616, 1525, 1440, 1357, 1281, 1209, 1141, 1077, 1017, 961, 907],
    [856, 808, 762, 720, 678, 640, 604, 570, 538, 508, 480, 453],
    [428, 404, 381, 360, 339, 320, 302, 285, 269, 254, 240, 226],
    [214, 202, 190, 180, 170, 160, 151, 143, 135, 127, 120, 113],
    [107, 101, 95, 90, 85, 80, 76, 71, 67, 64, 60, 57],
];

static PITCH_NAMES: [[&str; NOTES_PER_OCTAVE]; OCTAVES] = [
    ["C-0", "C#0", "D-0", "D#0", "E-0", "F-0", "F#0", "G-0", "G#0", "A-0", "A#0", "B-0"],
    ["C-1", "C#1", "D-1", "D#1", "E-1", "F-1", "F#1", "G-1", "G#1", "A-1", "A#1", "B-1"],
    ["C-2", "C#2", "D-2", "D#2", "E-2", "F-2", "F#2", "G-2", "G#2", "A-2", "A#2", "B-2"],
    ["C-3", "C#3", "D-3", "D#3", "E-3", "F-3", "F#3", "G-3", "G#3", "A-3", "A#3", "B-3"],
    ["C-4", "C#4", "D-4", "D#4", "E-4", "F-4", "F#4", "G-4", "G#4", "A-4", "A#4", "B-4"],
];

/// Resolve a period to its pitch name (`"C-0"`, `"A#1"`, ...).
///
/// The octave is the first table row whose lowest period does not exceed
/// `period`; the name is only returned for an exact match inside that row.
/// Periods produced by slides or finetune fall between entries and yield
/// [`ModuleError::PeriodNotFound`].
pub fn pitch_name(period: u16) -> Result<&'static str> {
    let octave = PERIOD_TABLE
        .iter()
        .position(|row| period >= row[NOTES_PER_OCTAVE - 1])
        .ok_or(ModuleError::PeriodNotFound { period })?;

    PERIOD_TABLE[octave]
        .iter()
        .position(|&p| p == period)
        .map(|note| PITCH_NAMES[octave][note])
        .ok_or(ModuleError::PeriodNotFound { period })
}

/// Inverse of [`pitch_name`]: the table period for a pitch name.
pub fn period_for_name(name: &str) -> Option<u16> {
    PITCH_NAMES.iter().enumerate().find_map(|(octave, row)| {
        row.iter()
            .position(|&n| n == name)
            .map(|note| PERIOD_TABLE[octave][note])
    })
}
