//! ProTracker (MOD) modules.
//!
//! # Layout
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 20 | title |
//! | 20 | 31 x 30 | sample records |
//! | 950 | 1 | song length |
//! | 951 | 1 | restart position |
//! | 952 | 128 | sequence (order) table |
//! | 1080 | 4 | magic number, optional |
//! | 1084 | patterns x 64 x channels x 4 | pattern data |
//! | ... | | sample PCM, back to back |
//!
//! Sample lengths and loop points are stored as big-endian word counts.

mod decode;
mod writer;

#[cfg(test)]
mod tests;

pub use writer::{ModSampleRecord, ModWriter};

use crate::error::{ModuleError, Result};
use crate::pattern::Pattern;
use crate::module::Sample;

/// Title field width.
pub const TITLE_LEN: usize = 20;
/// Number of sample records in a 31-sample module.
pub const NUM_SAMPLES: usize = 31;
/// Size of one sample record.
pub const SAMPLE_RECORD_LEN: usize = 30;
/// Sample name field width.
pub const SAMPLE_NAME_LEN: usize = 22;
/// Sequence table entries.
pub const SEQUENCE_LEN: usize = 128;
/// Offset of the magic number when present.
pub const MAGIC_OFFSET: usize = TITLE_LEN + NUM_SAMPLES * SAMPLE_RECORD_LEN + 2 + SEQUENCE_LEN;

/// Channel count implied by a magic number, or `None` if it is not one.
pub fn channels_for_magic(magic: &[u8; 4]) -> Option<usize> {
    match magic {
        b"M.K." | b"FLT4" | b"M!K!" => Some(4),
        b"6CHN" => Some(6),
        b"8CHN" | b"FLT8" => Some(8),
        _ => None,
    }
}

/// Magic number written for a channel count.
pub fn magic_for_channels(channels: usize) -> Option<&'static [u8; 4]> {
    match channels {
        4 => Some(b"M.K."),
        6 => Some(b"6CHN"),
        8 => Some(b"8CHN"),
        _ => None,
    }
}

/// ProTracker sample record fields. Loop points are in words, as stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PtSampleInfo {
    /// Finetune nibble (signed 4-bit in the low nibble).
    pub finetune: u8,
    /// Volume 0-64.
    pub volume: u8,
    /// Loop start in words.
    pub repeat_offset: u16,
    /// Loop length in words.
    pub repeat_length: u16,
}

/// A decoded ProTracker module.
#[derive(Debug, Clone)]
pub struct ProTrackerModule {
    pub(crate) title: String,
    pub(crate) song_length: u8,
    pub(crate) restart_position: u8,
    pub(crate) sequence_table: [u8; SEQUENCE_LEN],
    pub(crate) magic: Option<[u8; 4]>,
    pub(crate) num_channels: usize,
    pub(crate) patterns: Vec<Pattern>,
    pub(crate) samples: Vec<Sample>,
}

impl ProTrackerModule {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn song_length(&self) -> u8 {
        self.song_length
    }

    pub fn restart_position(&self) -> u8 {
        self.restart_position
    }

    /// The full 128-entry sequence table.
    pub fn sequence_table(&self) -> &[u8; SEQUENCE_LEN] {
        &self.sequence_table
    }

    /// The played order: the first `song_length` sequence entries.
    pub fn order(&self) -> &[u8] {
        let len = (self.song_length as usize).min(SEQUENCE_LEN);
        &self.sequence_table[..len]
    }

    /// Magic number, or `None` when the file has none.
    pub fn magic(&self) -> Option<&[u8; 4]> {
        self.magic.as_ref()
    }

    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Number of patterns: the highest sequence entry plus one.
    ///
    /// The whole table is scanned, not just the first `song_length` entries,
    /// so stray values in unused slots raise the count.
    pub fn pattern_count(&self) -> usize {
        pattern_count_for(&self.sequence_table)
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn pattern(&self, index: usize) -> Result<&Pattern> {
        self.patterns
            .get(index)
            .ok_or_else(|| ModuleError::out_of_range("pattern", index, self.patterns.len()))
    }

    /// All 31 sample slots, including empty ones.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn sample(&self, index: usize) -> Result<&Sample> {
        self.samples
            .get(index)
            .ok_or_else(|| ModuleError::out_of_range("sample", index, self.samples.len()))
    }
}

pub(crate) fn pattern_count_for(sequence_table: &[u8]) -> usize {
    sequence_table.iter().copied().max().unwrap_or(0) as usize + 1
}
