//! ProTracker file writer - assembles header, patterns and PCM into a MOD file.

use byteorder::{BigEndian, WriteBytesExt};
use std::io::Write;

use super::{
    magic_for_channels, pattern_count_for, NUM_SAMPLES, SAMPLE_NAME_LEN, SAMPLE_RECORD_LEN,
    SEQUENCE_LEN, TITLE_LEN,
};
use crate::error::{ModuleError, Result};
use crate::pattern::{Pattern, PROTRACKER_ROWS};
use crate::text::fixed_field;

/// Largest sample a MOD record can describe: 65535 words.
pub const MAX_SAMPLE_BYTES: usize = u16::MAX as usize * 2;

/// A sample slot to be written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModSampleRecord {
    pub name: String,
    pub finetune: u8,
    pub volume: u8,
    /// Loop start in words.
    pub repeat_offset: u16,
    /// Loop length in words.
    pub repeat_length: u16,
    /// PCM bytes. The stored word length is always derived from this.
    pub data: Vec<u8>,
}

impl ModSampleRecord {
    /// PCM padded to a whole number of words.
    fn padded_data(&self) -> Vec<u8> {
        let mut data = self.data.clone();
        if data.len() % 2 != 0 {
            data.push(0);
        }
        data
    }
}

/// Builder for ProTracker module bytes.
#[derive(Debug, Clone)]
pub struct ModWriter {
    pub title: String,
    pub restart_position: u8,
    song_length: u8,
    num_channels: usize,
    order: Vec<u8>,
    samples: Vec<Option<ModSampleRecord>>,
    patterns: Vec<Pattern>,
}

impl ModWriter {
    /// Start a module with the given title and channel count (4, 6 or 8).
    pub fn new(title: &str, num_channels: usize) -> Result<Self> {
        if magic_for_channels(num_channels).is_none() {
            return Err(ModuleError::InvalidDocument(format!(
                "cannot write a MOD with {} channels (expected 4, 6 or 8)",
                num_channels
            )));
        }
        Ok(Self {
            title: title.to_string(),
            restart_position: 0,
            song_length: 0,
            num_channels,
            order: Vec::new(),
            samples: vec![None; NUM_SAMPLES],
            patterns: Vec::new(),
        })
    }

    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Set the played order. Song length becomes its length, capped at 128.
    pub fn set_order_table(&mut self, order: &[u8]) {
        self.order = order.iter().copied().take(SEQUENCE_LEN).collect();
        self.song_length = self.order.len() as u8;
    }

    /// Override the song length written to the header.
    pub fn set_song_length(&mut self, song_length: u8) {
        self.song_length = song_length;
    }

    pub fn song_length(&self) -> u8 {
        self.song_length
    }

    /// Highest pattern index the sequence table refers to, plus one.
    ///
    /// A decoder expects exactly this many patterns after the header.
    pub fn required_patterns(&self) -> usize {
        pattern_count_for(&self.order)
    }

    /// Place a sample in slot `index` (0-based, 0..31).
    pub fn set_sample(&mut self, index: usize, sample: ModSampleRecord) -> Result<()> {
        if index >= NUM_SAMPLES {
            return Err(ModuleError::out_of_range("sample", index, NUM_SAMPLES));
        }
        if sample.data.len() > MAX_SAMPLE_BYTES {
            return Err(ModuleError::InvalidDocument(format!(
                "sample {} has {} bytes of PCM (maximum {})",
                index + 1,
                sample.data.len(),
                MAX_SAMPLE_BYTES
            )));
        }
        self.samples[index] = Some(sample);
        Ok(())
    }

    /// Append a pattern. It must be 64 rows of this module's channel count.
    pub fn add_pattern(&mut self, pattern: Pattern) -> Result<()> {
        if pattern.num_rows() != PROTRACKER_ROWS {
            return Err(ModuleError::out_of_range(
                "row",
                pattern.num_rows(),
                PROTRACKER_ROWS,
            ));
        }
        if pattern.num_channels() != self.num_channels {
            return Err(ModuleError::out_of_range(
                "channel",
                pattern.num_channels(),
                self.num_channels,
            ));
        }
        self.patterns.push(pattern);
        Ok(())
    }

    /// Write the complete module.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&fixed_field::<TITLE_LEN>("title", &self.title)?)?;

        for slot in &self.samples {
            match slot {
                Some(sample) => {
                    let words = sample.padded_data().len() / 2;
                    let name = fixed_field::<SAMPLE_NAME_LEN>("sample name", &sample.name)?;
                    writer.write_all(&name)?;
                    writer.write_u16::<BigEndian>(words as u16)?;
                    writer.write_u8(sample.finetune)?;
                    writer.write_u8(sample.volume)?;
                    writer.write_u16::<BigEndian>(sample.repeat_offset)?;
                    writer.write_u16::<BigEndian>(sample.repeat_length)?;
                }
                None => writer.write_all(&[0u8; SAMPLE_RECORD_LEN])?,
            }
        }

        writer.write_u8(self.song_length)?;
        writer.write_u8(self.restart_position)?;
        let mut sequence = [0u8; SEQUENCE_LEN];
        sequence[..self.order.len()].copy_from_slice(&self.order);
        writer.write_all(&sequence)?;

        // new() only accepts channel counts that have a magic number.
        let magic = magic_for_channels(self.num_channels).unwrap_or(b"M.K.");
        writer.write_all(magic)?;

        for pattern in &self.patterns {
            writer.write_all(pattern.data())?;
        }

        for sample in self.samples.iter().flatten() {
            writer.write_all(&sample.padded_data())?;
        }

        Ok(())
    }

    /// Write the module to a byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        Ok(buffer)
    }
}
