//! ProTracker decoder.

use tracing::{debug, trace};

use super::{
    channels_for_magic, pattern_count_for, ProTrackerModule, PtSampleInfo, NUM_SAMPLES,
    SAMPLE_NAME_LEN, SEQUENCE_LEN, TITLE_LEN,
};
use crate::error::Result;
use crate::module::{Sample, SampleInfo};
use crate::note::{Note, NOTE_SIZE};
use crate::pattern::{Pattern, Row, PROTRACKER_ROWS};
use crate::reader::ByteReader;

/// Sample record before its PCM has been located.
struct SampleRecord {
    name: String,
    length_words: u16,
    info: PtSampleInfo,
}

impl ProTrackerModule {
    /// Decode a ProTracker module from raw bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(data);

        let title = reader.read_string(TITLE_LEN)?;

        let mut records = Vec::with_capacity(NUM_SAMPLES);
        for _ in 0..NUM_SAMPLES {
            records.push(read_sample_record(&mut reader)?);
        }

        let song_length = reader.read_u8()?;
        let restart_position = reader.read_u8()?;
        let sequence_table: [u8; SEQUENCE_LEN] = reader.read_array()?;

        let magic: [u8; 4] = reader.read_array()?;
        let (num_channels, magic) = match channels_for_magic(&magic) {
            Some(channels) => (channels, Some(magic)),
            None => {
                // No magic number: those four bytes already belong to pattern 0.
                reader.rewind(4);
                (4, None)
            }
        };

        let num_patterns = pattern_count_for(&sequence_table);
        debug!(
            num_patterns,
            num_channels,
            offset = reader.position(),
            "reading ProTracker patterns"
        );

        let mut patterns = Vec::with_capacity(num_patterns);
        for _ in 0..num_patterns {
            patterns.push(read_pattern(&mut reader, num_channels)?);
        }

        let mut samples = Vec::with_capacity(NUM_SAMPLES);
        for record in records {
            let length = record.length_words as usize * 2;
            trace!(name = %record.name, offset = reader.position(), length, "reading sample");
            let pcm = reader.read_bytes(length)?;
            samples.push(Sample {
                name: record.name,
                filename: None,
                length: length as u32,
                data: pcm.to_vec(),
                info: SampleInfo::ProTracker(record.info),
            });
        }

        debug!(
            offset = reader.position(),
            length = reader.len(),
            "done loading ProTracker module"
        );

        Ok(Self {
            title,
            song_length,
            restart_position,
            sequence_table,
            magic,
            num_channels,
            patterns,
            samples,
        })
    }
}

fn read_sample_record(reader: &mut ByteReader<'_>) -> Result<SampleRecord> {
    let name = reader.read_string(SAMPLE_NAME_LEN)?;
    let length_words = reader.read_u16_be()?;
    let finetune = reader.read_u8()?;
    let volume = reader.read_u8()?;
    let repeat_offset = reader.read_u16_be()?;
    let repeat_length = reader.read_u16_be()?;
    Ok(SampleRecord {
        name,
        length_words,
        info: PtSampleInfo {
            finetune,
            volume,
            repeat_offset,
            repeat_length,
        },
    })
}

fn read_pattern(reader: &mut ByteReader<'_>, num_channels: usize) -> Result<Pattern> {
    let mut pattern = Pattern::new(PROTRACKER_ROWS, num_channels);
    for row_index in 0..PROTRACKER_ROWS {
        let mut row = Row::empty(num_channels);
        for note in row.notes.iter_mut() {
            *note = Note::decode(reader.read_array::<NOTE_SIZE>()?);
        }
        pattern.set_row(row_index, &row)?;
    }
    Ok(pattern)
}
