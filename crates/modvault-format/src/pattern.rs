//! Fixed-shape pattern grid backed by packed note bytes.

use crate::error::{ModuleError, Result};
use crate::note::{Note, NOTE_SIZE};

/// Rows in every ProTracker pattern.
pub const PROTRACKER_ROWS: usize = 64;

/// One row of a pattern: a note per channel, indexed by channel number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub notes: Vec<Note>,
}

impl Row {
    /// A row of `num_channels` empty notes.
    pub fn empty(num_channels: usize) -> Self {
        Self {
            notes: vec![Note::empty(); num_channels],
        }
    }

    pub fn num_channels(&self) -> usize {
        self.notes.len()
    }
}

/// A `rows x channels` grid of packed four-byte notes.
///
/// The raw buffer always holds exactly `rows * channels * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    num_rows: usize,
    num_channels: usize,
    data: Vec<u8>,
}

impl Pattern {
    /// Create an all-empty pattern.
    pub fn new(num_rows: usize, num_channels: usize) -> Self {
        Self {
            num_rows,
            num_channels,
            data: vec![0; num_rows * num_channels * NOTE_SIZE],
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// The packed note bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Decode the note at `row`/`channel`.
    pub fn note(&self, row: usize, channel: usize) -> Result<Note> {
        if row >= self.num_rows {
            return Err(ModuleError::out_of_range("row", row, self.num_rows));
        }
        if channel >= self.num_channels {
            return Err(ModuleError::out_of_range(
                "channel",
                channel,
                self.num_channels,
            ));
        }
        let offset = self.row_offset(row) + channel * NOTE_SIZE;
        let mut bytes = [0u8; NOTE_SIZE];
        bytes.copy_from_slice(&self.data[offset..offset + NOTE_SIZE]);
        Ok(Note::decode(bytes))
    }

    /// Decode a whole row.
    pub fn row(&self, row: usize) -> Result<Row> {
        if row >= self.num_rows {
            return Err(ModuleError::out_of_range("row", row, self.num_rows));
        }
        let notes = (0..self.num_channels)
            .map(|channel| self.note(row, channel))
            .collect::<Result<Vec<_>>>()?;
        Ok(Row { notes })
    }

    /// Iterate over every decoded row in order.
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.data
            .chunks_exact(self.num_channels.max(1) * NOTE_SIZE)
            .map(|chunk| Row {
                notes: chunk
                    .chunks_exact(NOTE_SIZE)
                    .map(|b| Note::decode([b[0], b[1], b[2], b[3]]))
                    .collect(),
            })
    }

    /// Overwrite a row. Only decoders and the document importer build patterns.
    pub(crate) fn set_row(&mut self, row: usize, value: &Row) -> Result<()> {
        if row >= self.num_rows {
            return Err(ModuleError::out_of_range("row", row, self.num_rows));
        }
        if value.num_channels() != self.num_channels {
            return Err(ModuleError::out_of_range(
                "channel",
                value.num_channels(),
                self.num_channels,
            ));
        }
        let start = self.row_offset(row);
        for (channel, note) in value.notes.iter().enumerate() {
            let offset = start + channel * NOTE_SIZE;
            self.data[offset..offset + NOTE_SIZE].copy_from_slice(&note.encode());
        }
        Ok(())
    }

    fn row_offset(&self, row: usize) -> usize {
        row * self.num_channels * NOTE_SIZE
    }
}
