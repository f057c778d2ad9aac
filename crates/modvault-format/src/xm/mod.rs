//! FastTracker II Extended Modules (XM).
//!
//! # XM Format Overview
//!
//! An XM file is a fixed 60-byte preamble, a variable-size song header whose
//! size is stored at offset 60, the packed patterns, then every instrument
//! followed by its sample headers and its sample payloads.
//!
//! - Instruments own their samples (one-to-many)
//! - Sample payloads are delta coded, 8-bit or 16-bit
//! - ModPlug extends this with 4-bit ADPCM (data type `0xAD`)
//!
//! Pattern bodies are walked only to find where the instruments start; their
//! note data is not decoded.

mod decode;


use crate::module::Instrument;

/// ID text at offset 0.
pub const XM_ID_TEXT: &[u8; 17] = b"Extended Module: ";
/// Size of the fixed pattern header.
pub const XM_PATTERN_HEADER_LEN: usize = 9;
/// Size of a sample header as laid out in the file.
pub const XM_SAMPLE_HEADER_LEN: usize = 40;
/// Entries in the pattern order table.
pub const XM_ORDER_TABLE_LEN: usize = 256;

/// Loop mode from the low two bits of the sample type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmLoopType {
    None,
    Forward,
    PingPong,
}

/// XM sample header fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XmSampleInfo {
    /// Loop start in bytes.
    pub loop_start: u32,
    /// Loop length in bytes.
    pub loop_length: u32,
    pub volume: u8,
    pub finetune: i8,
    /// Bits 0-1 loop type, bit 4 16-bit.
    pub sample_type: u8,
    pub panning: u8,
    pub relative_note: i8,
    /// `0x00` delta coded, `0xAD` ModPlug ADPCM.
    pub data_type: u8,
}

impl XmSampleInfo {
    pub fn is_16bit(&self) -> bool {
        self.sample_type & 0x10 != 0
    }

    pub fn loop_type(&self) -> XmLoopType {
        match self.sample_type & 0x03 {
            0 => XmLoopType::None,
            1 => XmLoopType::Forward,
            // 3 is undefined; trackers treat it as ping-pong.
            _ => XmLoopType::PingPong,
        }
    }

    /// ADPCM applies to 8-bit samples only.
    pub fn is_adpcm(&self) -> bool {
        !self.is_16bit() && self.data_type == crate::sample::ADPCM4_DATA_TYPE
    }
}

/// Summary of one packed pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmPatternInfo {
    pub num_rows: u16,
    pub packed_size: u16,
}

/// A decoded XM module.
#[derive(Debug, Clone)]
pub struct XmModule {
    pub(crate) title: String,
    pub(crate) tracker_name: String,
    pub(crate) version: u16,
    pub(crate) header_size: u32,
    pub(crate) song_length: u16,
    pub(crate) restart_position: u16,
    pub(crate) num_channels: u16,
    pub(crate) flags: u16,
    pub(crate) tempo: u16,
    pub(crate) bpm: u16,
    pub(crate) order_table: Vec<u8>,
    pub(crate) patterns: Vec<XmPatternInfo>,
    pub(crate) instruments: Vec<Instrument>,
}

impl XmModule {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Tracker name field, shown as the author by most tools.
    pub fn author(&self) -> &str {
        &self.tracker_name
    }

    /// Format version, `0x0104` for current files.
    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn header_size(&self) -> u32 {
        self.header_size
    }

    pub fn song_length(&self) -> u16 {
        self.song_length
    }

    pub fn restart_position(&self) -> u16 {
        self.restart_position
    }

    pub fn num_channels(&self) -> u16 {
        self.num_channels
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    pub fn linear_frequency_table(&self) -> bool {
        self.flags & 1 != 0
    }

    pub fn tempo(&self) -> u16 {
        self.tempo
    }

    pub fn bpm(&self) -> u16 {
        self.bpm
    }

    /// The full 256-entry order table.
    pub fn order_table(&self) -> &[u8] {
        &self.order_table
    }

    /// The played order: the first `song_length` entries.
    pub fn order(&self) -> &[u8] {
        let len = (self.song_length as usize).min(self.order_table.len());
        &self.order_table[..len]
    }

    pub fn patterns(&self) -> &[XmPatternInfo] {
        &self.patterns
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }
}
