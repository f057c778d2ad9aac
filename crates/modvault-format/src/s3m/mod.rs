//! ScreamTracker 3 (S3M) modules.
//!
//! S3M addresses instruments and patterns through *parapointers*: 16-bit
//! offsets counted in 16-byte paragraphs. They are plain integers into the
//! same buffer and are multiplied by 16 and bounds-checked before use.
//!
//! Reference: <https://moddingwiki.shikadi.net/wiki/S3M_Format>

mod decode;


use crate::module::Sample;

/// Module signature at offset 44.
pub const S3M_SIGNATURE: &[u8; 4] = b"SCRM";
/// Sample record signature at record offset 76.
pub const S3M_SAMPLE_SIGNATURE: &[u8; 4] = b"SCRS";
/// Offset of the order list.
pub const S3M_ORDER_OFFSET: usize = 96;
/// Size of a sample record up to and including its signature.
pub const S3M_SAMPLE_RECORD_LEN: usize = 80;

/// Instrument record type for a PCM sample.
pub const S3M_TYPE_EMPTY: u8 = 0;
pub const S3M_TYPE_SAMPLE: u8 = 1;

/// PCM convention declared in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum S3mSampleFormat {
    Signed,
    Unsigned,
    Unknown(u16),
}

impl From<u16> for S3mSampleFormat {
    fn from(value: u16) -> Self {
        match value {
            1 => S3mSampleFormat::Signed,
            2 => S3mSampleFormat::Unsigned,
            other => S3mSampleFormat::Unknown(other),
        }
    }
}

/// S3M sample record fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct S3mSampleInfo {
    /// Byte offset of the PCM data (memseg parapointer x 16).
    pub data_offset: usize,
    pub loop_start: u32,
    pub loop_end: u32,
    pub volume: u8,
    /// 0 = raw PCM, 1 = DP30ADPCM (stored as-is).
    pub pack: u8,
    /// Bit 0 loop, bit 1 stereo, bit 2 16-bit.
    pub flags: u8,
    /// Playback rate for middle C.
    pub c2_speed: u32,
}

impl S3mSampleInfo {
    pub fn is_looped(&self) -> bool {
        self.flags & 0x01 != 0
    }

    pub fn is_stereo(&self) -> bool {
        self.flags & 0x02 != 0
    }

    pub fn is_16bit(&self) -> bool {
        self.flags & 0x04 != 0
    }
}

/// A decoded S3M module. Pattern bodies are counted but not parsed.
#[derive(Debug, Clone)]
pub struct S3mModule {
    pub(crate) title: String,
    pub(crate) flags: u16,
    pub(crate) tracker_version: u16,
    pub(crate) sample_type: S3mSampleFormat,
    pub(crate) global_volume: u8,
    pub(crate) initial_speed: u8,
    pub(crate) initial_tempo: u8,
    pub(crate) master_volume: u8,
    pub(crate) stereo: bool,
    pub(crate) orders: Vec<u8>,
    pub(crate) pattern_offsets: Vec<usize>,
    pub(crate) samples: Vec<Sample>,
}

impl S3mModule {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    /// Upper nibble is the tracker id, lower 12 bits the version.
    pub fn tracker_version(&self) -> u16 {
        self.tracker_version
    }

    pub fn sample_type(&self) -> S3mSampleFormat {
        self.sample_type
    }

    pub fn global_volume(&self) -> u8 {
        self.global_volume
    }

    pub fn initial_speed(&self) -> u8 {
        self.initial_speed
    }

    pub fn initial_tempo(&self) -> u8 {
        self.initial_tempo
    }

    /// Master volume with the stereo bit stripped.
    pub fn master_volume(&self) -> u8 {
        self.master_volume
    }

    pub fn is_stereo(&self) -> bool {
        self.stereo
    }

    pub fn orders(&self) -> &[u8] {
        &self.orders
    }

    /// Byte offsets of the (unparsed) pattern bodies.
    pub fn pattern_offsets(&self) -> &[usize] {
        &self.pattern_offsets
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_offsets.len()
    }

    /// Non-empty sample records in table order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}
