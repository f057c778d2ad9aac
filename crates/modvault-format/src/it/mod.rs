//! Impulse Tracker modules (IT).
//!
//! Unlike S3M, IT stores absolute 32-bit byte offsets for its instrument,
//! sample and pattern tables. Each instrument record starts with `IMPI` and
//! each sample record with `IMPS`; those markers are verified before any
//! field is read.

mod decode;


use crate::module::{Instrument, Sample};

/// Module signature at offset 0.
pub const IT_SIGNATURE: &[u8; 4] = b"IMPM";
pub const IT_INSTRUMENT_SIGNATURE: &[u8; 4] = b"IMPI";
pub const IT_SAMPLE_SIGNATURE: &[u8; 4] = b"IMPS";
/// Offset of the order list.
pub const IT_ORDER_OFFSET: usize = 192;

/// IT sample header fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItSampleInfo {
    pub global_volume: u8,
    pub flags: u8,
    pub default_volume: u8,
    /// Bit 0 set means signed PCM.
    pub convert: u8,
    pub default_pan: u8,
    pub loop_start: u32,
    pub loop_end: u32,
    pub c5_speed: u32,
    pub sustain_start: u32,
    pub sustain_end: u32,
    /// Absolute offset of the PCM data.
    pub data_pointer: u32,
}

impl ItSampleInfo {
    pub fn has_data(&self) -> bool {
        self.flags & 0x01 != 0
    }

    pub fn is_16bit(&self) -> bool {
        self.flags & 0x02 != 0
    }

    pub fn is_stereo(&self) -> bool {
        self.flags & 0x04 != 0
    }

    /// IT 2.14 compressed payload, kept as stored.
    pub fn is_compressed(&self) -> bool {
        self.flags & 0x08 != 0
    }

    pub fn is_looped(&self) -> bool {
        self.flags & 0x10 != 0
    }

    pub fn has_sustain_loop(&self) -> bool {
        self.flags & 0x20 != 0
    }

    pub fn is_signed(&self) -> bool {
        self.convert & 0x01 != 0
    }
}

/// A decoded IT module. Pattern bodies are located but not parsed.
#[derive(Debug, Clone)]
pub struct ItModule {
    pub(crate) title: String,
    pub(crate) version: u16,
    pub(crate) compatible_version: u16,
    pub(crate) flags: u16,
    pub(crate) special: u16,
    pub(crate) global_volume: u8,
    pub(crate) mix_volume: u8,
    pub(crate) speed: u8,
    pub(crate) tempo: u8,
    pub(crate) pan_separation: u8,
    pub(crate) pitch_wheel_depth: u8,
    pub(crate) message: Option<String>,
    pub(crate) orders: Vec<u8>,
    pub(crate) instruments: Vec<Instrument>,
    pub(crate) samples: Vec<Sample>,
    pub(crate) pattern_offsets: Vec<u32>,
}

impl ItModule {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Created-with tracker version (`Cwt`).
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Oldest compatible version (`Cmwt`).
    pub fn compatible_version(&self) -> u16 {
        self.compatible_version
    }

    pub fn flags(&self) -> u16 {
        self.flags
    }

    pub fn special(&self) -> u16 {
        self.special
    }

    pub fn global_volume(&self) -> u8 {
        self.global_volume
    }

    pub fn mix_volume(&self) -> u8 {
        self.mix_volume
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn tempo(&self) -> u8 {
        self.tempo
    }

    pub fn pan_separation(&self) -> u8 {
        self.pan_separation
    }

    pub fn pitch_wheel_depth(&self) -> u8 {
        self.pitch_wheel_depth
    }

    /// Song message with line breaks normalised to `\n`.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn orders(&self) -> &[u8] {
        &self.orders
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Absolute offsets of the packed patterns; 0 marks an empty pattern.
    pub fn pattern_offsets(&self) -> &[u32] {
        &self.pattern_offsets
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_offsets.len()
    }
}
