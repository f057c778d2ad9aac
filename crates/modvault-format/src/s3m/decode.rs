//! ScreamTracker 3 decoder.

use tracing::{debug, trace};

use super::{
    S3mModule, S3mSampleFormat, S3mSampleInfo, S3M_ORDER_OFFSET, S3M_SAMPLE_SIGNATURE,
    S3M_SIGNATURE, S3M_TYPE_EMPTY, S3M_TYPE_SAMPLE,
};
use crate::error::{ModuleError, Result};
use crate::module::{Sample, SampleInfo};
use crate::reader::{slice_at, ByteReader};

const TITLE_LEN: usize = 28;
const FILENAME_LEN: usize = 12;
const SAMPLE_NAME_LEN: usize = 28;
const SIGNATURE_OFFSET: usize = 44;
const RECORD_SIGNATURE_OFFSET: usize = 76;

/// Parapointers count 16-byte paragraphs.
fn paragraphs_to_offset(paragraphs: usize) -> usize {
    paragraphs * 16
}

impl S3mModule {
    /// Decode a ScreamTracker 3 module from raw bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(data);

        let title = reader.read_string(TITLE_LEN)?;
        reader.seek(32)?;
        let order_count = reader.read_u16_le()? as usize;
        let instrument_count = reader.read_u16_le()? as usize;
        let pattern_count = reader.read_u16_le()? as usize;
        let flags = reader.read_u16_le()?;
        let tracker_version = reader.read_u16_le()?;
        let sample_type = S3mSampleFormat::from(reader.read_u16_le()?);

        let signature: [u8; 4] = reader.read_array()?;
        if &signature != S3M_SIGNATURE {
            return Err(ModuleError::InvalidSignature {
                record: "module",
                expected: "SCRM",
                index: 0,
                offset: SIGNATURE_OFFSET,
            });
        }

        let global_volume = reader.read_u8()?;
        let initial_speed = reader.read_u8()?;
        let initial_tempo = reader.read_u8()?;
        let master = reader.read_u8()?;

        reader.seek(S3M_ORDER_OFFSET)?;
        let orders = reader.read_bytes(order_count)?.to_vec();

        let mut instrument_offsets = Vec::with_capacity(instrument_count);
        for _ in 0..instrument_count {
            instrument_offsets.push(paragraphs_to_offset(reader.read_u16_le()? as usize));
        }
        let mut pattern_offsets = Vec::with_capacity(pattern_count);
        for _ in 0..pattern_count {
            pattern_offsets.push(paragraphs_to_offset(reader.read_u16_le()? as usize));
        }

        debug!(
            order_count,
            instrument_count,
            pattern_count,
            "reading ScreamTracker instruments"
        );

        let mut samples = Vec::with_capacity(instrument_count);
        for (index, &offset) in instrument_offsets.iter().enumerate() {
            if let Some(sample) = read_sample(data, index, offset)? {
                samples.push(sample);
            }
        }

        Ok(Self {
            title,
            flags,
            tracker_version,
            sample_type,
            global_volume,
            initial_speed,
            initial_tempo,
            master_volume: master & 0x7F,
            stereo: master & 0x80 != 0,
            orders,
            pattern_offsets,
            samples,
        })
    }
}

/// Decode one instrument record. Empty slots yield `None`.
fn read_sample(data: &[u8], index: usize, offset: usize) -> Result<Option<Sample>> {
    let mut reader = ByteReader::at(data, offset)?;

    let record_type = reader.read_u8()?;
    if record_type == S3M_TYPE_EMPTY {
        trace!(index, offset, "skipping empty instrument slot");
        return Ok(None);
    }
    if record_type != S3M_TYPE_SAMPLE {
        return Err(ModuleError::UnsupportedSampleType {
            index,
            sample_type: record_type,
            offset,
        });
    }

    let filename = reader.read_string(FILENAME_LEN)?;
    let memseg_high = reader.read_u8()? as usize;
    let memseg_low = reader.read_u16_le()? as usize;
    let length = reader.read_u32_le()?;
    let loop_start = reader.read_u32_le()?;
    let loop_end = reader.read_u32_le()?;
    let volume = reader.read_u8()?;
    reader.skip(1)?;
    let pack = reader.read_u8()?;
    let flags = reader.read_u8()?;
    let c2_speed = reader.read_u32_le()?;
    reader.skip(12)?;
    let name = reader.read_string(SAMPLE_NAME_LEN)?;

    let signature_offset = offset + RECORD_SIGNATURE_OFFSET;
    let signature: [u8; 4] = reader.read_array()?;
    if &signature != S3M_SAMPLE_SIGNATURE {
        return Err(ModuleError::InvalidSignature {
            record: "sample",
            expected: "SCRS",
            index,
            offset: signature_offset,
        });
    }

    let info = S3mSampleInfo {
        data_offset: paragraphs_to_offset((memseg_high << 16) | memseg_low),
        loop_start,
        loop_end,
        volume,
        pack,
        flags,
        c2_speed,
    };

    let byte_len = if info.is_16bit() {
        length as usize * 2
    } else {
        length as usize
    };
    trace!(index, %name, data_offset = info.data_offset, byte_len, "reading sample");
    let pcm = slice_at(data, info.data_offset, byte_len)?;

    Ok(Some(Sample {
        name,
        filename: Some(filename),
        length,
        data: pcm.to_vec(),
        info: SampleInfo::ScreamTracker(info),
    }))
}
