//! IT decoder.

use tracing::{debug, trace, warn};

use super::{ItModule, ItSampleInfo, IT_ORDER_OFFSET, IT_SIGNATURE};
use crate::error::{ModuleError, Result};
use crate::module::{Instrument, Sample, SampleInfo};
use crate::reader::{slice_at, ByteReader};
use crate::text::extract_string;

const TITLE_LEN: usize = 26;
const FILENAME_LEN: usize = 12;
const NAME_LEN: usize = 26;

impl ItModule {
    /// Decode an Impulse Tracker module from raw bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(data);

        let signature: [u8; 4] = reader.read_array()?;
        if &signature != IT_SIGNATURE {
            return Err(ModuleError::InvalidSignature {
                record: "module",
                expected: "IMPM",
                index: 0,
                offset: 0,
            });
        }

        let title = reader.read_string(TITLE_LEN)?;
        // Pattern row highlight.
        reader.skip(2)?;
        let order_count = reader.read_u16_le()? as usize;
        let instrument_count = reader.read_u16_le()? as usize;
        let sample_count = reader.read_u16_le()? as usize;
        let pattern_count = reader.read_u16_le()? as usize;
        let version = reader.read_u16_le()?;
        let compatible_version = reader.read_u16_le()?;
        let flags = reader.read_u16_le()?;
        let special = reader.read_u16_le()?;
        let global_volume = reader.read_u8()?;
        let mix_volume = reader.read_u8()?;
        let speed = reader.read_u8()?;
        let tempo = reader.read_u8()?;
        let pan_separation = reader.read_u8()?;
        let pitch_wheel_depth = reader.read_u8()?;
        let message_length = reader.read_u16_le()? as usize;
        let message_offset = reader.read_u32_le()? as usize;

        reader.seek(IT_ORDER_OFFSET)?;
        let orders = reader.read_bytes(order_count)?.to_vec();
        let instrument_offsets = read_offsets(&mut reader, instrument_count)?;
        let sample_offsets = read_offsets(&mut reader, sample_count)?;
        let pattern_offsets = read_offsets(&mut reader, pattern_count)?;

        debug!(
            order_count,
            instrument_count,
            sample_count,
            pattern_count,
            "reading Impulse Tracker records"
        );

        let mut instruments = Vec::with_capacity(instrument_count);
        for (index, &offset) in instrument_offsets.iter().enumerate() {
            instruments.push(read_instrument(data, index, offset as usize)?);
        }

        let mut samples = Vec::with_capacity(sample_count);
        for (index, &offset) in sample_offsets.iter().enumerate() {
            samples.push(read_sample(data, index, offset as usize)?);
        }

        let message = read_message(data, message_offset, message_length);

        Ok(Self {
            title,
            version,
            compatible_version,
            flags,
            special,
            global_volume,
            mix_volume,
            speed,
            tempo,
            pan_separation,
            pitch_wheel_depth,
            message,
            orders,
            instruments,
            samples,
            pattern_offsets,
        })
    }
}

fn read_offsets(reader: &mut ByteReader<'_>, count: usize) -> Result<Vec<u32>> {
    (0..count).map(|_| reader.read_u32_le()).collect()
}

fn expect_signature(
    reader: &mut ByteReader<'_>,
    expected: &'static str,
    record: &'static str,
    index: usize,
) -> Result<()> {
    let offset = reader.position();
    let found: [u8; 4] = reader.read_array()?;
    if found.as_slice() != expected.as_bytes() {
        return Err(ModuleError::InvalidSignature {
            record,
            expected,
            index,
            offset,
        });
    }
    Ok(())
}

fn read_instrument(data: &[u8], index: usize, offset: usize) -> Result<Instrument> {
    let mut reader = ByteReader::at(data, offset)?;
    expect_signature(&mut reader, "IMPI", "instrument", index)?;

    let filename = reader.read_string(FILENAME_LEN)?;
    // NNA, DCT, DCA, fadeout, pitch-pan, volumes, tracker version, sample count.
    reader.skip(16)?;
    let name = reader.read_string(NAME_LEN)?;
    trace!(index, offset, %name, "read instrument");

    Ok(Instrument {
        name,
        filename: Some(filename),
        samples: Vec::new(),
    })
}

fn read_sample(data: &[u8], index: usize, offset: usize) -> Result<Sample> {
    let mut reader = ByteReader::at(data, offset)?;
    expect_signature(&mut reader, "IMPS", "sample", index)?;

    let filename = reader.read_string(FILENAME_LEN)?;
    reader.skip(1)?;
    let global_volume = reader.read_u8()?;
    let flags = reader.read_u8()?;
    let default_volume = reader.read_u8()?;
    let name = reader.read_string(NAME_LEN)?;
    let convert = reader.read_u8()?;
    let default_pan = reader.read_u8()?;
    let length = reader.read_u32_le()?;
    let loop_start = reader.read_u32_le()?;
    let loop_end = reader.read_u32_le()?;
    let c5_speed = reader.read_u32_le()?;
    let sustain_start = reader.read_u32_le()?;
    let sustain_end = reader.read_u32_le()?;
    let data_pointer = reader.read_u32_le()?;

    let info = ItSampleInfo {
        global_volume,
        flags,
        default_volume,
        convert,
        default_pan,
        loop_start,
        loop_end,
        c5_speed,
        sustain_start,
        sustain_end,
        data_pointer,
    };

    let byte_len = if info.is_16bit() {
        length as usize * 2
    } else {
        length as usize
    };
    let start = data_pointer as usize;
    trace!(index, %name, start, byte_len, "reading sample");

    let pcm = if info.is_compressed() {
        // Compressed blocks are shorter than the raw length; keep what is there.
        let end = start.saturating_add(byte_len).min(data.len());
        slice_at(data, start, end.saturating_sub(start))?
    } else {
        slice_at(data, start, byte_len)?
    };

    Ok(Sample {
        name,
        filename: Some(filename),
        length,
        data: pcm.to_vec(),
        info: SampleInfo::ImpulseTracker(info),
    })
}

/// Extract the song message if it lies inside the buffer.
fn read_message(data: &[u8], offset: usize, length: usize) -> Option<String> {
    if length == 0 {
        return None;
    }
    match slice_at(data, offset, length) {
        Ok(bytes) => Some(extract_string(bytes).replace('\r', "\n")),
        Err(_) => {
            warn!(offset, length, "song message lies outside the file, ignoring");
            None
        }
    }
}
