//! XM decoder.

use tracing::{debug, trace};

use super::{XmModule, XmPatternInfo, XmSampleInfo, XM_ORDER_TABLE_LEN, XM_SAMPLE_HEADER_LEN};
use crate::error::Result;
use crate::module::{Instrument, Sample, SampleInfo};
use crate::reader::ByteReader;
use crate::sample::{adpcm4_packed_len, decode_adpcm4, decode_delta16, decode_delta8};

const TITLE_LEN: usize = 20;
const INSTRUMENT_NAME_LEN: usize = 22;
const SAMPLE_NAME_LEN: usize = 22;
/// The song header size field is counted from here.
const HEADER_SIZE_OFFSET: usize = 60;

/// A sample header awaiting its payload.
struct SampleHeader {
    name: String,
    length: u32,
    info: XmSampleInfo,
}

impl SampleHeader {
    /// Bytes the payload occupies in the file.
    fn stored_len(&self) -> usize {
        if self.info.is_adpcm() {
            adpcm4_packed_len(self.length as usize)
        } else {
            self.length as usize
        }
    }

    fn decode_payload(&self, stored: &[u8]) -> Result<Vec<u8>> {
        if self.info.is_16bit() {
            Ok(decode_delta16(stored))
        } else if self.info.is_adpcm() {
            decode_adpcm4(stored, self.length as usize)
        } else {
            Ok(decode_delta8(stored))
        }
    }
}

impl XmModule {
    /// Decode an XM module from raw bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        // Offset 0x11-0x24: module name
        let mut reader = ByteReader::at(data, 17)?;
        let title = reader.read_string(TITLE_LEN)?;

        // Offset 0x26-0x39: tracker name
        reader.seek(38)?;
        let tracker_name = reader.read_string(TITLE_LEN)?;

        // Offset 0x3A-0x3B: version
        let version = reader.read_u16_le()?;

        // Offset 0x3C: header size, counted from 0x3C
        let header_size = reader.read_u32_le()?;
        let song_length = reader.read_u16_le()?;
        let restart_position = reader.read_u16_le()?;
        let num_channels = reader.read_u16_le()?;
        let num_patterns = reader.read_u16_le()? as usize;
        let num_instruments = reader.read_u16_le()? as usize;
        let flags = reader.read_u16_le()?;
        let tempo = reader.read_u16_le()?;
        let bpm = reader.read_u16_le()?;

        // Offset 0x50: pattern order table
        let order_table = reader.read_bytes(XM_ORDER_TABLE_LEN)?.to_vec();

        let patterns_offset = HEADER_SIZE_OFFSET + header_size as usize;
        reader.seek(patterns_offset)?;
        debug!(
            num_patterns,
            num_instruments,
            offset = patterns_offset,
            "reading XM pattern headers"
        );

        let mut patterns = Vec::with_capacity(num_patterns);
        for _ in 0..num_patterns {
            patterns.push(read_pattern_header(&mut reader)?);
        }

        let mut instruments = Vec::with_capacity(num_instruments);
        for index in 0..num_instruments {
            instruments.push(read_instrument(&mut reader, index)?);
        }

        debug!(
            offset = reader.position(),
            length = reader.len(),
            "done loading XM module"
        );

        Ok(Self {
            title,
            tracker_name,
            version,
            header_size,
            song_length,
            restart_position,
            num_channels,
            flags,
            tempo,
            bpm,
            order_table,
            patterns,
            instruments,
        })
    }
}

/// Read a pattern header and step over its packed data.
fn read_pattern_header(reader: &mut ByteReader<'_>) -> Result<XmPatternInfo> {
    // Header length (always 9) and packing type (always 0).
    reader.skip(5)?;
    let num_rows = reader.read_u16_le()?;
    let packed_size = reader.read_u16_le()?;
    reader.skip(packed_size as usize)?;
    trace!(num_rows, packed_size, "skipped pattern");
    Ok(XmPatternInfo {
        num_rows,
        packed_size,
    })
}

fn read_instrument(reader: &mut ByteReader<'_>, index: usize) -> Result<Instrument> {
    let start = reader.position();
    let header_size = reader.read_u32_le()? as usize;
    let name = reader.read_string(INSTRUMENT_NAME_LEN)?;
    let _instrument_type = reader.read_u8()?;
    let num_samples = reader.read_u16_le()? as usize;

    let sample_header_size = if num_samples > 0 {
        reader.read_u32_le()? as usize
    } else {
        0
    };
    trace!(index, %name, num_samples, header_size, "reading instrument");

    // Keymap and envelopes are covered by the header size, not parsed.
    reader.seek(start + header_size)?;

    let stride = sample_header_size.max(XM_SAMPLE_HEADER_LEN);
    let mut headers = Vec::with_capacity(num_samples);
    for _ in 0..num_samples {
        let header_start = reader.position();
        headers.push(read_sample_header(reader)?);
        reader.seek(header_start + stride)?;
    }

    let mut samples = Vec::with_capacity(num_samples);
    for header in headers {
        let stored = reader.read_bytes(header.stored_len())?;
        let data = header.decode_payload(stored)?;
        samples.push(Sample {
            name: header.name,
            filename: None,
            length: header.length,
            data,
            info: SampleInfo::FastTracker(header.info),
        });
    }

    Ok(Instrument {
        name,
        filename: None,
        samples,
    })
}

fn read_sample_header(reader: &mut ByteReader<'_>) -> Result<SampleHeader> {
    let length = reader.read_u32_le()?;
    let loop_start = reader.read_u32_le()?;
    let loop_length = reader.read_u32_le()?;
    let volume = reader.read_u8()?;
    let finetune = reader.read_i8()?;
    let sample_type = reader.read_u8()?;
    let panning = reader.read_u8()?;
    let relative_note = reader.read_i8()?;
    let data_type = reader.read_u8()?;
    let name = reader.read_string(SAMPLE_NAME_LEN)?;
    Ok(SampleHeader {
        name,
        length,
        info: XmSampleInfo {
            loop_start,
            loop_length,
            volume,
            finetune,
            sample_type,
            panning,
            relative_note,
            data_type,
        },
    })
}
