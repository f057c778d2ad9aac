//! Hand-assembled module buffers shared by the integration tests.

#![allow(dead_code)]

/// One note cell: (period, instrument, effect, parameter).
pub type Cell = (u16, u8, u8, u8);

pub fn pack_note((period, instrument, effect, parameter): Cell) -> [u8; 4] {
    [
        (instrument & 0xF0) | ((period >> 8) as u8 & 0x0F),
        (period & 0xFF) as u8,
        ((instrument & 0x0F) << 4) | (effect & 0x0F),
        parameter,
    ]
}

/// One byte per char (Latin-1), zero-padded to `width`.
fn field(text: &str, width: usize) -> Vec<u8> {
    let mut bytes: Vec<u8> = text.chars().map(|c| c as u8).collect();
    bytes.resize(width, 0);
    bytes
}

/// A ProTracker sample slot: name and PCM (even length).
pub struct ModSample<'a> {
    pub name: &'a str,
    pub volume: u8,
    pub pcm: Vec<u8>,
}

/// Assemble a MOD file. `notes` lists (pattern, row, channel, cell).
pub fn mod_bytes(
    title: &str,
    magic: &[u8; 4],
    channels: usize,
    order: &[u8],
    num_patterns: usize,
    notes: &[(usize, usize, usize, Cell)],
    samples: &[ModSample<'_>],
) -> Vec<u8> {
    let mut buf = field(title, 20);
    for slot in 0..31 {
        match samples.get(slot) {
            Some(sample) => {
                buf.extend(field(sample.name, 22));
                buf.extend(((sample.pcm.len() / 2) as u16).to_be_bytes());
                buf.push(0);
                buf.push(sample.volume);
                buf.extend(0u16.to_be_bytes());
                buf.extend(1u16.to_be_bytes());
            }
            None => buf.extend([0u8; 30]),
        }
    }
    buf.push(order.len() as u8);
    buf.push(0);
    let mut table = [0u8; 128];
    table[..order.len()].copy_from_slice(order);
    buf.extend(table);
    buf.extend(magic);

    let pattern_len = 64 * channels * 4;
    let start = buf.len();
    buf.resize(start + num_patterns * pattern_len, 0);
    for &(pattern, row, channel, cell) in notes {
        let at = start + pattern * pattern_len + (row * channels + channel) * 4;
        buf[at..at + 4].copy_from_slice(&pack_note(cell));
    }
    for sample in samples {
        buf.extend(&sample.pcm);
    }
    buf
}

/// Offset of the single sample record in [`s3m_bytes`] output.
pub const S3M_RECORD_OFFSET: usize = 0x70;

/// An S3M file with one 8-bit sample record and one pattern pointer.
pub fn s3m_bytes(title: &str, pcm: &[u8]) -> Vec<u8> {
    let pcm_offset = 0xC0;
    let mut buf = vec![0u8; pcm_offset + pcm.len()];
    buf[..title.len()].copy_from_slice(title.as_bytes());
    buf[32..34].copy_from_slice(&1u16.to_le_bytes());
    buf[34..36].copy_from_slice(&1u16.to_le_bytes());
    buf[36..38].copy_from_slice(&1u16.to_le_bytes());
    buf[44..48].copy_from_slice(b"SCRM");
    buf[96] = 0;
    buf[97..99].copy_from_slice(&((S3M_RECORD_OFFSET / 16) as u16).to_le_bytes());
    buf[99..101].copy_from_slice(&0x20u16.to_le_bytes());

    let r = S3M_RECORD_OFFSET;
    buf[r] = 1;
    buf[r + 1..r + 9].copy_from_slice(b"TEST.SMP");
    buf[r + 14..r + 16].copy_from_slice(&((pcm_offset / 16) as u16).to_le_bytes());
    buf[r + 16..r + 20].copy_from_slice(&(pcm.len() as u32).to_le_bytes());
    buf[r + 28] = 64;
    buf[r + 48..r + 54].copy_from_slice(b"sample");
    buf[r + 76..r + 80].copy_from_slice(b"SCRS");
    buf[pcm_offset..].copy_from_slice(pcm);
    buf
}

/// An XM file with no patterns and one instrument holding one 8-bit sample.
/// `deltas` is stored as-is.
pub fn xm_bytes(title: &str, deltas: &[u8]) -> Vec<u8> {
    let mut buf = b"Extended Module: ".to_vec();
    buf.extend(field(title, 20));
    buf.push(0x1A);
    buf.extend(field("modvault tests", 20));
    buf.extend(0x0104u16.to_le_bytes());
    buf.extend(276u32.to_le_bytes());
    buf.extend(1u16.to_le_bytes()); // song length
    buf.extend(0u16.to_le_bytes()); // restart
    buf.extend(4u16.to_le_bytes()); // channels
    buf.extend(0u16.to_le_bytes()); // patterns
    buf.extend(1u16.to_le_bytes()); // instruments
    buf.extend(1u16.to_le_bytes()); // flags
    buf.extend(6u16.to_le_bytes()); // tempo
    buf.extend(125u16.to_le_bytes()); // bpm
    buf.extend([0u8; 256]);

    let start = buf.len();
    buf.extend(263u32.to_le_bytes());
    buf.extend(field("piano", 22));
    buf.push(0);
    buf.extend(1u16.to_le_bytes());
    buf.extend(40u32.to_le_bytes());
    buf.resize(start + 263, 0);

    buf.extend((deltas.len() as u32).to_le_bytes());
    buf.extend([0u8; 8]); // loop start, loop length
    buf.push(64); // volume
    buf.push(0); // finetune
    buf.push(0); // 8-bit, no loop
    buf.push(0x80); // panning
    buf.push(0); // relative note
    buf.push(0); // delta coded
    buf.extend(field("piano c", 22));
    buf.extend(deltas);
    buf
}

/// An IT file with one instrument and one sample.
pub fn it_bytes(title: &str, pcm: &[u8]) -> Vec<u8> {
    let instrument_offset = 0x100;
    let sample_offset = 0x180;
    let pcm_offset = 0x200;
    let mut buf = vec![0u8; pcm_offset + pcm.len()];
    buf[..4].copy_from_slice(b"IMPM");
    buf[4..4 + title.len()].copy_from_slice(title.as_bytes());
    buf[32..34].copy_from_slice(&1u16.to_le_bytes());
    buf[34..36].copy_from_slice(&1u16.to_le_bytes());
    buf[36..38].copy_from_slice(&1u16.to_le_bytes());
    buf[192] = 0;
    buf[193..197].copy_from_slice(&(instrument_offset as u32).to_le_bytes());
    buf[197..201].copy_from_slice(&(sample_offset as u32).to_le_bytes());

    buf[instrument_offset..instrument_offset + 4].copy_from_slice(b"IMPI");
    buf[instrument_offset + 32..instrument_offset + 37].copy_from_slice(b"organ");

    let s = sample_offset;
    buf[s..s + 4].copy_from_slice(b"IMPS");
    buf[s + 18] = 0x01;
    buf[s + 20..s + 27].copy_from_slice(b"organ c");
    buf[s + 48..s + 52].copy_from_slice(&(pcm.len() as u32).to_le_bytes());
    buf[s + 72..s + 76].copy_from_slice(&(pcm_offset as u32).to_le_bytes());
    buf[pcm_offset..].copy_from_slice(pcm);
    buf
}
