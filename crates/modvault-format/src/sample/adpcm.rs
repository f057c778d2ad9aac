//! ModPlug 4-bit ADPCM, flagged in an XM sample header by data type `0xAD`.
//!
//! The payload is a 16-entry table of signed 8-bit deltas followed by packed
//! nibbles, low nibble first. Each nibble selects a delta that is accumulated
//! exactly like plain 8-bit delta coding.

use crate::error::{ModuleError, Result};

/// Sample header data-type byte selecting ADPCM.
pub const ADPCM4_DATA_TYPE: u8 = 0xAD;

/// Size of the delta table preceding the nibbles.
pub const ADPCM4_TABLE_SIZE: usize = 16;

/// Stored byte count for an ADPCM sample of `length` output bytes.
pub fn adpcm4_packed_len(length: usize) -> usize {
    ADPCM4_TABLE_SIZE + length.div_ceil(2)
}

/// Decode `length` output bytes from an ADPCM payload.
pub fn decode_adpcm4(data: &[u8], length: usize) -> Result<Vec<u8>> {
    let needed = adpcm4_packed_len(length);
    if data.len() < needed {
        return Err(ModuleError::TruncatedData {
            offset: 0,
            needed,
            available: data.len(),
        });
    }

    let (table, nibbles) = data.split_at(ADPCM4_TABLE_SIZE);
    let mut output = Vec::with_capacity(length);
    let mut old = 0i8;
    for &byte in nibbles {
        for nibble in [byte & 0x0F, byte >> 4] {
            if output.len() == length {
                return Ok(output);
            }
            old = old.wrapping_add(table[nibble as usize] as i8);
            output.push(old as u8);
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_table() -> Vec<u8> {
        // Deltas -8..=7.
        (-8i8..8).map(|d| d as u8).collect()
    }

    #[test]
    fn test_packed_len() {
        assert_eq!(adpcm4_packed_len(0), 16);
        assert_eq!(adpcm4_packed_len(1), 17);
        assert_eq!(adpcm4_packed_len(4), 18);
        assert_eq!(adpcm4_packed_len(5), 19);
    }

    #[test]
    fn test_decode_low_nibble_first() {
        let mut data = ramp_table();
        // Nibbles 0x9 (+1) then 0xA (+2), then 0x7 (-1) then 0x8 (0).
        data.extend_from_slice(&[0xA9, 0x87]);
        let pcm: Vec<i8> = decode_adpcm4(&data, 4)
            .unwrap()
            .iter()
            .map(|&b| b as i8)
            .collect();
        assert_eq!(pcm, vec![1, 3, 2, 2]);
    }

    #[test]
    fn test_decode_odd_length_ignores_last_high_nibble() {
        let mut data = ramp_table();
        data.extend_from_slice(&[0xFF, 0x0F]);
        let pcm = decode_adpcm4(&data, 3).unwrap();
        assert_eq!(pcm, vec![7, 14, 21]);
    }

    #[test]
    fn test_decode_truncated() {
        let data = ramp_table();
        assert!(matches!(
            decode_adpcm4(&data, 2),
            Err(ModuleError::TruncatedData { needed: 17, .. })
        ));
    }
}
