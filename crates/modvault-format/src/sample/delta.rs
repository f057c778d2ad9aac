//! Cumulative delta coding for 8- and 16-bit PCM.

/// Decode 8-bit deltas: each output byte is the running signed sum of the inputs.
pub fn decode_delta8(data: &[u8]) -> Vec<u8> {
    let mut old = 0i8;
    data.iter()
        .map(|&delta| {
            old = old.wrapping_add(delta as i8);
            old as u8
        })
        .collect()
}

/// Inverse of [`decode_delta8`].
pub fn encode_delta8(pcm: &[u8]) -> Vec<u8> {
    let mut old = 0i8;
    pcm.iter()
        .map(|&sample| {
            let sample = sample as i8;
            let delta = sample.wrapping_sub(old);
            old = sample;
            delta as u8
        })
        .collect()
}

/// Decode 16-bit deltas.
///
/// The input is a little-endian stream of signed 16-bit deltas; each output
/// sample is their wrapping running sum, re-emitted little-endian. A trailing
/// odd byte cannot form a delta and is dropped.
pub fn decode_delta16(data: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(data.len() & !1);
    let mut old = 0i16;
    for pair in data.chunks_exact(2) {
        let delta = i16::from_le_bytes([pair[0], pair[1]]);
        old = old.wrapping_add(delta);
        output.extend_from_slice(&old.to_le_bytes());
    }
    output
}

/// Inverse of [`decode_delta16`].
pub fn encode_delta16(pcm: &[u8]) -> Vec<u8> {
    let mut output = Vec::with_capacity(pcm.len() & !1);
    let mut old = 0i16;
    for pair in pcm.chunks_exact(2) {
        let sample = i16::from_le_bytes([pair[0], pair[1]]);
        output.extend_from_slice(&sample.wrapping_sub(old).to_le_bytes());
        old = sample;
    }
    output
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_decode_delta8() {
        let deltas: Vec<u8> = [10i8, 5, -3, 2, -1].iter().map(|&d| d as u8).collect();
        let pcm: Vec<i8> = decode_delta8(&deltas).iter().map(|&b| b as i8).collect();
        assert_eq!(pcm, vec![10, 15, 12, 14, 13]);
    }

    #[test]
    fn test_decode_delta8_wraps() {
        let pcm = decode_delta8(&[127, 1, 1]);
        assert_eq!(pcm, vec![127, 0x80, 0x81]);
    }

    #[test]
    fn test_decode_delta16() {
        let mut deltas = Vec::new();
        for d in [1000i16, 500, -300, 200, -100] {
            deltas.extend_from_slice(&d.to_le_bytes());
        }
        let pcm = decode_delta16(&deltas);
        assert_eq!(pcm.len(), deltas.len());
        let samples: Vec<i16> = pcm
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();
        assert_eq!(samples, vec![1000, 1500, 1200, 1400, 1300]);
    }

    #[test]
    fn test_decode_delta16_drops_odd_byte() {
        let pcm = decode_delta16(&[0x10, 0x00, 0x7F]);
        assert_eq!(pcm, vec![0x10, 0x00]);
    }

    #[test]
    fn test_empty_input() {
        assert!(decode_delta8(&[]).is_empty());
        assert!(decode_delta16(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn delta8_decode_inverts_encode(pcm in proptest::collection::vec(any::<u8>(), 0..512)) {
            prop_assert_eq!(decode_delta8(&encode_delta8(&pcm)), pcm);
        }

        #[test]
        fn delta16_decode_inverts_encode(
            samples in proptest::collection::vec(any::<i16>(), 0..256),
        ) {
            let pcm: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
            prop_assert_eq!(decode_delta16(&encode_delta16(&pcm)), pcm);
        }
    }
}
