//! Sample payload decompressors.
//!
//! XM stores PCM as successive differences rather than absolute amplitudes.
//! [`delta`] undoes (and, for writers and tests, applies) that coding for 8-
//! and 16-bit samples; [`adpcm`] handles the ModPlug 4-bit ADPCM variant that
//! some XM files carry in place of 8-bit deltas.

pub mod adpcm;
pub mod delta;

pub use adpcm::{adpcm4_packed_len, decode_adpcm4, ADPCM4_DATA_TYPE, ADPCM4_TABLE_SIZE};
pub use delta::{decode_delta16, decode_delta8, encode_delta16, encode_delta8};
