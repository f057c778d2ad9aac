//! Fixed-width text fields.
//!
//! Tracker names are single-byte text. Each byte maps to the `char` with the
//! same value (Latin-1), so every field survives a decode/encode cycle.

use crate::error::{ModuleError, Result};

/// Extract a null-terminated or space-padded string from a byte slice.
pub(crate) fn extract_string(data: &[u8]) -> String {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    let text: String = data[..end].iter().map(|&b| char::from(b)).collect();
    text.trim_end_matches(|c: char| c.is_ascii_whitespace())
        .to_string()
}

/// Render `text` into a zero-padded field of exactly `N` bytes, truncating if needed.
///
/// Fails when a character has no single-byte form (above U+00FF).
pub(crate) fn fixed_field<const N: usize>(what: &str, text: &str) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    for (slot, c) in buf.iter_mut().zip(text.chars()) {
        *slot = u8::try_from(c).map_err(|_| {
            ModuleError::InvalidDocument(format!(
                "{} '{}' contains '{}', which has no single-byte encoding",
                what, text, c
            ))
        })?;
    }
    Ok(buf)
}
