//! Error type shared by every decoder and the document codec.

use thiserror::Error;

/// Errors produced while decoding or encoding a module.
///
/// A decode either succeeds completely or fails with one of these; no decoder
/// returns a partially populated module.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// The buffer cannot be identified as a module at all.
    #[error("Format error: {reason}")]
    Format { reason: String },

    /// A read would run past the end of the buffer.
    #[error("Truncated data: need {needed} bytes at offset {offset}, buffer has {available}")]
    TruncatedData {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A per-record marker such as `IMPI`, `IMPS` or `SCRS` is missing.
    #[error("Invalid {record} signature for index {index} at offset {offset}: expected {expected:?}")]
    InvalidSignature {
        record: &'static str,
        expected: &'static str,
        index: usize,
        offset: usize,
    },

    /// A record type this crate does not decode.
    #[error("Unsupported sample type {sample_type} for sample {index} at offset {offset}")]
    UnsupportedSampleType {
        index: usize,
        sample_type: u8,
        offset: usize,
    },

    /// A pattern, row, channel, sample or instrument index is out of range.
    #[error("{what} index {index} out of range (count {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// The period is not an exact entry of the equal-tempered period table.
    #[error("Period {period} not found in period table")]
    PeriodNotFound { period: u16 },

    /// The structured document cannot be turned into a module.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Document JSON could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Sample PCM in a document is not valid base64.
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Writing module bytes failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModuleError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        ModuleError::Format {
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        ModuleError::IndexOutOfRange { what, index, len }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ModuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModuleError::TruncatedData {
            offset: 1084,
            needed: 1024,
            available: 1500,
        };
        assert_eq!(
            err.to_string(),
            "Truncated data: need 1024 bytes at offset 1084, buffer has 1500"
        );

        let err = ModuleError::InvalidSignature {
            record: "sample",
            expected: "SCRS",
            index: 2,
            offset: 300,
        };
        assert_eq!(
            err.to_string(),
            "Invalid sample signature for index 2 at offset 300: expected \"SCRS\""
        );

        assert_eq!(
            ModuleError::PeriodNotFound { period: 1 }.to_string(),
            "Period 1 not found in period table"
        );
    }

    #[test]
    fn test_out_of_range_helper() {
        match ModuleError::out_of_range("row", 64, 64) {
            ModuleError::IndexOutOfRange { what, index, len } => {
                assert_eq!(what, "row");
                assert_eq!(index, 64);
                assert_eq!(len, 64);
            }
            other => panic!("expected IndexOutOfRange, got {:?}", other),
        }
    }
}
