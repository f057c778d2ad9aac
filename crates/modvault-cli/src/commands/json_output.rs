//! JSON output types for machine-readable CLI output.
//!
//! Every command that takes `--json` prints exactly one of these records to
//! stdout. Log output goes to stderr and never mixes in.

use modvault_format::{InstrumentView, Module, ModuleFormat, Sample};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
pub mod error_codes {
    /// File could not be read or unpacked
    pub const FILE_READ: &str = "CLI_001";
    /// Module bytes failed to decode
    pub const DECODE: &str = "CLI_002";
    /// Path is not a directory
    pub const NOT_A_DIRECTORY: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// One sample in an `info` listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SampleSummary {
    /// Zero-based position in the module's sample table
    pub index: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// PCM length in bytes
    pub length: usize,
}

impl SampleSummary {
    pub fn from_sample(index: usize, sample: &Sample) -> Self {
        Self {
            index,
            name: sample.name().to_string(),
            filename: sample.filename.clone().filter(|f| !f.is_empty()),
            length: sample.data().len(),
        }
    }
}

/// One instrument in an `info` listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstrumentSummary {
    pub index: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Number of samples the instrument owns
    pub samples: usize,
}

impl InstrumentSummary {
    pub fn from_view(index: usize, view: &InstrumentView<'_>) -> Self {
        Self {
            index,
            name: view.name.to_string(),
            filename: view.filename.filter(|f| !f.is_empty()).map(str::to_string),
            samples: view.samples.len(),
        }
    }
}

/// Module summary shared by `info` and `scan`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleSummary {
    pub format: ModuleFormat,
    pub title: String,
    pub pattern_count: usize,
    pub sample_count: usize,
    pub instrument_count: usize,
}

impl ModuleSummary {
    pub fn from_module(module: &Module) -> Self {
        Self {
            format: module.format(),
            title: module.title().to_string(),
            pattern_count: module.pattern_count(),
            sample_count: module.samples().len(),
            instrument_count: module.instruments().len(),
        }
    }
}

/// JSON output for the `info` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoOutput {
    /// Whether the module decoded
    pub success: bool,
    pub errors: Vec<JsonError>,
    /// Input file path
    pub input: String,
    /// Archive entry name, for zipped inputs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<SampleSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instruments: Vec<InstrumentSummary>,
}

impl InfoOutput {
    /// Creates a failed info output.
    pub fn failure(input: impl Into<String>, error: JsonError) -> Self {
        Self {
            success: false,
            errors: vec![error],
            input: input.into(),
            archive_entry: None,
            module: None,
            samples: Vec::new(),
            instruments: Vec::new(),
        }
    }
}

/// One file in a `scan` report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanEntry {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleSummary>,
    /// Why the file failed to load
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

/// Totals for a `scan` report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanSummary {
    pub total: usize,
    pub loaded: usize,
    pub failed: usize,
}

/// JSON output for the `scan` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutput {
    /// True when every file loaded
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub dir: String,
    pub files: Vec<ScanEntry>,
    pub summary: ScanSummary,
}

impl ScanOutput {
    pub fn from_entries(dir: impl Into<String>, files: Vec<ScanEntry>) -> Self {
        let loaded = files.iter().filter(|f| f.module.is_some()).count();
        let summary = ScanSummary {
            total: files.len(),
            loaded,
            failed: files.len() - loaded,
        };
        Self {
            success: summary.failed == 0,
            errors: Vec::new(),
            dir: dir.into(),
            files,
            summary,
        }
    }

    pub fn failure(dir: impl Into<String>, error: JsonError) -> Self {
        Self {
            success: false,
            errors: vec![error],
            dir: dir.into(),
            files: Vec::new(),
            summary: ScanSummary::default(),
        }
    }
}
