//! Structured document form of a module.
//!
//! A ProTracker module exports to a [`ModuleDocument`] holding everything
//! needed to rebuild a playable MOD file: header, order, every sample with its
//! PCM as base64, and every note of every pattern. [`import`] turns such a
//! document back into MOD bytes without access to the original file.
//!
//! FastTracker modules export their header and instruments for inspection;
//! they cannot be imported.
//!
//! ```rust,ignore
//! use modvault_format::{document, load};
//!
//! let module = load(&std::fs::read("song.mod")?)?;
//! let json = document::export(&module)?.to_json_pretty()?;
//! let doc = document::ModuleDocument::from_json(&json)?;
//! let bytes = document::import(&doc)?;
//! ```

mod export;
mod import;


pub use export::{export, export_fasttracker, export_protracker};
pub use import::import;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::module::ModuleFormat;

/// A module as a serialisable tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDocument {
    pub format: ModuleFormat,
    pub title: String,
    pub song_length: u16,
    pub restart_position: u16,
    pub num_channels: u16,
    /// Played pattern order, `song_length` entries.
    pub pattern_order: Vec<u8>,
    #[serde(default)]
    pub samples: Vec<SampleDocument>,
    #[serde(default)]
    pub patterns: Vec<PatternDocument>,

    // FastTracker only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruments: Option<Vec<InstrumentDocument>>,
}

impl ModuleDocument {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One sample slot. `number` is 1-based, as trackers show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleDocument {
    pub number: usize,
    pub name: String,
    /// Length in bytes. Informational on import; the PCM decides.
    pub length: u32,
    pub finetune: i16,
    pub volume: u8,
    pub repeat_offset: u32,
    pub repeat_length: u32,
    /// Base64 of the decoded PCM.
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_note: Option<i8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panning: Option<u8>,
}

impl SampleDocument {
    pub(crate) fn encode_data(pcm: &[u8]) -> String {
        STANDARD.encode(pcm)
    }

    /// Decoded PCM bytes.
    pub fn pcm(&self) -> Result<Vec<u8>> {
        Ok(STANDARD.decode(&self.data)?)
    }
}

/// A FastTracker instrument with its samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentDocument {
    pub number: usize,
    pub name: String,
    pub samples: Vec<SampleDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDocument {
    pub pattern_number: usize,
    pub num_channels: usize,
    pub num_rows: usize,
    pub rows: Vec<RowDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowDocument {
    pub row: usize,
    /// One entry per channel, in channel order.
    pub channels: Vec<ChannelDocument>,
}

/// A note cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDocument {
    /// Pitch name such as `"C-2"`; `None` for no note or an off-table period.
    #[serde(default)]
    pub note: Option<String>,
    pub period: u16,
    pub instrument: u8,
    pub effect: u8,
    pub parameter: u8,
}
