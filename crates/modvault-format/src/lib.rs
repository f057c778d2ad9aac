//! modvault format core - tracker module decoding and MOD document round-tripping
//!
//! This crate decodes the four classic tracker formats into an in-memory song
//! and turns ProTracker modules into a structured document and back again.
//! It never touches the filesystem: every entry point takes a byte slice.
//!
//! # Formats
//!
//! - **ProTracker (MOD)**: 31 samples, 4/6/8 channels, fully decoded patterns
//! - **ScreamTracker 3 (S3M)**: parapointer tables, PCM samples (`SCRS` records)
//! - **FastTracker II (XM)**: instruments owning delta-coded or ADPCM samples
//! - **Impulse Tracker (IT)**: absolute offsets, `IMPI`/`IMPS` records, song message
//!
//! # Example
//!
//! ```ignore
//! use modvault_format::{document, load};
//!
//! let bytes = std::fs::read("song.mod")?;
//! let module = load(&bytes)?;
//! println!("{} ({}), {} patterns", module.title(), module.format(), module.pattern_count());
//!
//! let doc = document::export(&module)?;
//! let rebuilt = document::import(&doc)?;
//! ```
//!
//! # Module Structure
//!
//! - [`loader`]: format sniffing and dispatch
//! - [`protracker`], [`s3m`], [`xm`], [`it`]: per-format decoders
//! - [`note`]: packed note codec and period/pitch names
//! - [`pattern`]: fixed-shape pattern grid
//! - [`sample`]: delta and ADPCM sample decompression
//! - [`document`]: ProTracker document export/import

pub mod document;
pub mod error;
pub mod it;
pub mod loader;
pub mod module;
pub mod note;
pub mod pattern;
pub mod protracker;
pub mod reader;
pub mod s3m;
pub mod sample;
pub mod xm;

mod text;

// Re-export main types
pub use document::{export, import, ModuleDocument};
pub use error::{ModuleError, Result};
pub use loader::{load, sniff};
pub use module::{Instrument, InstrumentView, Module, ModuleFormat, Sample, SampleInfo};
pub use note::{pitch_name, Note};
pub use pattern::{Pattern, Row};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
