//! The decoded module: a closed sum over the four supported formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModuleError;
use crate::it::{ItModule, ItSampleInfo};
use crate::protracker::{ProTrackerModule, PtSampleInfo};
use crate::s3m::{S3mModule, S3mSampleInfo};
use crate::xm::{XmModule, XmSampleInfo};

/// Which tracker produced a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    ProTracker,
    ScreamTracker,
    FastTracker,
    ImpulseTracker,
}

impl ModuleFormat {
    /// Stable lowercase tag used in documents and JSON output.
    pub fn tag(&self) -> &'static str {
        match self {
            ModuleFormat::ProTracker => "protracker",
            ModuleFormat::ScreamTracker => "screamtracker",
            ModuleFormat::FastTracker => "fasttracker",
            ModuleFormat::ImpulseTracker => "impulsetracker",
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ModuleFormat::ProTracker => "mod",
            ModuleFormat::ScreamTracker => "s3m",
            ModuleFormat::FastTracker => "xm",
            ModuleFormat::ImpulseTracker => "it",
        }
    }

    /// Human-readable tracker name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModuleFormat::ProTracker => "ProTracker",
            ModuleFormat::ScreamTracker => "ScreamTracker 3",
            ModuleFormat::FastTracker => "FastTracker II",
            ModuleFormat::ImpulseTracker => "Impulse Tracker",
        }
    }
}

impl fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ModuleFormat {
    type Err = ModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "protracker" | "mod" => Ok(ModuleFormat::ProTracker),
            "screamtracker" | "s3m" => Ok(ModuleFormat::ScreamTracker),
            "fasttracker" | "xm" => Ok(ModuleFormat::FastTracker),
            "impulsetracker" | "it" => Ok(ModuleFormat::ImpulseTracker),
            other => Err(ModuleError::format(format!(
                "unknown format tag '{}'",
                other
            ))),
        }
    }
}

/// Format-specific sample metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleInfo {
    ProTracker(PtSampleInfo),
    ScreamTracker(S3mSampleInfo),
    FastTracker(XmSampleInfo),
    ImpulseTracker(ItSampleInfo),
}

/// A decoded sample and its PCM payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Display name.
    pub name: String,
    /// On-disk filename hint (S3M and IT records carry one).
    pub filename: Option<String>,
    /// Length as declared by the sample record. MOD and XM count bytes; S3M
    /// and IT count frames, so a 16-bit sample there holds `2 * length` bytes.
    /// `data().len()` is always the byte count.
    pub length: u32,
    /// Decoded PCM bytes.
    pub data: Vec<u8>,
    /// Loop points, volume, tuning and width flags.
    pub info: SampleInfo,
}

impl Sample {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Filename hint, falling back to the sample name.
    pub fn filename(&self) -> &str {
        self.filename.as_deref().unwrap_or(&self.name)
    }

    /// Decoded PCM bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// An instrument owning an ordered list of samples (XM), or a standalone
/// instrument record without samples (IT).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    pub name: String,
    pub filename: Option<String>,
    pub samples: Vec<Sample>,
}

/// Read-only view of an instrument.
///
/// For MOD and S3M every sample doubles as its own instrument, so the view
/// borrows a single sample.
#[derive(Debug, Clone, Copy)]
pub struct InstrumentView<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub samples: &'a [Sample],
}

impl<'a> InstrumentView<'a> {
    fn from_sample(sample: &'a Sample) -> Self {
        Self {
            name: &sample.name,
            filename: sample.filename.as_deref(),
            samples: std::slice::from_ref(sample),
        }
    }

    fn from_instrument(instrument: &'a Instrument) -> Self {
        Self {
            name: &instrument.name,
            filename: instrument.filename.as_deref(),
            samples: &instrument.samples,
        }
    }
}

/// A decoded tracker module.
#[derive(Debug, Clone)]
pub enum Module {
    ProTracker(ProTrackerModule),
    ScreamTracker(S3mModule),
    FastTracker(XmModule),
    ImpulseTracker(ItModule),
}

impl Module {
    pub fn title(&self) -> &str {
        match self {
            Module::ProTracker(m) => m.title(),
            Module::ScreamTracker(m) => m.title(),
            Module::FastTracker(m) => m.title(),
            Module::ImpulseTracker(m) => m.title(),
        }
    }

    pub fn format(&self) -> ModuleFormat {
        match self {
            Module::ProTracker(_) => ModuleFormat::ProTracker,
            Module::ScreamTracker(_) => ModuleFormat::ScreamTracker,
            Module::FastTracker(_) => ModuleFormat::FastTracker,
            Module::ImpulseTracker(_) => ModuleFormat::ImpulseTracker,
        }
    }

    pub fn pattern_count(&self) -> usize {
        match self {
            Module::ProTracker(m) => m.pattern_count(),
            Module::ScreamTracker(m) => m.pattern_count(),
            Module::FastTracker(m) => m.pattern_count(),
            Module::ImpulseTracker(m) => m.pattern_count(),
        }
    }

    /// All samples in table order. XM samples are flattened across instruments.
    pub fn samples(&self) -> Vec<&Sample> {
        match self {
            Module::ProTracker(m) => m.samples().iter().collect(),
            Module::ScreamTracker(m) => m.samples().iter().collect(),
            Module::FastTracker(m) => m
                .instruments()
                .iter()
                .flat_map(|i| i.samples.iter())
                .collect(),
            Module::ImpulseTracker(m) => m.samples().iter().collect(),
        }
    }

    pub fn instruments(&self) -> Vec<InstrumentView<'_>> {
        match self {
            Module::ProTracker(m) => m.samples().iter().map(InstrumentView::from_sample).collect(),
            Module::ScreamTracker(m) => {
                m.samples().iter().map(InstrumentView::from_sample).collect()
            }
            Module::FastTracker(m) => m
                .instruments()
                .iter()
                .map(InstrumentView::from_instrument)
                .collect(),
            Module::ImpulseTracker(m) => m
                .instruments()
                .iter()
                .map(InstrumentView::from_instrument)
                .collect(),
        }
    }

    pub fn as_protracker(&self) -> Option<&ProTrackerModule> {
        match self {
            Module::ProTracker(m) => Some(m),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tags_round_trip() {
        for format in [
            ModuleFormat::ProTracker,
            ModuleFormat::ScreamTracker,
            ModuleFormat::FastTracker,
            ModuleFormat::ImpulseTracker,
        ] {
            assert_eq!(format.tag().parse::<ModuleFormat>().unwrap(), format);
            assert_eq!(format.extension().parse::<ModuleFormat>().unwrap(), format);
            assert_eq!(format.to_string(), format.tag());
        }
        assert!("midi".parse::<ModuleFormat>().is_err());
    }

    #[test]
    fn test_format_serde_uses_tag() {
        let json = serde_json::to_string(&ModuleFormat::FastTracker).unwrap();
        assert_eq!(json, "\"fasttracker\"");
    }

    #[test]
    fn test_sample_filename_fallback() {
        let sample = Sample {
            name: "bass".to_string(),
            filename: None,
            length: 0,
            data: Vec::new(),
            info: SampleInfo::ProTracker(PtSampleInfo::default()),
        };
        assert_eq!(sample.filename(), "bass");
        assert!(sample.is_empty());
    }
}
