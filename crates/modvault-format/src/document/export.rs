//! Module → document.

use tracing::debug;

use super::{
    ChannelDocument, InstrumentDocument, ModuleDocument, PatternDocument, RowDocument,
    SampleDocument,
};
use crate::error::{ModuleError, Result};
use crate::module::{Module, ModuleFormat, Sample, SampleInfo};
use crate::note::Note;
use crate::pattern::Pattern;
use crate::protracker::ProTrackerModule;
use crate::xm::XmModule;

/// Export a decoded module. ProTracker and FastTracker are supported.
pub fn export(module: &Module) -> Result<ModuleDocument> {
    match module {
        Module::ProTracker(m) => Ok(export_protracker(m)),
        Module::FastTracker(m) => Ok(export_fasttracker(m)),
        other => Err(ModuleError::InvalidDocument(format!(
            "cannot export {} modules",
            other.format().display_name()
        ))),
    }
}

/// Export every header field, sample and note of a ProTracker module.
pub fn export_protracker(module: &ProTrackerModule) -> ModuleDocument {
    let samples = module
        .samples()
        .iter()
        .enumerate()
        .map(|(index, sample)| sample_document(index + 1, sample))
        .collect();

    let patterns = module
        .patterns()
        .iter()
        .enumerate()
        .map(|(number, pattern)| pattern_document(number, pattern))
        .collect();

    debug!(
        patterns = module.patterns().len(),
        "exported ProTracker document"
    );

    ModuleDocument {
        format: ModuleFormat::ProTracker,
        title: module.title().to_string(),
        song_length: module.song_length() as u16,
        restart_position: module.restart_position() as u16,
        num_channels: module.num_channels() as u16,
        pattern_order: module.order().to_vec(),
        samples,
        patterns,
        author: None,
        version: None,
        flags: None,
        tempo: None,
        bpm: None,
        instruments: None,
    }
}

/// Export an XM header and its instruments. Pattern notes are not decoded.
pub fn export_fasttracker(module: &XmModule) -> ModuleDocument {
    let instruments = module
        .instruments()
        .iter()
        .enumerate()
        .map(|(index, instrument)| InstrumentDocument {
            number: index + 1,
            name: instrument.name.clone(),
            samples: instrument
                .samples
                .iter()
                .enumerate()
                .map(|(i, sample)| sample_document(i + 1, sample))
                .collect(),
        })
        .collect();

    ModuleDocument {
        format: ModuleFormat::FastTracker,
        title: module.title().to_string(),
        song_length: module.song_length(),
        restart_position: module.restart_position(),
        num_channels: module.num_channels(),
        pattern_order: module.order().to_vec(),
        samples: Vec::new(),
        patterns: Vec::new(),
        author: Some(module.author().to_string()),
        version: Some(module.version()),
        flags: Some(module.flags()),
        tempo: Some(module.tempo()),
        bpm: Some(module.bpm()),
        instruments: Some(instruments),
    }
}

fn sample_document(number: usize, sample: &Sample) -> SampleDocument {
    let mut doc = SampleDocument {
        number,
        name: sample.name.clone(),
        length: sample.length,
        finetune: 0,
        volume: 0,
        repeat_offset: 0,
        repeat_length: 0,
        data: SampleDocument::encode_data(sample.data()),
        relative_note: None,
        panning: None,
    };

    match &sample.info {
        SampleInfo::ProTracker(info) => {
            doc.finetune = info.finetune as i16;
            doc.volume = info.volume;
            doc.repeat_offset = info.repeat_offset as u32;
            doc.repeat_length = info.repeat_length as u32;
        }
        SampleInfo::FastTracker(info) => {
            doc.finetune = info.finetune as i16;
            doc.volume = info.volume;
            doc.repeat_offset = info.loop_start;
            doc.repeat_length = info.loop_length;
            doc.relative_note = Some(info.relative_note);
            doc.panning = Some(info.panning);
        }
        // Only ProTracker and FastTracker samples are exported.
        SampleInfo::ScreamTracker(_) | SampleInfo::ImpulseTracker(_) => {}
    }
    doc
}

fn pattern_document(number: usize, pattern: &Pattern) -> PatternDocument {
    let rows = pattern
        .rows()
        .enumerate()
        .map(|(row, notes)| RowDocument {
            row,
            channels: notes.notes.iter().map(channel_document).collect(),
        })
        .collect();

    PatternDocument {
        pattern_number: number,
        num_channels: pattern.num_channels(),
        num_rows: pattern.num_rows(),
        rows,
    }
}

fn channel_document(note: &Note) -> ChannelDocument {
    ChannelDocument {
        note: note.pitch_name().map(str::to_string),
        period: note.period,
        instrument: note.instrument,
        effect: note.effect,
        parameter: note.parameter,
    }
}
