//! Document → ProTracker module bytes.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::{ModuleDocument, PatternDocument, SampleDocument};
use crate::error::{ModuleError, Result};
use crate::module::ModuleFormat;
use crate::note::{Note, MAX_EFFECT, MAX_PERIOD};
use crate::pattern::{Pattern, Row, PROTRACKER_ROWS};
use crate::protracker::{ModSampleRecord, ModWriter, NUM_SAMPLES, SEQUENCE_LEN};

/// Rebuild a ProTracker module from its document.
///
/// The document is the only input. Sample word lengths are recomputed from
/// the PCM, rows and channels the document leaves out become empty notes, and
/// exactly as many patterns are written as the order table requires.
///
/// Only the first `song_length` sequence entries travel in a document, so a
/// module that hides patterns behind the song length comes back without
/// them. Each such pattern is dropped with a warning.
pub fn import(doc: &ModuleDocument) -> Result<Vec<u8>> {
    if doc.format != ModuleFormat::ProTracker {
        return Err(invalid(format!(
            "only ProTracker documents can be imported, got '{}'",
            doc.format
        )));
    }

    let num_channels = doc.num_channels as usize;
    let mut writer = ModWriter::new(&doc.title, num_channels)?;

    writer.restart_position = u8::try_from(doc.restart_position)
        .map_err(|_| invalid(format!("restart position {} exceeds 255", doc.restart_position)))?;

    if doc.song_length as usize > SEQUENCE_LEN {
        return Err(invalid(format!(
            "song length {} exceeds {}",
            doc.song_length, SEQUENCE_LEN
        )));
    }
    if doc.pattern_order.len() > SEQUENCE_LEN {
        warn!(
            entries = doc.pattern_order.len(),
            "pattern order longer than the sequence table, truncating"
        );
    }
    writer.set_order_table(&doc.pattern_order);
    writer.set_song_length(doc.song_length as u8);

    for sample in &doc.samples {
        let index = sample
            .number
            .checked_sub(1)
            .filter(|&i| i < NUM_SAMPLES)
            .ok_or_else(|| invalid(format!("sample number {} is not in 1..=31", sample.number)))?;
        writer.set_sample(index, sample_record(sample)?)?;
    }

    let by_number: BTreeMap<usize, &PatternDocument> = doc
        .patterns
        .iter()
        .map(|pattern| (pattern.pattern_number, pattern))
        .collect();

    let num_patterns = writer.required_patterns();
    for (&number, _) in by_number.range(num_patterns..) {
        warn!(
            pattern = number,
            num_patterns, "pattern is not reachable from the order table, dropping"
        );
    }

    for number in 0..num_patterns {
        let pattern = match by_number.get(&number) {
            Some(pattern_doc) => build_pattern(pattern_doc, num_channels)?,
            None => Pattern::new(PROTRACKER_ROWS, num_channels),
        };
        writer.add_pattern(pattern)?;
    }

    debug!(
        num_patterns,
        num_channels,
        samples = doc.samples.len(),
        "rebuilt ProTracker module"
    );
    writer.to_bytes()
}

fn invalid(reason: String) -> ModuleError {
    ModuleError::InvalidDocument(reason)
}

fn sample_record(sample: &SampleDocument) -> Result<ModSampleRecord> {
    let data = sample.pcm()?;
    if data.len() != sample.length as usize {
        debug!(
            number = sample.number,
            declared = sample.length,
            actual = data.len(),
            "sample length recomputed from PCM"
        );
    }

    let field = |name: &str, value: u32| {
        u16::try_from(value).map_err(|_| {
            invalid(format!(
                "sample {} {} {} exceeds 65535",
                sample.number, name, value
            ))
        })
    };

    Ok(ModSampleRecord {
        name: sample.name.clone(),
        finetune: u8::try_from(sample.finetune).map_err(|_| {
            invalid(format!(
                "sample {} finetune {} is not a byte",
                sample.number, sample.finetune
            ))
        })?,
        volume: sample.volume,
        repeat_offset: field("repeat offset", sample.repeat_offset)?,
        repeat_length: field("repeat length", sample.repeat_length)?,
        data,
    })
}

fn build_pattern(doc: &PatternDocument, num_channels: usize) -> Result<Pattern> {
    if doc.num_rows != PROTRACKER_ROWS || doc.num_channels != num_channels {
        warn!(
            pattern = doc.pattern_number,
            rows = doc.num_rows,
            channels = doc.num_channels,
            "pattern shape differs from the module, fitting to {}x{}",
            PROTRACKER_ROWS,
            num_channels
        );
    }

    let mut pattern = Pattern::new(PROTRACKER_ROWS, num_channels);
    for row_doc in &doc.rows {
        if row_doc.row >= PROTRACKER_ROWS {
            warn!(
                pattern = doc.pattern_number,
                row = row_doc.row,
                "row out of range, dropping"
            );
            continue;
        }
        if row_doc.channels.len() > num_channels {
            warn!(
                pattern = doc.pattern_number,
                row = row_doc.row,
                channels = row_doc.channels.len(),
                "extra channels dropped"
            );
        }

        let mut row = Row::empty(num_channels);
        for (channel, (slot, cell)) in row.notes.iter_mut().zip(&row_doc.channels).enumerate() {
            if cell.period > MAX_PERIOD || cell.effect > MAX_EFFECT {
                return Err(invalid(format!(
                    "pattern {} row {} channel {}: period {} / effect {:#X} out of range \
                     (max {} / {:#X})",
                    doc.pattern_number,
                    row_doc.row,
                    channel,
                    cell.period,
                    cell.effect,
                    MAX_PERIOD,
                    MAX_EFFECT
                )));
            }
            *slot = Note {
                period: cell.period,
                instrument: cell.instrument,
                effect: cell.effect,
                parameter: cell.parameter,
            };
        }
        pattern.set_row(row_doc.row, &row)?;
    }
    Ok(pattern)
}
