//! ProTracker decoder and writer tests.

use pretty_assertions::assert_eq;

use super::*;
use crate::module::SampleInfo;
use crate::note::Note;
use crate::pattern::{Row, PROTRACKER_ROWS};

fn note(period: u16, instrument: u8, effect: u8, parameter: u8) -> Note {
    Note {
        period,
        instrument,
        effect,
        parameter,
    }
}

/// Pattern whose first row carries a recognisable note on every channel.
fn marked_pattern(channels: usize, marker: u8) -> Pattern {
    let mut pattern = Pattern::new(PROTRACKER_ROWS, channels);
    let row = Row {
        notes: (0..channels)
            .map(|c| note(428, marker, c as u8 & 0x0F, marker))
            .collect(),
    };
    pattern.set_row(0, &row).unwrap();
    pattern.set_row(63, &row).unwrap();
    pattern
}

fn build_module(channels: usize, num_patterns: usize) -> Vec<u8> {
    let mut writer = ModWriter::new("test song", channels).unwrap();
    writer.restart_position = 0;
    for p in 0..num_patterns {
        writer.add_pattern(marked_pattern(channels, p as u8 + 1)).unwrap();
    }
    let order: Vec<u8> = (0..num_patterns as u8).collect();
    writer.set_order_table(&order);
    writer
        .set_sample(
            0,
            ModSampleRecord {
                name: "kick".to_string(),
                finetune: 0,
                volume: 64,
                repeat_offset: 0,
                repeat_length: 1,
                data: vec![1, 2, 3, 4, 5, 6],
            },
        )
        .unwrap();
    writer
        .set_sample(
            4,
            ModSampleRecord {
                name: "pad".to_string(),
                finetune: 0x0F,
                volume: 40,
                repeat_offset: 2,
                repeat_length: 4,
                data: vec![0x80; 16],
            },
        )
        .unwrap();
    writer.to_bytes().unwrap()
}

#[test]
fn test_decode_writer_output() {
    let bytes = build_module(4, 2);
    let module = ProTrackerModule::decode(&bytes).unwrap();

    assert_eq!(module.title(), "test song");
    assert_eq!(module.song_length(), 2);
    assert_eq!(module.restart_position(), 0);
    assert_eq!(module.order(), &[0, 1]);
    assert_eq!(module.magic(), Some(b"M.K."));
    assert_eq!(module.num_channels(), 4);
    assert_eq!(module.pattern_count(), 2);
    assert_eq!(module.patterns().len(), 2);

    for (index, pattern) in module.patterns().iter().enumerate() {
        assert_eq!(pattern.data().len(), 64 * 4 * 4);
        let expected = note(428, index as u8 + 1, 2, index as u8 + 1);
        assert_eq!(pattern.note(0, 2).unwrap(), expected);
        assert_eq!(pattern.note(63, 2).unwrap(), expected);
        assert!(pattern.note(1, 2).unwrap().is_empty());
    }

    assert_eq!(module.samples().len(), NUM_SAMPLES);
    let kick = module.sample(0).unwrap();
    assert_eq!(kick.name(), "kick");
    assert_eq!(kick.length, 6);
    assert_eq!(kick.data(), &[1, 2, 3, 4, 5, 6]);
    assert_eq!(
        kick.info,
        SampleInfo::ProTracker(PtSampleInfo {
            finetune: 0,
            volume: 64,
            repeat_offset: 0,
            repeat_length: 1,
        })
    );

    let pad = module.sample(4).unwrap();
    assert_eq!(pad.length, 16);
    match &pad.info {
        SampleInfo::ProTracker(info) => {
            assert_eq!(info.finetune, 0x0F);
            assert_eq!(info.volume, 40);
            assert_eq!(info.repeat_offset, 2);
            assert_eq!(info.repeat_length, 4);
        }
        other => panic!("expected ProTracker info, got {:?}", other),
    }

    assert!(module.sample(1).unwrap().is_empty());
}

#[test]
fn test_sample_length_is_words_times_two() {
    let bytes = build_module(4, 1);
    // Sample 0 record: length field at 20 + 22.
    assert_eq!(&bytes[42..44], &[0x00, 0x03]);
    let module = ProTrackerModule::decode(&bytes).unwrap();
    assert_eq!(module.sample(0).unwrap().length, 6);
}

#[test]
fn test_magic_selects_channel_count() {
    let cases: [(&[u8; 4], usize); 6] = [
        (b"M.K.", 4),
        (b"FLT4", 4),
        (b"M!K!", 4),
        (b"6CHN", 6),
        (b"8CHN", 8),
        (b"FLT8", 8),
    ];
    for (magic, channels) in cases {
        let mut bytes = build_module(channels, 1);
        bytes[MAGIC_OFFSET..MAGIC_OFFSET + 4].copy_from_slice(magic);
        let module = ProTrackerModule::decode(&bytes).unwrap();
        assert_eq!(module.num_channels(), channels, "magic {:?}", magic);
        assert_eq!(module.magic(), Some(magic));
        assert_eq!(module.pattern(0).unwrap().data().len(), 64 * channels * 4);
    }
}

#[test]
fn test_missing_magic_rewinds_cursor() {
    let with_magic = build_module(4, 1);
    let mut bytes = with_magic.clone();
    bytes.drain(MAGIC_OFFSET..MAGIC_OFFSET + 4);

    let module = ProTrackerModule::decode(&bytes).unwrap();
    let reference = ProTrackerModule::decode(&with_magic).unwrap();

    assert_eq!(module.magic(), None);
    assert_eq!(module.num_channels(), 4);
    assert_eq!(module.patterns(), reference.patterns());
    assert_eq!(module.sample(4).unwrap().data(), reference.sample(4).unwrap().data());
}

#[test]
fn test_unknown_magic_is_read_as_pattern_data() {
    let mut bytes = build_module(4, 1);
    bytes[MAGIC_OFFSET..MAGIC_OFFSET + 4].copy_from_slice(b"ABCD");

    let module = ProTrackerModule::decode(&bytes).unwrap();
    assert_eq!(module.magic(), None);
    assert_eq!(module.num_channels(), 4);
    assert_eq!(
        module.pattern(0).unwrap().note(0, 0).unwrap(),
        Note::decode(*b"ABCD")
    );
}

#[test]
fn test_pattern_count_scans_whole_sequence_table() {
    let mut writer = ModWriter::new("stray", 4).unwrap();
    for p in 0..4 {
        writer.add_pattern(marked_pattern(4, p + 1)).unwrap();
    }
    writer.set_order_table(&[0, 1]);
    let mut bytes = writer.to_bytes().unwrap();
    // Unused slot past the song length still names pattern 3.
    bytes[952 + 100] = 3;

    let module = ProTrackerModule::decode(&bytes).unwrap();
    assert_eq!(module.order(), &[0, 1]);
    assert_eq!(module.pattern_count(), 4);
    assert_eq!(module.patterns().len(), 4);
    assert_eq!(module.pattern(3).unwrap().note(0, 0).unwrap().instrument, 4);
}

#[test]
fn test_truncated_sample_data() {
    let mut bytes = build_module(4, 1);
    bytes.pop();
    assert!(matches!(
        ProTrackerModule::decode(&bytes),
        Err(ModuleError::TruncatedData { .. })
    ));
}

#[test]
fn test_truncated_header() {
    let bytes = vec![0u8; 500];
    assert!(matches!(
        ProTrackerModule::decode(&bytes),
        Err(ModuleError::TruncatedData { .. })
    ));
}

#[test]
fn test_index_accessors_out_of_range() {
    let module = ProTrackerModule::decode(&build_module(4, 1)).unwrap();
    assert!(matches!(
        module.pattern(1),
        Err(ModuleError::IndexOutOfRange { what: "pattern", index: 1, len: 1 })
    ));
    assert!(matches!(
        module.sample(31),
        Err(ModuleError::IndexOutOfRange { what: "sample", .. })
    ));
}

#[test]
fn test_writer_rejects_bad_shapes() {
    assert!(ModWriter::new("x", 5).is_err());
    let mut writer = ModWriter::new("x", 4).unwrap();
    assert!(writer.add_pattern(Pattern::new(PROTRACKER_ROWS, 8)).is_err());
    assert!(writer.add_pattern(Pattern::new(32, 4)).is_err());
    assert!(writer
        .set_sample(31, ModSampleRecord::default())
        .is_err());
    let oversized = ModSampleRecord {
        data: vec![0; writer::MAX_SAMPLE_BYTES + 1],
        ..Default::default()
    };
    assert!(writer.set_sample(0, oversized).is_err());
}

#[test]
fn test_writer_pads_odd_sample_and_title() {
    let mut writer = ModWriter::new("a title that is far too long", 4).unwrap();
    writer.add_pattern(Pattern::new(PROTRACKER_ROWS, 4)).unwrap();
    writer.set_order_table(&[0]);
    writer
        .set_sample(
            0,
            ModSampleRecord {
                name: "odd".to_string(),
                data: vec![9, 9, 9],
                ..Default::default()
            },
        )
        .unwrap();
    let bytes = writer.to_bytes().unwrap();
    assert_eq!(bytes.len(), MAGIC_OFFSET + 4 + 1024 + 4);

    let module = ProTrackerModule::decode(&bytes).unwrap();
    assert_eq!(module.title(), "a title that is far");
    assert_eq!(module.sample(0).unwrap().data(), &[9, 9, 9, 0]);
}

#[test]
fn test_writer_song_length_override() {
    let mut writer = ModWriter::new("long", 4).unwrap();
    writer.add_pattern(Pattern::new(PROTRACKER_ROWS, 4)).unwrap();
    writer.set_order_table(&[0]);
    assert_eq!(writer.song_length(), 1);
    assert_eq!(writer.required_patterns(), 1);
    writer.set_song_length(3);

    let module = ProTrackerModule::decode(&writer.to_bytes().unwrap()).unwrap();
    assert_eq!(module.song_length(), 3);
    assert_eq!(module.order(), &[0, 0, 0]);
}
