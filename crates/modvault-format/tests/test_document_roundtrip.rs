//! ProTracker document round-trip tests.
//!
//! A module is assembled by hand, loaded, exported to JSON, parsed back,
//! imported to bytes and loaded again. Titles, sample data and the full note
//! matrix must survive.

mod common;

use proptest::prelude::*;

use common::{mod_bytes, xm_bytes, Cell, ModSample};
use modvault_format::document::{export, import, ModuleDocument};
use modvault_format::{load, Module, ModuleError, ModuleFormat};
use pretty_assertions::assert_eq;

fn protracker(module: &Module) -> &modvault_format::protracker::ProTrackerModule {
    module.as_protracker().expect("expected a ProTracker module")
}

fn round_trip(bytes: &[u8]) -> (Module, Module, ModuleDocument) {
    let original = load(bytes).unwrap();
    let json = export(&original).unwrap().to_json().unwrap();
    let doc = ModuleDocument::from_json(&json).unwrap();
    let rebuilt = load(&import(&doc).unwrap()).unwrap();
    (original, rebuilt, doc)
}

// =============================================================================
// Fixed cases
// =============================================================================

#[test]
fn test_round_trip_preserves_song() {
    let bytes = mod_bytes(
        "round trip",
        b"M.K.",
        4,
        &[0, 1, 1, 0],
        2,
        &[
            (0, 0, 0, (428, 1, 0xC, 0x40)),
            (0, 63, 3, (113, 2, 0x0, 0x00)),
            (1, 31, 1, (1712, 31, 0xF, 0x06)),
            (1, 32, 2, (300, 16, 0x3, 0xFF)),
        ],
        &[
            ModSample {
                name: "kick",
                volume: 64,
                pcm: vec![0x7F, 0x80, 0x00, 0x01],
            },
            ModSample {
                name: "snare",
                volume: 32,
                pcm: (0..=255).collect(),
            },
        ],
    );

    let (original, rebuilt, doc) = round_trip(&bytes);
    let (original, rebuilt) = (protracker(&original), protracker(&rebuilt));

    assert_eq!(rebuilt.title(), "round trip");
    assert_eq!(rebuilt.song_length(), 4);
    assert_eq!(rebuilt.order(), &[0, 1, 1, 0]);
    assert_eq!(rebuilt.patterns(), original.patterns());
    assert_eq!(rebuilt.samples(), original.samples());

    let cell = &doc.patterns[1].rows[32].channels[2];
    assert_eq!(cell.period, 300);
    assert_eq!(cell.note, None);
    assert_eq!(doc.patterns[0].rows[63].channels[3].note.as_deref(), Some("B-3"));
}

#[test]
fn test_missing_magic_is_normalised() {
    // No magic: the four bytes at 1080 start pattern 0.
    let mut bytes = mod_bytes("old", b"M.K.", 4, &[0], 1, &[], &[]);
    bytes.drain(1080..1084);

    let (original, rebuilt, _) = round_trip(&bytes);
    assert_eq!(protracker(&original).magic(), None);
    assert_eq!(protracker(&rebuilt).magic(), Some(b"M.K."));
    assert_eq!(
        protracker(&rebuilt).patterns(),
        protracker(&original).patterns()
    );
}

#[test]
fn test_fasttracker_exports_but_does_not_import() {
    let module = load(&xm_bytes("xm song", &[1, 1, 1])).unwrap();
    let doc = export(&module).unwrap();

    assert_eq!(doc.format, ModuleFormat::FastTracker);
    assert_eq!(doc.author.as_deref(), Some("modvault tests"));
    assert_eq!(doc.tempo, Some(6));
    assert_eq!(doc.bpm, Some(125));
    assert!(doc.samples.is_empty());
    assert!(doc.patterns.is_empty());

    let instruments = doc.instruments.as_ref().unwrap();
    assert_eq!(instruments.len(), 1);
    assert_eq!(instruments[0].name, "piano");
    assert_eq!(instruments[0].samples[0].pcm().unwrap(), vec![1, 2, 3]);
    assert_eq!(instruments[0].samples[0].panning, Some(0x80));

    assert!(matches!(import(&doc), Err(ModuleError::InvalidDocument(_))));
}

// =============================================================================
// Properties
// =============================================================================

fn cell() -> impl Strategy<Value = Cell> {
    (0u16..4096, any::<u8>(), 0u8..16, any::<u8>())
}

fn note_entries(
    patterns: usize,
    channels: usize,
) -> impl Strategy<Value = Vec<(usize, usize, usize, Cell)>> {
    prop::collection::vec((0..patterns, 0usize..64, 0..channels, cell()), 0..40)
}

fn samples() -> impl Strategy<Value = Vec<(String, Vec<u8>)>> {
    prop::collection::vec(
        ("[a-z\u{e0}-\u{ff}]{0,22}", prop::collection::vec(any::<u8>(), 0..64)),
        0..31,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any well-formed MOD survives export → JSON → import unchanged.
    #[test]
    fn protracker_round_trip(
        channels in prop::sample::select(vec![4usize, 6, 8]),
        order in prop::collection::vec(0u8..4, 1..16),
        notes in note_entries(4, 4),
        samples in samples(),
    ) {
        let magic: &[u8; 4] = match channels {
            4 => b"M.K.",
            6 => b"6CHN",
            _ => b"8CHN",
        };
        let num_patterns = *order.iter().max().unwrap_or(&0) as usize + 1;
        let notes: Vec<_> = notes
            .into_iter()
            .filter(|(pattern, _, _, _)| *pattern < num_patterns)
            .collect();
        let mod_samples: Vec<ModSample<'_>> = samples
            .iter()
            .map(|(name, pcm)| {
                let mut pcm = pcm.clone();
                if pcm.len() % 2 != 0 {
                    pcm.push(0);
                }
                ModSample { name: name.as_str(), volume: 40, pcm }
            })
            .collect();

        let bytes = mod_bytes("prop", magic, channels, &order, num_patterns, &notes, &mod_samples);
        let (original, rebuilt, _) = round_trip(&bytes);
        let (original, rebuilt) = (protracker(&original), protracker(&rebuilt));

        prop_assert_eq!(rebuilt.num_channels(), channels);
        prop_assert_eq!(rebuilt.order(), original.order());
        prop_assert_eq!(rebuilt.patterns(), original.patterns());
        prop_assert_eq!(rebuilt.samples(), original.samples());
    }

    /// Arbitrary bytes never panic the loader, whatever format they sniff as.
    #[test]
    fn load_never_panics(
        prefix in prop::sample::select(vec![&b""[..], &b"IMPM"[..], &b"Extended Module: "[..]]),
        body in prop::collection::vec(any::<u8>(), 0..2048),
        scrm in any::<bool>(),
    ) {
        let mut data = prefix.to_vec();
        data.extend(body);
        if scrm && data.len() >= 48 {
            data[44..48].copy_from_slice(b"SCRM");
        }
        let _ = load(&data);
    }
}
