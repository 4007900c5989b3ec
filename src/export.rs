// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Standard MIDI file output.
//!
//! Flattens a [`Composition`] into a format 1 SMF: track 0 carries the
//! tempo, time-signature, and key-signature meta events, and each
//! composition track follows in order. The byte-level encoding is
//! handled by `midly`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use tracing::{debug, warn};

use crate::composition::{Composition, EventKind, MetaEvent, TrackEvent};
use crate::error::{Error, Result};
use crate::music::KeyMode;

/// Ticks per quarter note in the written file
pub const TICKS_PER_BEAT: u16 = 480;

/// Flatten a composition into an in-memory SMF structure
pub fn flatten(composition: &Composition) -> Smf<'static> {
    let mut smf = Smf {
        header: Header::new(Format::Parallel, Timing::Metrical(TICKS_PER_BEAT.into())),
        tracks: Vec::new(),
    };

    smf.tracks.push(meta_track(composition));

    for track in composition.tracks() {
        let mut events: Vec<midly::TrackEvent<'static>> = track
            .events()
            .iter()
            .map(convert_event)
            .collect();
        events.push(end_of_track());
        smf.tracks.push(events);
    }

    smf
}

/// Write the composition to `path`, avoiding overwrite.
///
/// If `path` already exists, the file goes to a timestamp-suffixed
/// sibling instead; the rename is logged rather than returned. The
/// check-then-write is not atomic, so a concurrent writer can still
/// race us for the same name.
pub fn save(composition: &Composition, path: &Path) -> Result<()> {
    let smf = flatten(composition);

    let target = unique_path(path);
    if target != path {
        warn!(
            requested = %path.display(),
            actual = %target.display(),
            "target file exists, writing under a timestamped name"
        );
    }

    let mut bytes = Vec::new();
    smf.write_std(&mut bytes).map_err(|source| Error::Save {
        path: target.clone(),
        source,
    })?;
    fs::write(&target, &bytes).map_err(|source| Error::Save {
        path: target.clone(),
        source,
    })?;

    debug!(path = %target.display(), tracks = smf.tracks.len(), "file written");
    Ok(())
}

/// Derive a non-colliding path: `<stem>_<unix-timestamp><ext>` when the
/// requested path already exists
fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    path.with_file_name(format!("{}_{}{}", stem, timestamp, ext))
}

/// Track 0: one meta event per metadata field, all at delta 0
fn meta_track(composition: &Composition) -> Vec<midly::TrackEvent<'static>> {
    let (numerator, denominator) = composition.time_signature();
    let metas = [
        MetaEvent::Tempo {
            micros_per_beat: composition.tempo_micros(),
        },
        MetaEvent::TimeSignature {
            numerator: numerator.min(255) as u8,
            denominator: denominator.min(255) as u8,
        },
        MetaEvent::KeySignature(composition.key_signature()),
    ];

    let mut events: Vec<midly::TrackEvent<'static>> = metas
        .iter()
        .map(|meta| midly::TrackEvent {
            delta: 0.into(),
            kind: convert_meta(meta),
        })
        .collect();
    events.push(end_of_track());
    events
}

fn convert_event(event: &TrackEvent) -> midly::TrackEvent<'static> {
    let kind = match event.kind {
        EventKind::NoteOn {
            channel,
            pitch,
            velocity,
        } => TrackEventKind::Midi {
            channel: channel.into(),
            message: MidiMessage::NoteOn {
                key: pitch.into(),
                vel: velocity.into(),
            },
        },
        EventKind::NoteOff {
            channel,
            pitch,
            velocity,
        } => TrackEventKind::Midi {
            channel: channel.into(),
            message: MidiMessage::NoteOff {
                key: pitch.into(),
                vel: velocity.into(),
            },
        },
        EventKind::ProgramChange { channel, program } => TrackEventKind::Midi {
            channel: channel.into(),
            message: MidiMessage::ProgramChange {
                program: program.into(),
            },
        },
        EventKind::ControlChange {
            channel,
            control,
            value,
        } => TrackEventKind::Midi {
            channel: channel.into(),
            message: MidiMessage::Controller {
                controller: control.into(),
                value: value.into(),
            },
        },
        EventKind::PitchBend { channel, bend } => TrackEventKind::Midi {
            channel: channel.into(),
            message: MidiMessage::PitchBend {
                bend: midly::PitchBend::from_int(bend),
            },
        },
        EventKind::Meta(ref meta) => convert_meta(meta),
    };

    midly::TrackEvent {
        delta: event.delta.into(),
        kind,
    }
}

fn convert_meta(meta: &MetaEvent) -> TrackEventKind<'static> {
    match *meta {
        MetaEvent::Tempo { micros_per_beat } => {
            TrackEventKind::Meta(MetaMessage::Tempo(micros_per_beat.into()))
        }
        MetaEvent::TimeSignature {
            numerator,
            denominator,
        } => {
            // Encoded as an exponent; the setter guarantees a power of two
            let denominator_log = denominator.max(1).ilog2() as u8;
            TrackEventKind::Meta(MetaMessage::TimeSignature(numerator, denominator_log, 24, 8))
        }
        MetaEvent::KeySignature(key) => TrackEventKind::Meta(MetaMessage::KeySignature(
            key.flats_sharps(),
            key.mode() == KeyMode::Minor,
        )),
    }
}

fn end_of_track() -> midly::TrackEvent<'static> {
    midly::TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{Key, KeyName, Note};

    #[test]
    fn test_flatten_shape() {
        let mut composition = Composition::new();
        let note = Note::new(60, 64, 480, 0).unwrap();
        composition.add_note(&note).unwrap();

        let smf = flatten(&composition);
        assert_eq!(smf.header.format, Format::Parallel);
        // Meta track plus one content track
        assert_eq!(smf.tracks.len(), 2);

        // Meta track: tempo, time signature, key signature, end of track
        assert_eq!(smf.tracks[0].len(), 4);
        assert!(matches!(
            smf.tracks[0][0].kind,
            TrackEventKind::Meta(MetaMessage::Tempo(t)) if t.as_int() == 500_000
        ));
        assert!(matches!(
            smf.tracks[0][1].kind,
            TrackEventKind::Meta(MetaMessage::TimeSignature(4, 2, 24, 8))
        ));
        assert!(matches!(
            smf.tracks[0][2].kind,
            TrackEventKind::Meta(MetaMessage::KeySignature(0, false))
        ));

        // Content track: note on, note off, end of track
        assert_eq!(smf.tracks[1].len(), 3);
    }

    #[test]
    fn test_flatten_is_rebuilt_from_current_state() {
        let mut composition = Composition::new();
        composition.set_tempo(90).unwrap();
        composition.set_tempo(140).unwrap();

        let smf = flatten(&composition);
        // One tempo event only, holding the latest value
        let tempo_events: Vec<_> = smf.tracks[0]
            .iter()
            .filter(|e| matches!(e.kind, TrackEventKind::Meta(MetaMessage::Tempo(_))))
            .collect();
        assert_eq!(tempo_events.len(), 1);
        assert!(matches!(
            tempo_events[0].kind,
            TrackEventKind::Meta(MetaMessage::Tempo(t)) if t.as_int() == 60_000_000 / 140
        ));
    }

    #[test]
    fn test_slowest_tempo_is_not_truncated() {
        let mut composition = Composition::new();
        composition.set_tempo(4).unwrap();

        let smf = flatten(&composition);
        assert!(matches!(
            smf.tracks[0][0].kind,
            TrackEventKind::Meta(MetaMessage::Tempo(t)) if t.as_int() == 15_000_000
        ));
    }

    #[test]
    fn test_odd_meter_encoding() {
        let mut composition = Composition::new();
        composition.set_time_signature(7, 8).unwrap();

        let smf = flatten(&composition);
        // 7/8 carries the denominator as an exponent (8 = 2^3)
        assert!(matches!(
            smf.tracks[0][1].kind,
            TrackEventKind::Meta(MetaMessage::TimeSignature(7, 3, _, _))
        ));
    }

    #[test]
    fn test_minor_key_flattens_with_minor_flag() {
        let mut composition = Composition::new();
        composition.set_key_signature(Key::minor(KeyName::CSharp));

        let smf = flatten(&composition);
        assert!(matches!(
            smf.tracks[0][2].kind,
            TrackEventKind::Meta(MetaMessage::KeySignature(4, true))
        ));
    }

    #[test]
    fn test_unique_path_without_collision() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mid");
        assert_eq!(unique_path(&path), path);
    }

    #[test]
    fn test_unique_path_with_collision() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mid");
        fs::write(&path, b"existing").unwrap();

        let renamed = unique_path(&path);
        assert_ne!(renamed, path);
        let name = renamed.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("song_"));
        assert!(name.ends_with(".mid"));
    }
}
