// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The composition root object.
//!
//! A [`Composition`] owns its tracks and the global metadata (tempo,
//! time signature, key signature). Metadata lives in typed fields and
//! is only rendered into meta events when the composition is flattened
//! to a file, so there is always exactly one stored value per field.
//! Append operations target the active track.

pub mod event;
pub mod track;

pub use event::{EventKind, MetaEvent, TrackEvent};
pub use track::Track;

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::export;
use crate::music::{relative_key, Arpeggio, Chord, ChordProgression, Key, KeyName, Mode, Note};

/// Default tempo in beats per minute
pub const DEFAULT_TEMPO: u32 = 120;
/// Default time signature
pub const DEFAULT_TIME_SIGNATURE: (u32, u32) = (4, 4);
/// Slowest accepted tempo: below this the microseconds-per-beat value
/// overflows the file format's 24-bit tempo field
pub const MIN_TEMPO: u32 = 4;
/// Fastest accepted tempo: one microsecond per beat
pub const MAX_TEMPO: u32 = 60_000_000;

/// A multi-track musical sequence with global metadata
#[derive(Debug, Clone)]
pub struct Composition {
    tracks: Vec<Track>,
    active_track_index: Option<usize>,
    /// Tempo in BPM
    tempo: u32,
    time_signature: (u32, u32),
    key_signature: Key,
    mode: Option<Mode>,
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

impl Composition {
    /// Create a composition with defaults: 120 BPM, 4/4, C major, and
    /// one empty active track
    pub fn new() -> Self {
        Self {
            tracks: vec![Track::new()],
            active_track_index: Some(0),
            tempo: DEFAULT_TEMPO,
            time_signature: DEFAULT_TIME_SIGNATURE,
            key_signature: Key::major(KeyName::C),
            mode: None,
        }
    }

    /// Create a composition with explicit settings, validating each
    /// through the corresponding setter
    pub fn with_settings(
        tempo: u32,
        time_signature: (u32, u32),
        key_signature: Option<Key>,
    ) -> Result<Self> {
        let mut composition = Self::new();
        composition.set_tempo(tempo)?;
        composition.set_time_signature(time_signature.0, time_signature.1)?;
        if let Some(key) = key_signature {
            composition.set_key_signature(key);
        }
        Ok(composition)
    }

    /// Add a new empty track, mark it active, and return it
    pub fn add_track(&mut self) -> &mut Track {
        self.tracks.push(Track::new());
        let index = self.tracks.len() - 1;
        self.active_track_index = Some(index);
        debug!(index, "added track");
        &mut self.tracks[index]
    }

    /// All tracks, in creation order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Index of the active track
    pub fn active_track_index(&self) -> Option<usize> {
        self.active_track_index
    }

    fn resolve_active_index(&self) -> Result<usize> {
        if self.tracks.is_empty() {
            return Err(Error::NoTracks);
        }
        // Single-track workflow: the index value is irrelevant
        if self.tracks.len() == 1 {
            return Ok(0);
        }
        match self.active_track_index {
            Some(index) if index < self.tracks.len() => Ok(index),
            _ => Ok(0),
        }
    }

    /// The currently active track
    pub fn active_track(&self) -> Result<&Track> {
        let index = self.resolve_active_index()?;
        Ok(&self.tracks[index])
    }

    /// The currently active track, mutably
    pub fn active_track_mut(&mut self) -> Result<&mut Track> {
        let index = self.resolve_active_index()?;
        Ok(&mut self.tracks[index])
    }

    /// Redirect append operations to the track at `index`
    pub fn set_active_track(&mut self, index: usize) -> Result<()> {
        if index >= self.tracks.len() {
            return Err(Error::TrackIndexOutOfRange {
                index,
                count: self.tracks.len(),
            });
        }
        self.active_track_index = Some(index);
        Ok(())
    }

    /// Tempo in BPM
    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    /// Tempo in the file format's unit: microseconds per quarter note
    pub fn tempo_micros(&self) -> u32 {
        60_000_000 / self.tempo
    }

    /// Time signature as (numerator, denominator)
    pub fn time_signature(&self) -> (u32, u32) {
        self.time_signature
    }

    /// The key signature
    pub fn key_signature(&self) -> Key {
        self.key_signature
    }

    /// The mode set by [`set_mode`](Self::set_mode), if any
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Set the tempo in BPM.
    ///
    /// Tempos outside [`MIN_TEMPO`]..=[`MAX_TEMPO`] are rejected with no
    /// state change: the stored BPM must convert to a non-zero
    /// microseconds-per-beat value that fits the format's 24-bit field.
    pub fn set_tempo(&mut self, tempo: u32) -> Result<()> {
        if !(MIN_TEMPO..=MAX_TEMPO).contains(&tempo) {
            return Err(Error::InvalidTempo(tempo));
        }
        self.tempo = tempo;
        debug!(tempo, "tempo set");
        Ok(())
    }

    /// Set the time signature.
    ///
    /// The numerator must be positive and the denominator a positive
    /// power of two (the file format encodes it as an exponent). A
    /// rejected call leaves the previous signature in place.
    pub fn set_time_signature(&mut self, numerator: u32, denominator: u32) -> Result<()> {
        if numerator == 0 || denominator == 0 || !denominator.is_power_of_two() {
            return Err(Error::InvalidTimeSignature {
                numerator,
                denominator,
            });
        }
        self.time_signature = (numerator, denominator);
        debug!(numerator, denominator, "time signature set");
        Ok(())
    }

    /// Replace the key signature
    pub fn set_key_signature(&mut self, key: Key) {
        self.key_signature = key;
        debug!(key = %key, "key signature set");
    }

    /// Set the key signature from a root and mode.
    ///
    /// The mode string is validated against the seven diatonic modes;
    /// the concrete key is resolved through the scale system and stored
    /// via [`set_key_signature`](Self::set_key_signature).
    pub fn set_mode(&mut self, root: KeyName, mode: &str) -> Result<()> {
        let mode = Mode::parse(mode)?;
        self.mode = Some(mode);
        self.set_key_signature(relative_key(root, mode));
        Ok(())
    }

    /// Append a note to the active track
    pub fn add_note(&mut self, note: &Note) -> Result<()> {
        self.active_track_mut()?.add_note(note);
        Ok(())
    }

    /// Append a chord to the active track
    pub fn add_chord(&mut self, chord: &Chord) -> Result<()> {
        self.active_track_mut()?.add_chord(chord);
        Ok(())
    }

    /// Append an arpeggio to the active track
    pub fn add_arpeggio(&mut self, arpeggio: &Arpeggio) -> Result<()> {
        self.active_track_mut()?.add_arpeggio(arpeggio);
        Ok(())
    }

    /// Append a whole chord progression to the active track
    pub fn add_chord_progression(&mut self, progression: &ChordProgression) -> Result<()> {
        let track = self.active_track_mut()?;
        for chord in progression.chords() {
            track.add_chord(chord);
        }
        Ok(())
    }

    /// Append a program change to the active track
    pub fn add_program_change(&mut self, channel: u8, program: u8) -> Result<()> {
        self.active_track_mut()?.add_program_change(channel, program);
        Ok(())
    }

    /// Append a control change to the active track
    pub fn add_control_change(&mut self, channel: u8, control: u8, value: u8) -> Result<()> {
        self.active_track_mut()?
            .add_control_change(channel, control, value);
        Ok(())
    }

    /// Append a pitch bend to the active track
    pub fn add_pitch_bend(&mut self, channel: u8, bend: i16) -> Result<()> {
        self.active_track_mut()?.add_pitch_bend(channel, bend);
        Ok(())
    }

    /// Flatten every track and write a Standard MIDI File.
    ///
    /// Track 0 of the file carries the tempo, time-signature, and
    /// key-signature meta events; the composition's tracks follow in
    /// order. If `path` already exists the file is written to a
    /// timestamp-suffixed sibling instead of overwriting (the rename is
    /// logged, not returned). All filesystem failures surface as
    /// [`Error::Save`].
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        export::save(self, path.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::KeyMode;

    #[test]
    fn test_construction_defaults() {
        let composition = Composition::new();
        assert_eq!(composition.tempo(), 120);
        assert_eq!(composition.time_signature(), (4, 4));
        assert_eq!(composition.key_signature(), Key::major(KeyName::C));
        assert_eq!(composition.tracks().len(), 1);
        assert_eq!(composition.active_track_index(), Some(0));
    }

    #[test]
    fn test_with_settings_validates() {
        let composition =
            Composition::with_settings(90, (3, 4), Some(Key::minor(KeyName::A))).unwrap();
        assert_eq!(composition.tempo(), 90);
        assert_eq!(composition.time_signature(), (3, 4));
        assert_eq!(composition.key_signature(), Key::minor(KeyName::A));

        assert!(matches!(
            Composition::with_settings(0, (4, 4), None),
            Err(Error::InvalidTempo(0))
        ));
        assert!(matches!(
            Composition::with_settings(120, (0, 4), None),
            Err(Error::InvalidTimeSignature { .. })
        ));
    }

    #[test]
    fn test_add_track_activates_newest() {
        let mut composition = Composition::new();
        for k in 1..=3 {
            composition.add_track();
            assert_eq!(composition.tracks().len(), k + 1);
            assert_eq!(composition.active_track_index(), Some(k));
        }
    }

    #[test]
    fn test_single_track_ignores_index() {
        let mut composition = Composition::new();
        // Force a stale index; with one track the lookup still succeeds
        composition.active_track_index = Some(42);
        assert!(composition.active_track().is_ok());
    }

    #[test]
    fn test_set_active_track_bounds() {
        let mut composition = Composition::new();
        composition.add_track();

        assert!(composition.set_active_track(0).is_ok());
        assert!(composition.set_active_track(1).is_ok());
        let err = composition.set_active_track(2).unwrap_err();
        assert!(matches!(
            err,
            Error::TrackIndexOutOfRange { index: 2, count: 2 }
        ));
    }

    #[test]
    fn test_active_track_redirects_appends() {
        let mut composition = Composition::new();
        composition.add_track();
        composition.set_active_track(0).unwrap();

        let note = Note::new(60, 64, 480, 0).unwrap();
        composition.add_note(&note).unwrap();

        assert_eq!(composition.tracks()[0].len(), 2);
        assert!(composition.tracks()[1].is_empty());
    }

    #[test]
    fn test_invalid_tempo_leaves_state() {
        let mut composition = Composition::new();
        composition.set_tempo(90).unwrap();
        assert!(composition.set_tempo(0).is_err());
        assert_eq!(composition.tempo(), 90);
    }

    #[test]
    fn test_tempo_bounds() {
        let mut composition = Composition::new();
        composition.set_tempo(90).unwrap();

        // 3 BPM needs 20,000,000 us/beat, past the 24-bit tempo field
        assert!(matches!(
            composition.set_tempo(3),
            Err(Error::InvalidTempo(3))
        ));
        assert!(composition.set_tempo(0).is_err());
        assert!(composition.set_tempo(MAX_TEMPO + 1).is_err());
        assert_eq!(composition.tempo(), 90);

        // Both boundaries convert without truncation
        composition.set_tempo(MIN_TEMPO).unwrap();
        assert_eq!(composition.tempo_micros(), 15_000_000);
        composition.set_tempo(MAX_TEMPO).unwrap();
        assert_eq!(composition.tempo_micros(), 1);
    }

    #[test]
    fn test_time_signature_denominator_must_be_power_of_two() {
        let mut composition = Composition::new();
        composition.set_time_signature(7, 8).unwrap();

        let err = composition.set_time_signature(4, 6).unwrap_err();
        assert!(matches!(err, Error::InvalidTimeSignature { .. }));
        assert_eq!(composition.time_signature(), (7, 8));
    }

    #[test]
    fn test_invalid_time_signature_leaves_state() {
        let mut composition = Composition::new();
        composition.set_time_signature(6, 8).unwrap();
        assert!(composition.set_time_signature(4, 0).is_err());
        assert!(composition.set_time_signature(0, 8).is_err());
        assert_eq!(composition.time_signature(), (6, 8));
    }

    #[test]
    fn test_tempo_micros_conversion() {
        let mut composition = Composition::new();
        assert_eq!(composition.tempo_micros(), 500_000);
        composition.set_tempo(90).unwrap();
        assert_eq!(composition.tempo_micros(), 666_666);
    }

    #[test]
    fn test_set_mode() {
        let mut composition = Composition::new();
        composition.set_mode(KeyName::D, "dorian").unwrap();
        assert_eq!(composition.mode(), Some(Mode::Dorian));
        assert_eq!(composition.key_signature(), Key::major(KeyName::C));

        composition.set_mode(KeyName::A, "aeolian").unwrap();
        assert_eq!(composition.key_signature(), Key::minor(KeyName::A));

        let err = composition.set_mode(KeyName::C, "hypodorian").unwrap_err();
        assert!(matches!(err, Error::InvalidMode(_)));
        // Failed call leaves the previous mode and key in place
        assert_eq!(composition.mode(), Some(Mode::Aeolian));
        assert_eq!(
            composition.key_signature().mode(),
            KeyMode::Minor
        );
    }

    #[test]
    fn test_repeated_key_changes_store_one_value() {
        let mut composition = Composition::new();
        composition.set_key_signature(Key::major(KeyName::G));
        composition.set_key_signature(Key::minor(KeyName::E));
        composition.set_key_signature(Key::major(KeyName::BFlat));
        // Explicit field: the latest value is the only value
        assert_eq!(composition.key_signature(), Key::major(KeyName::BFlat));
    }
}
