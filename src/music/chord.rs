// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chords, arpeggios, and progressions.
//!
//! A [`Chord`] sounds its notes together; an [`Arpeggio`] sounds them in
//! sequence. Quality constructors stack intervals on a root note.

use serde::{Deserialize, Serialize};

use super::note::Note;
use crate::error::Result;

/// A set of notes sounded together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    notes: Vec<Note>,
}

impl Chord {
    /// Create a chord from notes; the first note is the root
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    fn from_intervals(root: Note, intervals: &[i8]) -> Result<Self> {
        let mut notes = vec![root];
        for &semitones in intervals {
            notes.push(root.transposed(semitones)?);
        }
        Ok(Self { notes })
    }

    /// Root, major third, perfect fifth
    pub fn major_triad(root: Note) -> Result<Self> {
        Self::from_intervals(root, &[4, 7])
    }

    /// Root, minor third, perfect fifth
    pub fn minor_triad(root: Note) -> Result<Self> {
        Self::from_intervals(root, &[3, 7])
    }

    /// Major triad plus minor seventh
    pub fn dominant_seventh(root: Note) -> Result<Self> {
        Self::from_intervals(root, &[4, 7, 10])
    }

    /// Major triad plus major seventh
    pub fn major_seventh(root: Note) -> Result<Self> {
        Self::from_intervals(root, &[4, 7, 11])
    }

    /// Minor triad plus minor seventh
    pub fn minor_seventh(root: Note) -> Result<Self> {
        Self::from_intervals(root, &[3, 7, 10])
    }

    /// Minor third, diminished fifth, minor seventh
    pub fn half_diminished_seventh(root: Note) -> Result<Self> {
        Self::from_intervals(root, &[3, 6, 10])
    }

    /// Minor third, diminished fifth, diminished seventh
    pub fn diminished_seventh(root: Note) -> Result<Self> {
        Self::from_intervals(root, &[3, 6, 9])
    }

    /// Major seventh plus major ninth
    pub fn major_ninth(root: Note) -> Result<Self> {
        Self::from_intervals(root, &[4, 7, 11, 14])
    }

    /// Minor seventh plus major ninth
    pub fn minor_ninth(root: Note) -> Result<Self> {
        Self::from_intervals(root, &[3, 7, 10, 14])
    }

    /// Dominant seventh plus major ninth
    pub fn dominant_ninth(root: Note) -> Result<Self> {
        Self::from_intervals(root, &[4, 7, 10, 14])
    }

    /// Add a note to the chord
    pub fn add_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// The chord's notes, root first
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The root note, if the chord is non-empty
    pub fn root(&self) -> Option<&Note> {
        self.notes.first()
    }

    /// Earliest start delta among the notes
    pub fn start_time(&self) -> u32 {
        self.notes.iter().map(|n| n.time).min().unwrap_or(0)
    }

    /// Duration of the longest note
    pub fn duration(&self) -> u32 {
        self.notes.iter().map(|n| n.duration).max().unwrap_or(0)
    }
}

/// A set of notes sounded one after another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arpeggio {
    notes: Vec<Note>,
}

impl Arpeggio {
    /// Create an arpeggio from notes in playing order
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// A chord's notes played in sequence, each offset by `step` ticks
    pub fn from_chord(chord: &Chord, step: u32) -> Self {
        let notes = chord
            .notes()
            .iter()
            .enumerate()
            .map(|(i, n)| Note {
                time: if i == 0 { n.time } else { step },
                ..*n
            })
            .collect();
        Self { notes }
    }

    /// The notes in playing order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

/// An ordered sequence of chords
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordProgression {
    chords: Vec<Chord>,
}

impl ChordProgression {
    /// Create a progression from chords in playing order
    pub fn new(chords: Vec<Chord>) -> Self {
        Self { chords }
    }

    /// Append a chord
    pub fn add_chord(&mut self, chord: Chord) {
        self.chords.push(chord);
    }

    /// The chords in playing order
    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    /// Total duration: the sum of the chord durations
    pub fn duration(&self) -> u32 {
        self.chords.iter().map(|c| c.duration()).sum()
    }
}
