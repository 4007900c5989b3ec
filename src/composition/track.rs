// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! A single track: an ordered, append-only sequence of events.
//!
//! Tracks never reorder or deduplicate. The note-level helpers expand
//! notes and chords into note-on/note-off pairs on the track's channel.

use serde::{Deserialize, Serialize};

use super::event::TrackEvent;
use crate::music::{Arpeggio, Chord, Note};

/// An independently timed sequence of musical events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    events: Vec<TrackEvent>,
    channel: u8,
}

impl Track {
    /// Create an empty track on channel 0
    pub fn new() -> Self {
        Self::default()
    }

    /// MIDI channel used by the note helpers
    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Route the note helpers to a channel (0-15)
    pub fn set_channel(&mut self, channel: u8) {
        self.channel = channel.min(15);
    }

    /// Append an event verbatim
    pub fn push_event(&mut self, event: TrackEvent) {
        self.events.push(event);
    }

    /// The finalized event sequence, in insertion order
    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }

    /// Number of events on the track
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the track has no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append a note as a note-on/note-off pair
    pub fn add_note(&mut self, note: &Note) {
        self.push_event(TrackEvent::note_on(
            note.time,
            self.channel,
            note.pitch,
            note.velocity,
        ));
        self.push_event(TrackEvent::note_off(
            note.duration,
            self.channel,
            note.pitch,
            note.velocity,
        ));
    }

    /// Append a chord: all note-ons together, then all note-offs.
    ///
    /// The first note-on carries the chord's start delta and the first
    /// note-off its duration; the rest are simultaneous (delta 0).
    pub fn add_chord(&mut self, chord: &Chord) {
        let start = chord.start_time();
        let duration = chord.duration();
        for (i, note) in chord.notes().iter().enumerate() {
            let delta = if i == 0 { start } else { 0 };
            self.push_event(TrackEvent::note_on(
                delta,
                self.channel,
                note.pitch,
                note.velocity,
            ));
        }
        for (i, note) in chord.notes().iter().enumerate() {
            let delta = if i == 0 { duration } else { 0 };
            self.push_event(TrackEvent::note_off(
                delta,
                self.channel,
                note.pitch,
                note.velocity,
            ));
        }
    }

    /// Append an arpeggio: each note sounds in sequence
    pub fn add_arpeggio(&mut self, arpeggio: &Arpeggio) {
        for note in arpeggio.notes() {
            self.add_note(note);
        }
    }

    /// Append a program change
    pub fn add_program_change(&mut self, channel: u8, program: u8) {
        self.push_event(TrackEvent::program_change(0, channel, program));
    }

    /// Append a control change
    pub fn add_control_change(&mut self, channel: u8, control: u8, value: u8) {
        self.push_event(TrackEvent::control_change(0, channel, control, value));
    }

    /// Append a pitch bend (relative to center)
    pub fn add_pitch_bend(&mut self, channel: u8, bend: i16) {
        self.push_event(TrackEvent::pitch_bend(0, channel, bend));
    }
}
