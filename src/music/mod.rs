// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory vocabulary.
//!
//! This module provides the validated building blocks a composition is
//! assembled from: key signatures, diatonic modes, notes, and chords.

pub mod chord;
pub mod key;
pub mod note;
pub mod scale;

pub use chord::{Arpeggio, Chord, ChordProgression};
pub use key::{Key, KeyMode, KeyName};
pub use note::{quantize, Note, MAX_MIDI_TICKS};
pub use scale::{relative_key, Mode, Scale};
