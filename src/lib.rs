// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! songsmith - programmatic MIDI composition.
//!
//! Build a multi-track [`Composition`] (tempo, time signature, key
//! signature, per-track note and meta events) and serialize it to a
//! Standard MIDI File.
//!
//! ```no_run
//! use songsmith::{Composition, Note};
//!
//! let mut composition = Composition::new();
//! composition.set_tempo(96).unwrap();
//! let note = Note::new(60, 64, 480, 0).unwrap();
//! composition.add_note(&note).unwrap();
//! composition.save("sketch.mid").unwrap();
//! ```

pub mod composition;
pub mod config;
pub mod error;
pub mod export;
pub mod music;

pub use composition::{Composition, EventKind, MetaEvent, Track, TrackEvent};
pub use config::CompositionConfig;
pub use error::{Error, Result};
pub use music::{
    quantize, relative_key, Arpeggio, Chord, ChordProgression, Key, KeyMode, KeyName, Mode, Note,
    Scale, MAX_MIDI_TICKS,
};
