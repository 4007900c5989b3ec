// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Modes and scale generation.
//!
//! [`Mode`] covers the seven diatonic modes accepted by
//! [`Composition::set_mode`](crate::Composition::set_mode).
//! [`relative_key`] resolves a root plus mode to the concrete key
//! signature that carries its accidentals: the parent major key whose
//! scale the mode is rooted in (D dorian resolves to C major), except
//! aeolian, which resolves to the minor key on the root itself.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::key::{Key, KeyName};
use crate::error::{Error, Result};

/// The seven diatonic modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Major, // Ionian
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian, // Natural minor
    Locrian,
}

impl Mode {
    /// All modes, in scale-degree order
    pub const ALL: [Mode; 7] = [
        Mode::Major,
        Mode::Dorian,
        Mode::Phrygian,
        Mode::Lydian,
        Mode::Mixolydian,
        Mode::Aeolian,
        Mode::Locrian,
    ];

    /// Parse a mode from text, failing with [`Error::InvalidMode`]
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" | "ionian" => Ok(Mode::Major),
            "dorian" => Ok(Mode::Dorian),
            "phrygian" => Ok(Mode::Phrygian),
            "lydian" => Ok(Mode::Lydian),
            "mixolydian" => Ok(Mode::Mixolydian),
            "aeolian" | "minor" => Ok(Mode::Aeolian),
            "locrian" => Ok(Mode::Locrian),
            _ => Err(Error::InvalidMode(s.to_string())),
        }
    }

    /// Semitones from the parent major tonic up to this mode's root
    pub fn degree_offset(self) -> u8 {
        match self {
            Mode::Major => 0,
            Mode::Dorian => 2,
            Mode::Phrygian => 4,
            Mode::Lydian => 5,
            Mode::Mixolydian => 7,
            Mode::Aeolian => 9,
            Mode::Locrian => 11,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Major => "major",
            Mode::Dorian => "dorian",
            Mode::Phrygian => "phrygian",
            Mode::Lydian => "lydian",
            Mode::Mixolydian => "mixolydian",
            Mode::Aeolian => "aeolian",
            Mode::Locrian => "locrian",
        };
        write!(f, "{}", s)
    }
}

/// Resolve a root and mode to the key signature carrying its accidentals
pub fn relative_key(root: KeyName, mode: Mode) -> Key {
    match mode {
        Mode::Major => Key::major(root),
        Mode::Aeolian => Key::minor(root),
        _ => {
            let parent_pc = (root.pitch_class() + 12 - mode.degree_offset()) % 12;
            Key::major(KeyName::from_pitch_class(parent_pc, root.is_flat()))
        }
    }
}

/// Ascending scale generation over MIDI pitches
pub struct Scale;

impl Scale {
    /// Whole/half step pattern of the major scale (W W H W W W H)
    pub const MAJOR_INTERVALS: [u8; 7] = [2, 2, 1, 2, 2, 2, 1];
    /// Whole/half step pattern of the natural minor scale (W H W W H W W)
    pub const MINOR_INTERVALS: [u8; 7] = [2, 1, 2, 2, 1, 2, 2];

    /// Eight-note major scale starting at `root`
    pub fn major(root: u8) -> Vec<u8> {
        Self::generate(root, &Self::MAJOR_INTERVALS)
    }

    /// Eight-note natural minor scale starting at `root`
    pub fn minor(root: u8) -> Vec<u8> {
        Self::generate(root, &Self::MINOR_INTERVALS)
    }

    fn generate(root: u8, intervals: &[u8]) -> Vec<u8> {
        let mut scale = vec![root];
        for &interval in intervals {
            let last = *scale.last().unwrap_or(&root);
            scale.push(last.saturating_add(interval));
        }
        scale
    }
}
