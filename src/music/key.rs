// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Key signatures.
//!
//! A [`Key`] is a validated (pitch-class spelling, major/minor) pair.
//! The 19 legal spellings keep enharmonic duplicates distinct (C# and
//! Db are different spellings of the same pitch class), so a key
//! signature renders back exactly as it was written.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Pitch-class spellings accepted in a key signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyName {
    A,
    ASharp,
    AFlat,
    B,
    BFlat,
    C,
    CSharp,
    CFlat,
    D,
    DSharp,
    DFlat,
    E,
    EFlat,
    F,
    FSharp,
    FFlat,
    G,
    GSharp,
    GFlat,
}

impl KeyName {
    /// All legal spellings, in the order they are documented
    pub const ALL: [KeyName; 19] = [
        KeyName::A,
        KeyName::ASharp,
        KeyName::AFlat,
        KeyName::B,
        KeyName::BFlat,
        KeyName::C,
        KeyName::CSharp,
        KeyName::CFlat,
        KeyName::D,
        KeyName::DSharp,
        KeyName::DFlat,
        KeyName::E,
        KeyName::EFlat,
        KeyName::F,
        KeyName::FSharp,
        KeyName::FFlat,
        KeyName::G,
        KeyName::GSharp,
        KeyName::GFlat,
    ];

    /// Get the pitch class (0-11) for this spelling
    pub fn pitch_class(self) -> u8 {
        match self {
            KeyName::C => 0,
            KeyName::CSharp | KeyName::DFlat => 1,
            KeyName::D => 2,
            KeyName::DSharp | KeyName::EFlat => 3,
            KeyName::E | KeyName::FFlat => 4,
            KeyName::F => 5,
            KeyName::FSharp | KeyName::GFlat => 6,
            KeyName::G => 7,
            KeyName::GSharp | KeyName::AFlat => 8,
            KeyName::A => 9,
            KeyName::ASharp | KeyName::BFlat => 10,
            KeyName::B | KeyName::CFlat => 11,
        }
    }

    /// MIDI note number of this pitch class in octave 4 (C4 = 60)
    pub fn base_pitch(self) -> u8 {
        60 + self.pitch_class()
    }

    /// Whether this spelling uses a flat accidental
    pub fn is_flat(self) -> bool {
        matches!(
            self,
            KeyName::AFlat
                | KeyName::BFlat
                | KeyName::CFlat
                | KeyName::DFlat
                | KeyName::EFlat
                | KeyName::FFlat
                | KeyName::GFlat
        )
    }

    /// Spelling for a pitch class, preferring flats or sharps
    pub fn from_pitch_class(pc: u8, prefer_flats: bool) -> Self {
        const SHARPS: [KeyName; 12] = [
            KeyName::C,
            KeyName::CSharp,
            KeyName::D,
            KeyName::DSharp,
            KeyName::E,
            KeyName::F,
            KeyName::FSharp,
            KeyName::G,
            KeyName::GSharp,
            KeyName::A,
            KeyName::ASharp,
            KeyName::B,
        ];
        const FLATS: [KeyName; 12] = [
            KeyName::C,
            KeyName::DFlat,
            KeyName::D,
            KeyName::EFlat,
            KeyName::E,
            KeyName::F,
            KeyName::GFlat,
            KeyName::G,
            KeyName::AFlat,
            KeyName::A,
            KeyName::BFlat,
            KeyName::B,
        ];
        let table = if prefer_flats { FLATS } else { SHARPS };
        table[(pc % 12) as usize]
    }

    /// Parse a spelling from text (e.g., "C", "C#", "Bb")
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next()?.to_ascii_uppercase();
        let accidental = chars.next().map(|c| if c == 'B' { 'b' } else { c });
        if chars.next().is_some() {
            return None;
        }
        match (letter, accidental) {
            ('A', None) => Some(KeyName::A),
            ('A', Some('#')) => Some(KeyName::ASharp),
            ('A', Some('b')) => Some(KeyName::AFlat),
            ('B', None) => Some(KeyName::B),
            ('B', Some('b')) => Some(KeyName::BFlat),
            ('C', None) => Some(KeyName::C),
            ('C', Some('#')) => Some(KeyName::CSharp),
            ('C', Some('b')) => Some(KeyName::CFlat),
            ('D', None) => Some(KeyName::D),
            ('D', Some('#')) => Some(KeyName::DSharp),
            ('D', Some('b')) => Some(KeyName::DFlat),
            ('E', None) => Some(KeyName::E),
            ('E', Some('b')) => Some(KeyName::EFlat),
            ('F', None) => Some(KeyName::F),
            ('F', Some('#')) => Some(KeyName::FSharp),
            ('F', Some('b')) => Some(KeyName::FFlat),
            ('G', None) => Some(KeyName::G),
            ('G', Some('#')) => Some(KeyName::GSharp),
            ('G', Some('b')) => Some(KeyName::GFlat),
            _ => None,
        }
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KeyName::A => "A",
            KeyName::ASharp => "A#",
            KeyName::AFlat => "Ab",
            KeyName::B => "B",
            KeyName::BFlat => "Bb",
            KeyName::C => "C",
            KeyName::CSharp => "C#",
            KeyName::CFlat => "Cb",
            KeyName::D => "D",
            KeyName::DSharp => "D#",
            KeyName::DFlat => "Db",
            KeyName::E => "E",
            KeyName::EFlat => "Eb",
            KeyName::F => "F",
            KeyName::FSharp => "F#",
            KeyName::FFlat => "Fb",
            KeyName::G => "G",
            KeyName::GSharp => "G#",
            KeyName::GFlat => "Gb",
        };
        write!(f, "{}", s)
    }
}

/// Major/minor quality of a key signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    Major,
    Minor,
}

impl KeyMode {
    /// Parse from text ("major" or "minor", case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Some(KeyMode::Major),
            "minor" => Some(KeyMode::Minor),
            _ => None,
        }
    }
}

impl fmt::Display for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMode::Major => write!(f, "major"),
            KeyMode::Minor => write!(f, "minor"),
        }
    }
}

/// A validated key signature: one of 19 spellings x major/minor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    name: KeyName,
    mode: KeyMode,
}

impl Key {
    /// Create a key from typed parts
    pub fn new(name: KeyName, mode: KeyMode) -> Self {
        Self { name, mode }
    }

    /// Shorthand for a major key
    pub fn major(name: KeyName) -> Self {
        Self::new(name, KeyMode::Major)
    }

    /// Shorthand for a minor key
    pub fn minor(name: KeyName) -> Self {
        Self::new(name, KeyMode::Minor)
    }

    /// Create a key from text parts, e.g. ("C#", "minor").
    ///
    /// Fails with [`Error::InvalidKey`] when either part falls outside
    /// the legal enumeration; the error message lists the allowed names.
    pub fn from_parts(name: &str, mode: &str) -> Result<Self> {
        let invalid = || Error::InvalidKey {
            name: name.to_string(),
            mode: mode.to_string(),
            valid: valid_names(),
        };
        let name = KeyName::parse(name).ok_or_else(invalid)?;
        let mode = KeyMode::parse(mode).ok_or_else(invalid)?;
        Ok(Self::new(name, mode))
    }

    /// Parse the canonical text form: "C", "C#m", "Bb", "Ebm"
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.strip_suffix('m') {
            Some(base) if KeyName::parse(base).is_some() => Self::from_parts(base, "minor"),
            _ => Self::from_parts(s, "major"),
        }
    }

    /// All 38 legal keys
    pub fn all() -> impl Iterator<Item = Key> {
        KeyName::ALL.iter().flat_map(|&name| {
            [KeyMode::Major, KeyMode::Minor]
                .into_iter()
                .map(move |mode| Key::new(name, mode))
        })
    }

    /// The pitch-class spelling
    pub fn name(&self) -> KeyName {
        self.name
    }

    /// Major or minor
    pub fn mode(&self) -> KeyMode {
        self.mode
    }

    /// Accidental count on the circle of fifths (-7..=7).
    ///
    /// Positive is sharps, negative is flats. Theoretical keys with no
    /// standard signature (D# major, Fb major, ...) fold onto their
    /// enharmonic equivalent.
    pub fn flats_sharps(&self) -> i8 {
        let tonic_pc = match self.mode {
            KeyMode::Major => self.name.pitch_class(),
            // relative major sits three semitones up
            KeyMode::Minor => (self.name.pitch_class() + 3) % 12,
        };
        let mut count = ((tonic_pc as i16 * 7) % 12) as i8;
        if count > 6 {
            count -= 12;
        }
        if count == 6 && self.name.is_flat() {
            count = -6;
        }
        count
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            KeyMode::Major => write!(f, "{}", self.name),
            KeyMode::Minor => write!(f, "{}m", self.name),
        }
    }
}

fn valid_names() -> String {
    let names: Vec<String> = KeyName::ALL.iter().map(|n| n.to_string()).collect();
    names.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keys_construct_and_render() {
        let keys: Vec<Key> = Key::all().collect();
        assert_eq!(keys.len(), 38);

        for key in keys {
            let rendered = key.to_string();
            match key.mode() {
                KeyMode::Major => assert!(!rendered.ends_with('m')),
                KeyMode::Minor => assert!(rendered.ends_with('m')),
            }
            // Round trip through the text constructor
            let reparsed = Key::from_parts(&key.name().to_string(), &key.mode().to_string())
                .expect("every enumerated key parses");
            assert_eq!(reparsed, key);
        }
    }

    #[test]
    fn test_canonical_rendering() {
        assert_eq!(Key::major(KeyName::C).to_string(), "C");
        assert_eq!(Key::minor(KeyName::CSharp).to_string(), "C#m");
        assert_eq!(Key::major(KeyName::BFlat).to_string(), "Bb");
        assert_eq!(Key::minor(KeyName::EFlat).to_string(), "Ebm");
    }

    #[test]
    fn test_invalid_keys_rejected() {
        for (name, mode) in [
            ("H", "major"),
            ("C##", "major"),
            ("Cx", "minor"),
            ("C", "dorian"),
            ("", "major"),
            ("C", ""),
        ] {
            let err = Key::from_parts(name, mode).unwrap_err();
            assert!(matches!(err, Error::InvalidKey { .. }));
            // The message lists the allowed set
            assert!(err.to_string().contains("valid names are"));
        }
    }

    #[test]
    fn test_parse_canonical_text() {
        assert_eq!(Key::parse("C").unwrap(), Key::major(KeyName::C));
        assert_eq!(Key::parse("C#m").unwrap(), Key::minor(KeyName::CSharp));
        // A bare flat spelling is major, not a truncated minor
        assert_eq!(Key::parse("Ab").unwrap(), Key::major(KeyName::AFlat));
        assert_eq!(Key::parse("Abm").unwrap(), Key::minor(KeyName::AFlat));
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Key::major(KeyName::C), Key::major(KeyName::C));
        assert_ne!(Key::major(KeyName::C), Key::minor(KeyName::C));
        // Enharmonic spellings are distinct keys
        assert_ne!(Key::major(KeyName::CSharp), Key::major(KeyName::DFlat));
    }

    #[test]
    fn test_flats_sharps() {
        assert_eq!(Key::major(KeyName::C).flats_sharps(), 0);
        assert_eq!(Key::major(KeyName::G).flats_sharps(), 1);
        assert_eq!(Key::major(KeyName::D).flats_sharps(), 2);
        assert_eq!(Key::major(KeyName::F).flats_sharps(), -1);
        assert_eq!(Key::major(KeyName::BFlat).flats_sharps(), -2);
        assert_eq!(Key::major(KeyName::GFlat).flats_sharps(), -6);
        assert_eq!(Key::major(KeyName::FSharp).flats_sharps(), 6);
        assert_eq!(Key::minor(KeyName::A).flats_sharps(), 0);
        assert_eq!(Key::minor(KeyName::E).flats_sharps(), 1);
        assert_eq!(Key::minor(KeyName::C).flats_sharps(), -3);
        // Theoretical key folds enharmonically (D# major -> Eb major)
        assert_eq!(Key::major(KeyName::DSharp).flats_sharps(), -3);
    }

    #[test]
    fn test_base_pitch() {
        assert_eq!(KeyName::C.base_pitch(), 60);
        assert_eq!(KeyName::A.base_pitch(), 69);
        assert_eq!(KeyName::B.base_pitch(), 71);
        assert_eq!(KeyName::BFlat.base_pitch(), 70);
    }
}
