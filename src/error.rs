// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for composition building and file output.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a composition or writing it to disk.
///
/// Validation errors are fail-fast: a rejected call leaves the
/// composition exactly as it was. Save errors wrap the underlying
/// I/O cause together with the path that was attempted.
#[derive(Debug, Error)]
pub enum Error {
    /// Key name/mode pair outside the 38 legal combinations
    #[error("invalid key '{name}' ({mode}): valid names are {valid}, in major or minor")]
    InvalidKey {
        name: String,
        mode: String,
        valid: String,
    },

    /// Mode outside the seven diatonic modes
    #[error("invalid mode '{0}': valid modes are major, dorian, phrygian, lydian, mixolydian, aeolian, locrian")]
    InvalidMode(String),

    /// Tempo outside the range the file format can encode
    #[error("invalid tempo {0}: tempo must be between 4 and 60000000 beats per minute")]
    InvalidTempo(u32),

    /// Time signature the file format cannot encode
    #[error("invalid time signature {numerator}/{denominator}: numerator must be positive and denominator a positive power of two")]
    InvalidTimeSignature { numerator: u32, denominator: u32 },

    /// Note pitch or velocity outside the 0-127 MIDI range
    #[error("invalid note: pitch {pitch} and velocity {velocity} must both be 0-127")]
    InvalidNote { pitch: i16, velocity: i16 },

    /// Guarded precondition: a composition always owns at least one track
    #[error("no tracks available in the composition")]
    NoTracks,

    /// Active-track index past the end of the track list
    #[error("track index {index} out of range: composition has {count} track(s)")]
    TrackIndexOutOfRange { index: usize, count: usize },

    /// Any filesystem failure while writing the output file
    #[error("cannot save file '{}'", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
