// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Validated note values and tick helpers.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest delta-time value a track event can carry (28-bit VLQ)
pub const MAX_MIDI_TICKS: u32 = 0x0FFF_FFFF;

/// A single note: pitch, velocity, and delta-based timing.
///
/// `time` is the tick delta before the note sounds; `duration` is the
/// tick gap between note-on and note-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// MIDI pitch (0-127)
    pub pitch: u8,
    /// Velocity (0-127)
    pub velocity: u8,
    /// Duration in ticks
    pub duration: u32,
    /// Delta ticks before note-on
    pub time: u32,
}

impl Note {
    /// Create a note, validating pitch and velocity against the MIDI range
    pub fn new(pitch: u8, velocity: u8, duration: u32, time: u32) -> Result<Self> {
        if pitch > 127 || velocity > 127 {
            return Err(Error::InvalidNote {
                pitch: pitch as i16,
                velocity: velocity as i16,
            });
        }
        Ok(Self {
            pitch,
            velocity,
            duration,
            time,
        })
    }

    /// The same note shifted by `semitones`, failing if it leaves 0-127
    pub fn transposed(&self, semitones: i8) -> Result<Self> {
        let pitch = self.pitch as i16 + semitones as i16;
        if !(0..=127).contains(&pitch) {
            return Err(Error::InvalidNote {
                pitch,
                velocity: self.velocity as i16,
            });
        }
        Ok(Self {
            pitch: pitch as u8,
            ..*self
        })
    }
}

/// Round a tick value to the nearest multiple of `grid`, capped at
/// [`MAX_MIDI_TICKS`]. A zero grid leaves the value untouched.
pub fn quantize(time: u32, grid: u32) -> u32 {
    if grid == 0 {
        return time;
    }
    let rounded = ((time as u64 + grid as u64 / 2) / grid as u64) * grid as u64;
    rounded.min(MAX_MIDI_TICKS as u64) as u32
}
