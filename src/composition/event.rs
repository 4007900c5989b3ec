// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Delta-timed track events.
//!
//! Events keep their insertion order; because timing is delta-based,
//! order is meaning. The meta variants exist so the writer can express
//! composition metadata in the same event stream at flatten time.

use serde::{Deserialize, Serialize};

use crate::music::Key;

/// A single event on a track, `delta` ticks after the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackEvent {
    /// Delta ticks before this event
    pub delta: u32,
    /// What happens
    pub kind: EventKind,
}

/// Event payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    NoteOn { channel: u8, pitch: u8, velocity: u8 },
    NoteOff { channel: u8, pitch: u8, velocity: u8 },
    ProgramChange { channel: u8, program: u8 },
    ControlChange { channel: u8, control: u8, value: u8 },
    /// Bend relative to center, -8192..=8191
    PitchBend { channel: u8, bend: i16 },
    Meta(MetaEvent),
}

/// Non-sounding metadata events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetaEvent {
    /// Tempo in microseconds per quarter note
    Tempo { micros_per_beat: u32 },
    TimeSignature { numerator: u8, denominator: u8 },
    KeySignature(Key),
}

impl TrackEvent {
    pub fn note_on(delta: u32, channel: u8, pitch: u8, velocity: u8) -> Self {
        Self {
            delta,
            kind: EventKind::NoteOn {
                channel,
                pitch,
                velocity,
            },
        }
    }

    pub fn note_off(delta: u32, channel: u8, pitch: u8, velocity: u8) -> Self {
        Self {
            delta,
            kind: EventKind::NoteOff {
                channel,
                pitch,
                velocity,
            },
        }
    }

    pub fn program_change(delta: u32, channel: u8, program: u8) -> Self {
        Self {
            delta,
            kind: EventKind::ProgramChange { channel, program },
        }
    }

    pub fn control_change(delta: u32, channel: u8, control: u8, value: u8) -> Self {
        Self {
            delta,
            kind: EventKind::ControlChange {
                channel,
                control,
                value,
            },
        }
    }

    pub fn pitch_bend(delta: u32, channel: u8, bend: i16) -> Self {
        Self {
            delta,
            kind: EventKind::PitchBend { channel, bend },
        }
    }

    pub fn meta(delta: u32, meta: MetaEvent) -> Self {
        Self {
            delta,
            kind: EventKind::Meta(meta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let on = TrackEvent::note_on(0, 1, 60, 100);
        assert_eq!(
            on.kind,
            EventKind::NoteOn {
                channel: 1,
                pitch: 60,
                velocity: 100
            }
        );

        let bend = TrackEvent::pitch_bend(24, 0, -512);
        assert_eq!(bend.delta, 24);
        assert_eq!(
            bend.kind,
            EventKind::PitchBend {
                channel: 0,
                bend: -512
            }
        );
    }
}
