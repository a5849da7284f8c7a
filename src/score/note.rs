//! Note event and score representation.
//!
//! A note event describes a single voice in musical (beat) time: pitch,
//! position, length, and loudness. Events arrive from external score
//! generators (hand-authored tables or composition agents) as JSON records
//! and are validated once at this boundary, so the mixing code downstream
//! can assume well-formed data.

use crate::error::SynthError;
use serde::{Deserialize, Serialize};

/// Default velocity applied when a note event omits the field.
pub const DEFAULT_VELOCITY: f64 = 1.0;

fn default_velocity() -> f64 {
    DEFAULT_VELOCITY
}

/// A single note event in beat time.
///
/// Events are immutable once validated; the engine never mutates
/// caller-supplied events.
///
/// # Examples
///
/// ```
/// use sinemix::score::NoteEvent;
///
/// // A4 quarter note at the start of the score, full volume
/// let note = NoteEvent::new(69, 0.0, 1.0);
/// assert!(note.validate(0).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// MIDI note number. Semantically 0-127; out-of-range values are
    /// clamped at frequency conversion rather than rejected.
    pub midi: i32,

    /// Start position in beats from the beginning of the score (>= 0).
    pub start_beat: f64,

    /// Duration in beats (> 0).
    pub duration_beats: f64,

    /// Linear amplitude scale in [0.0, 1.0]. Defaults to 1.0 when absent.
    #[serde(default = "default_velocity")]
    pub velocity: f64,
}

impl NoteEvent {
    /// Creates a note event at full velocity.
    pub fn new(midi: i32, start_beat: f64, duration_beats: f64) -> Self {
        Self {
            midi,
            start_beat,
            duration_beats,
            velocity: DEFAULT_VELOCITY,
        }
    }

    /// Returns a copy of this event with the given velocity.
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    /// Returns the end position in beats (start + duration).
    pub fn end_beat(&self) -> f64 {
        self.start_beat + self.duration_beats
    }

    /// Validates timing and velocity constraints.
    ///
    /// The pitch field is deliberately NOT range-checked here: out-of-range
    /// MIDI numbers are clamped to [0, 127] during frequency conversion.
    /// Velocity, by contrast, is strict. This asymmetry mirrors the original
    /// engine behavior and is documented, not a bug.
    ///
    /// # Arguments
    ///
    /// * `index` - Position of this event in the score, for error reporting
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidNote`] if `start_beat` is negative or
    /// non-finite, `duration_beats` is non-positive or non-finite, or
    /// `velocity` is outside [0.0, 1.0].
    pub fn validate(&self, index: usize) -> Result<(), SynthError> {
        if !self.start_beat.is_finite() || self.start_beat < 0.0 {
            return Err(SynthError::InvalidNote {
                index,
                reason: format!("start_beat must be >= 0, got {}", self.start_beat),
            });
        }
        if !self.duration_beats.is_finite() || self.duration_beats <= 0.0 {
            return Err(SynthError::InvalidNote {
                index,
                reason: format!("duration_beats must be > 0, got {}", self.duration_beats),
            });
        }
        if !self.velocity.is_finite() || !(0.0..=1.0).contains(&self.velocity) {
            return Err(SynthError::InvalidNote {
                index,
                reason: format!("velocity must be in [0.0, 1.0], got {}", self.velocity),
            });
        }
        Ok(())
    }
}

/// A complete score: an unordered collection of note events plus one tempo.
///
/// Note order is irrelevant for correctness; overlapping events are expected
/// and mix additively. A single tempo applies to the whole score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Tempo in beats per minute (> 0).
    pub tempo_bpm: f64,

    /// The note events making up the score.
    pub notes: Vec<NoteEvent>,
}

impl Score {
    /// Creates a score from a tempo and a list of events.
    pub fn new(tempo_bpm: f64, notes: Vec<NoteEvent>) -> Self {
        Self { tempo_bpm, notes }
    }

    /// Returns the end of the last note in beats, or 0.0 for an empty score.
    pub fn end_beat(&self) -> f64 {
        self.notes.iter().map(NoteEvent::end_beat).fold(0.0, f64::max)
    }

    /// Parses a score from its JSON representation.
    ///
    /// Missing required fields and non-numeric values are rejected by the
    /// deserializer; `velocity` is optional and defaults to 1.0. Range
    /// constraints are checked later by the engine, not here.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error on malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
