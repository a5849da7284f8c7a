//! Score data structures for representing musical input.
//!
//! This module provides the typed note-event and score structures consumed
//! by the synthesizer engine, plus note-name helpers for authoring scores
//! by hand.

mod demo;
mod note;

pub use demo::moonlight_sonata;
pub use note::{NoteEvent, Score, DEFAULT_VELOCITY};

/// Standard note names within an octave, indexed by pitch class.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Converts a MIDI note number to a human-readable note name with octave.
///
/// # Arguments
///
/// * `note` - MIDI note number (0-127)
///
/// # Examples
///
/// ```
/// use sinemix::score::note_to_name;
///
/// assert_eq!(note_to_name(60), "C4"); // Middle C
/// ```
pub fn note_to_name(note: u8) -> String {
    let octave = (note / 12) as i8 - 1; // MIDI octave convention
    let note_index = (note % 12) as usize;
    format!("{}{}", NOTE_NAMES[note_index], octave)
}

/// Converts a note name like "C4" or "F#5" to a MIDI note number.
///
/// Returns `None` if the name is malformed or out of MIDI range.
pub fn name_to_note(name: &str) -> Option<u8> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    // Find where the octave number starts
    let octave_start = name.chars().position(|c| c.is_ascii_digit() || c == '-')?;

    let note_part = &name[..octave_start];
    let octave_part = &name[octave_start..];

    let note_index = NOTE_NAMES.iter().position(|&n| n == note_part)?;
    let octave: i8 = octave_part.parse().ok()?;

    // MIDI note = (octave + 1) * 12 + pitch class
    let midi_note = (octave as i16 + 1) * 12 + note_index as i16;
    if (0..=127).contains(&midi_note) {
        Some(midi_note as u8)
    } else {
        None
    }
}

/// Converts beats to seconds at the given tempo.
///
/// # Arguments
///
/// * `beats` - Position or duration in beats
/// * `tempo_bpm` - Tempo in beats per minute
pub fn beats_to_seconds(beats: f64, tempo_bpm: f64) -> f64 {
    beats * 60.0 / tempo_bpm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_to_name() {
        assert_eq!(note_to_name(60), "C4");
        assert_eq!(note_to_name(69), "A4");
        assert_eq!(note_to_name(0), "C-1");
        assert_eq!(note_to_name(127), "G9");
    }

    #[test]
    fn test_name_to_note() {
        assert_eq!(name_to_note("C4"), Some(60));
        assert_eq!(name_to_note("A4"), Some(69));
        assert_eq!(name_to_note("C-1"), Some(0));
        assert_eq!(name_to_note("G9"), Some(127));
        assert_eq!(name_to_note("H4"), None);
        assert_eq!(name_to_note(""), None);
    }

    #[test]
    fn test_beats_to_seconds() {
        // At 120 BPM, one beat = 0.5 seconds
        assert!((beats_to_seconds(1.0, 120.0) - 0.5).abs() < 1e-9);
        assert!((beats_to_seconds(4.0, 60.0) - 4.0).abs() < 1e-9);
    }
}
