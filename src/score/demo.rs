//! Built-in demonstration score.
//!
//! Approximates the first movement (Adagio sostenuto) of Beethoven's Piano
//! Sonata No. 14 "Moonlight Sonata": the iconic C# minor triplet arpeggio in
//! the left hand under a simple descending melody line, repeated over 32
//! bars. Used by the renderer binary and as a realistic fixture in tests.

use super::{name_to_note, NoteEvent, Score};

const TEMPO_BPM: f64 = 54.0;
const TOTAL_BARS: u32 = 32;
const BEATS_PER_BAR: f64 = 4.0;
const TRIPLET_BEATS: f64 = 1.0 / 3.0;
const MELODY_SPAN_BEATS: f64 = 24.0;

// Left-hand arpeggio, rolled in succession: (note name, velocity).
const ARPEGGIO: [(&str, f64); 3] = [("C#2", 0.7), ("G#2", 0.8), ("C#3", 0.9)];

// Right-hand melody approximation, a descending line:
// (note name, start_beat, duration_beats, velocity).
const MELODY: [(&str, f64, f64, f64); 6] = [
    ("G#4", 0.0, 8.0, 0.5),
    ("F#4", 8.0, 4.0, 0.5),
    ("F4", 12.0, 2.0, 0.6),
    ("E4", 14.0, 2.0, 0.6),
    ("D#4", 16.0, 4.0, 0.4),
    ("C#4", 20.0, 4.0, 0.5),
];

/// Builds the Moonlight Sonata approximation score.
///
/// Pitches are authored as note names and resolved through
/// [`name_to_note`]; the result is deterministic and validates cleanly
/// against the engine's score rules.
pub fn moonlight_sonata() -> Score {
    let total_beats = TOTAL_BARS as f64 * BEATS_PER_BAR;
    let melody_repeats = (total_beats / MELODY_SPAN_BEATS) as u32;

    let mut notes = Vec::new();

    // Left hand: four staggered triplets per bar.
    for bar in 0..TOTAL_BARS {
        let base_beat = bar as f64 * BEATS_PER_BAR;
        for triplet in 0..4 {
            let t = base_beat + triplet as f64;
            for (i, (name, velocity)) in ARPEGGIO.iter().enumerate() {
                let Some(midi) = name_to_note(name) else {
                    continue;
                };
                notes.push(
                    NoteEvent::new(midi.into(), t + i as f64 * TRIPLET_BEATS, TRIPLET_BEATS)
                        .with_velocity(*velocity),
                );
            }
        }
    }

    // Right hand: repeat the melody pattern to fill the score.
    for repeat in 0..melody_repeats {
        let offset = repeat as f64 * MELODY_SPAN_BEATS;
        for (name, start, duration, velocity) in MELODY {
            let Some(midi) = name_to_note(name) else {
                continue;
            };
            notes.push(
                NoteEvent::new(midi.into(), start + offset, duration).with_velocity(velocity),
            );
        }
    }

    Score::new(TEMPO_BPM, notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_score_shape() {
        let score = moonlight_sonata();
        // 32 bars * 4 triplets * 3 arpeggio notes + 5 melody repeats * 6 notes;
        // an exact count also proves every note name resolved to a pitch.
        assert_eq!(score.notes.len(), 32 * 4 * 3 + 5 * 6);
        assert!(score.tempo_bpm > 0.0);
    }

    #[test]
    fn test_demo_pitches_resolve_from_names() {
        let score = moonlight_sonata();
        // First arpeggio roll: C#2, G#2, C#3
        let first: Vec<i32> = score.notes[..3].iter().map(|n| n.midi).collect();
        assert_eq!(first, vec![37, 44, 49]);
        // Melody notes follow the left hand; the line opens on G#4
        let melody_start = 32 * 4 * 3;
        assert_eq!(score.notes[melody_start].midi, 68);
    }

    #[test]
    fn test_demo_score_validates() {
        let score = moonlight_sonata();
        for (i, note) in score.notes.iter().enumerate() {
            note.validate(i).unwrap();
        }
    }

    #[test]
    fn test_demo_score_spans_all_bars() {
        let score = moonlight_sonata();
        assert!((score.end_beat() - 128.0).abs() < 1e-9);
    }
}
