//! Audio synthesis and serialization.
//!
//! This module provides the additive synthesis engine and the WAV exporter.
//! The engine turns note events into a mixed float sample buffer; the
//! exporter normalizes, quantizes, and writes that buffer to disk.

pub mod engine;
pub mod export;

pub use engine::{midi_to_freq, SynthConfig, Synthesizer, DEFAULT_SAMPLE_RATE, MIN_SAMPLE_RATE};
pub use export::write_wav;

use crate::error::Result;
use std::path::{Path, PathBuf};

impl Synthesizer {
    /// Saves a sample buffer as a WAV file in the current working directory.
    ///
    /// Convenience wrapper over [`write_wav`] at the engine's sample rate.
    /// The filename is reduced to its base name; see [`write_wav`] for the
    /// full contract and error conditions.
    pub fn save_to_wav(&self, samples: &[f32], filename: &str) -> Result<PathBuf> {
        self.save_to_wav_in(samples, ".", filename)
    }

    /// Saves a sample buffer as a WAV file in an explicit output directory.
    pub fn save_to_wav_in(
        &self,
        samples: &[f32],
        dir: impl AsRef<Path>,
        filename: &str,
    ) -> Result<PathBuf> {
        write_wav(samples, self.sample_rate(), dir, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthError;
    use crate::score::NoteEvent;

    #[test]
    fn test_synthesize_then_save_round_trip() {
        let dir = std::env::temp_dir().join("sinemix_audio_tests");
        std::fs::create_dir_all(&dir).unwrap();

        let synth = Synthesizer::new(8_000).unwrap();
        let notes = [
            NoteEvent::new(60, 0.0, 1.0).with_velocity(0.9),
            NoteEvent::new(64, 1.0, 1.0).with_velocity(0.9),
            NoteEvent::new(67, 2.0, 2.0),
        ];
        let buffer = synth.synthesize_polyphonic(&notes, 120.0).unwrap();
        let path = synth.save_to_wav_in(&buffer, &dir, "triad.wav").unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 8_000);
        assert_eq!(reader.duration() as usize, buffer.len());
    }

    #[test]
    fn test_empty_score_buffer_rejected_at_export() {
        let synth = Synthesizer::new(44_100).unwrap();
        let buffer = synth.synthesize_polyphonic(&[], 120.0).unwrap();
        assert!(buffer.is_empty());
        assert!(matches!(
            synth.save_to_wav(&buffer, "nothing.wav"),
            Err(SynthError::EmptyBuffer)
        ));
    }
}
