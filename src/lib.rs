//! sinemix - a polyphonic additive sine-wave synthesizer.
//!
//! This library converts a symbolic score (timed note events plus a tempo)
//! into a single mixed mono PCM buffer and serializes it to an uncompressed
//! 16-bit WAV file.

pub mod audio;
pub mod error;
pub mod score;

// Re-export commonly used types
pub use audio::{midi_to_freq, write_wav, SynthConfig, Synthesizer, DEFAULT_SAMPLE_RATE};
pub use error::SynthError;
pub use score::{NoteEvent, Score};
