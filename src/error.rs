//! Error types for synthesis and WAV export.
//!
//! All failures are surfaced synchronously through [`SynthError`]; the engine
//! never retries internally. Recoverable conditions (out-of-range MIDI pitch,
//! notes starting past the end of the timeline, degenerate note lengths) are
//! clamped or skipped rather than reported; see the engine documentation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the synthesizer engine and the WAV exporter.
#[derive(Debug, Error)]
pub enum SynthError {
    /// The engine was constructed with a zero sample rate.
    #[error("sample rate must be positive, got {0}")]
    InvalidSampleRate(u32),

    /// The score tempo is zero, negative, or not finite.
    #[error("tempo_bpm must be a positive finite number, got {0}")]
    InvalidTempo(f64),

    /// A note event failed validation.
    #[error("invalid note at index {index}: {reason}")]
    InvalidNote {
        /// Position of the offending note in the input list.
        index: usize,
        /// Human-readable description of the violated constraint.
        reason: String,
    },

    /// The score would exceed the maximum total sample budget.
    #[error("score too long: {samples} samples exceeds limit of {limit}")]
    ScoreTooLong {
        /// Number of samples the score would require.
        samples: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// An empty sample buffer was passed to the exporter.
    #[error("no samples to export")]
    EmptyBuffer,

    /// Every sample in the buffer is exactly zero.
    #[error("all samples are zero (silent buffer)")]
    SilentBuffer,

    /// The output directory does not exist.
    ///
    /// Distinguished from [`SynthError::Io`] so callers can create the
    /// directory and retry.
    #[error("output directory does not exist: {0}")]
    DirectoryMissing(PathBuf),

    /// Any other OS-level failure while writing the WAV file.
    #[error("failed to write WAV file {path}: {source}")]
    Io {
        /// Path of the file being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SynthError>;
