//! Polyphonic additive synthesis engine.
//!
//! Converts validated note events into a single mixed mono sample buffer.
//! All operations are pure CPU-bound transformations: the engine holds only
//! its configuration and no mutable state, so separate calls (and separate
//! instances) may run concurrently without synchronization.

use crate::error::{Result, SynthError};
use crate::score::{beats_to_seconds, NoteEvent};

/// Default sample rate for synthesis (44.1 kHz standard).
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Lowest accepted sample rate; lower values are floor-clamped here to
/// prevent degenerate audio.
pub const MIN_SAMPLE_RATE: u32 = 8_000;

/// Configuration for a [`Synthesizer`].
///
/// The envelope windows and sample caps are plain fields rather than
/// hard-coded constants so tests can construct an engine with tiny caps to
/// exercise the budget-exceeded paths cheaply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    /// Samples per second. Clamped up to [`MIN_SAMPLE_RATE`] at construction.
    pub sample_rate: u32,
    /// Linear attack ramp length in seconds (minimum one sample).
    pub attack_sec: f64,
    /// Linear release ramp length in seconds (minimum one sample).
    pub release_sec: f64,
    /// Trailing silence appended after the last note ends.
    pub padding_sec: f64,
    /// Longest allowed single note; longer notes are clamped, not rejected.
    pub max_note_sec: f64,
    /// Longest allowed total timeline; longer scores are clamped to this.
    pub max_total_sec: f64,
    /// Hard cap on samples generated for one note.
    pub max_note_samples: usize,
    /// Hard cap on the mixed timeline length; exceeding it is an error.
    pub max_total_samples: usize,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            attack_sec: 0.005,
            release_sec: 0.1,
            padding_sec: 0.1,
            max_note_sec: 60.0,
            max_total_sec: 600.0,
            max_note_samples: 10_000_000,
            max_total_samples: 100_000_000,
        }
    }
}

/// Converts a MIDI note number to its frequency in Hz (A4 = 69 = 440 Hz).
///
/// Out-of-range input is clamped to [0, 127] silently; this never errors.
/// Standard 12-tone equal temperament.
///
/// # Examples
///
/// ```
/// use sinemix::audio::midi_to_freq;
///
/// assert_eq!(midi_to_freq(69), 440.0);
/// ```
pub fn midi_to_freq(midi_note: i32) -> f64 {
    let note = midi_note.clamp(0, 127);
    440.0 * 2.0_f64.powf((note - 69) as f64 / 12.0)
}

/// The additive synthesis engine.
///
/// Owns the sample-rate configuration and nothing else; it is stateless
/// between calls and safe to share across threads.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    config: SynthConfig,
}

impl Synthesizer {
    /// Creates a synthesizer at the given sample rate with default limits.
    ///
    /// Sample rates below [`MIN_SAMPLE_RATE`] are raised to the minimum.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidSampleRate`] if `sample_rate` is zero.
    pub fn new(sample_rate: u32) -> Result<Self> {
        Self::with_config(SynthConfig {
            sample_rate,
            ..SynthConfig::default()
        })
    }

    /// Creates a synthesizer with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidSampleRate`] if the configured sample
    /// rate is zero.
    pub fn with_config(config: SynthConfig) -> Result<Self> {
        if config.sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate(0));
        }
        let config = SynthConfig {
            sample_rate: config.sample_rate.max(MIN_SAMPLE_RATE),
            ..config
        };
        Ok(Self { config })
    }

    /// Returns the configured sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    /// Returns the full configuration.
    pub fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Generates the enveloped samples for a single note.
    ///
    /// The waveform is a pure sine at `freq` with phase starting at 0,
    /// shaped by a linear attack ramp and a linear release ramp; the middle
    /// portion sustains at full envelope. Notes shorter than attack +
    /// release still get some shaping: the two windows are computed
    /// independently against the note's own length, and the release ramp
    /// wins where they overlap.
    ///
    /// # Arguments
    ///
    /// * `freq` - Frequency in Hz
    /// * `duration_sec` - Note length in seconds, clamped to the per-note
    ///   maximum; zero or negative yields an empty buffer
    /// * `volume` - Linear amplitude multiplier
    ///
    /// # Returns
    ///
    /// Samples clipped per-sample to [-1.0, 1.0]. The sample count is
    /// `round(duration_sec * sample_rate)`, capped at the per-note limit.
    pub fn generate_note(&self, freq: f64, duration_sec: f64, volume: f64) -> Vec<f32> {
        let rate = self.config.sample_rate as f64;
        let duration = duration_sec.min(self.config.max_note_sec);
        if duration <= 0.0 {
            return Vec::new();
        }
        let num_samples = ((duration * rate).round() as usize).min(self.config.max_note_samples);
        if num_samples == 0 {
            return Vec::new();
        }

        let attack_samples = ((self.config.attack_sec * rate) as usize).max(1);
        let release_samples = ((self.config.release_sec * rate) as usize).max(1);
        let attack_end = attack_samples.min(num_samples);
        let release_start = num_samples.saturating_sub(release_samples);

        let omega = 2.0 * std::f64::consts::PI * freq / rate;
        let mut samples = Vec::with_capacity(num_samples);
        for i in 0..num_samples {
            let envelope = if i >= release_start {
                // Release takes precedence over attack for very short notes.
                (release_samples - (i - release_start)) as f64 / release_samples as f64
            } else if i < attack_end {
                i as f64 / attack_end as f64
            } else {
                1.0
            };
            let value = volume * envelope * (omega * i as f64).sin();
            samples.push(value.clamp(-1.0, 1.0) as f32);
        }
        samples
    }

    /// Mixes a list of note events into one mono timeline.
    ///
    /// Each note is rendered through [`Synthesizer::generate_note`] and
    /// added (not overwritten) into a shared buffer at its start offset, so
    /// overlapping voices accumulate. No gain compensation is applied for
    /// simultaneous voices; clipping happens only at export.
    ///
    /// Leniency rules, by design: out-of-range pitch is clamped, and notes
    /// whose start index lands at or past the end of the timeline are
    /// silently skipped. Strict rules: tempo, timing, and velocity are
    /// validated up front and no partial buffer is ever returned.
    ///
    /// # Arguments
    ///
    /// * `notes` - The note events to mix; an empty list yields an empty
    ///   buffer with no error
    /// * `tempo_bpm` - Tempo in beats per minute, applied uniformly
    ///
    /// # Errors
    ///
    /// * [`SynthError::InvalidTempo`] if `tempo_bpm` is non-positive or not
    ///   finite
    /// * [`SynthError::InvalidNote`] if any event fails validation
    /// * [`SynthError::ScoreTooLong`] if the timeline would exceed the
    ///   configured total-sample budget
    pub fn synthesize_polyphonic(&self, notes: &[NoteEvent], tempo_bpm: f64) -> Result<Vec<f32>> {
        if notes.is_empty() {
            return Ok(Vec::new());
        }
        if !tempo_bpm.is_finite() || tempo_bpm <= 0.0 {
            return Err(SynthError::InvalidTempo(tempo_bpm));
        }
        for (index, note) in notes.iter().enumerate() {
            note.validate(index)?;
        }

        let rate = self.config.sample_rate as f64;
        let end_beat = notes.iter().map(NoteEvent::end_beat).fold(0.0, f64::max);
        let total_sec = beats_to_seconds(end_beat, tempo_bpm).min(self.config.max_total_sec);
        let total_samples = (total_sec * rate) as usize + (self.config.padding_sec * rate) as usize;
        if total_samples > self.config.max_total_samples {
            return Err(SynthError::ScoreTooLong {
                samples: total_samples,
                limit: self.config.max_total_samples,
            });
        }

        let mut timeline = vec![0.0f32; total_samples];
        let mut skipped = 0usize;
        for note in notes {
            let start_sec = beats_to_seconds(note.start_beat, tempo_bpm);
            let duration_sec = beats_to_seconds(note.duration_beats, tempo_bpm);
            let start_sample = (start_sec * rate).floor() as usize;
            if start_sample >= total_samples {
                // Inaudible: starts past the timeline (rounding at the boundary).
                skipped += 1;
                continue;
            }
            let freq = midi_to_freq(note.midi);
            let note_samples = self.generate_note(freq, duration_sec, note.velocity);
            let end_sample = total_samples.min(start_sample + note_samples.len());
            for (dst, src) in timeline[start_sample..end_sample]
                .iter_mut()
                .zip(&note_samples)
            {
                *dst += *src;
            }
        }

        tracing::debug!(
            notes = notes.len(),
            skipped,
            samples = timeline.len(),
            "synthesized polyphonic timeline"
        );
        Ok(timeline)
    }
}
