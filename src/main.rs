//! sinemix - renders a note score to a mono 16-bit WAV file.
//!
//! Reads a JSON score (or uses the built-in demo score), synthesizes it
//! through the additive engine, and writes the result to disk.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --demo                       # Render the built-in demo score
//! cargo run -- --score melody.json -o out.wav
//! ```
//!
//! The score file shape is
//! `{"tempo_bpm": 120.0, "notes": [{"midi": 69, "start_beat": 0.0,
//! "duration_beats": 1.0, "velocity": 0.8}, ...]}` with `velocity` optional.

use anyhow::{bail, Context, Result};
use sinemix::score::{moonlight_sonata, note_to_name};
use sinemix::{Score, Synthesizer, DEFAULT_SAMPLE_RATE};
use std::path::PathBuf;

/// Command-line options for the renderer.
struct CliOptions {
    /// Path to a JSON score file; `None` means use the demo score.
    score: Option<PathBuf>,
    /// Output filename (base name only is kept).
    output: String,
    /// Directory receiving the output file.
    out_dir: PathBuf,
    /// Synthesis sample rate in Hz.
    sample_rate: u32,
}

impl CliOptions {
    /// Parses the process command line.
    fn parse() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        Self::from_args(&args)
    }

    /// Parses an argument vector (index 0 is the program name).
    ///
    /// Supports:
    /// - `--score <path>` or `-s <path>`: JSON score file to render
    /// - `--demo`: render the built-in demo score (default if no score given)
    /// - `--output <name>` or `-o <name>`: output WAV filename
    /// - `--out-dir <dir>`: output directory (default: current directory)
    /// - `--sample-rate <hz>` or `-r <hz>`: sample rate (default: 44100)
    /// - `--help` or `-h`: print help and exit
    ///
    /// When `--score` and `--demo` are both given, the last one wins.
    fn from_args(args: &[String]) -> Result<Self> {
        let mut score: Option<PathBuf> = None;
        let mut output = String::from("output.wav");
        let mut out_dir = PathBuf::from(".");
        let mut sample_rate = DEFAULT_SAMPLE_RATE;
        let mut i = 1;

        while i < args.len() {
            match args[i].as_str() {
                "--demo" => score = None,
                "--score" | "-s" => {
                    i += 1;
                    let Some(path) = args.get(i) else {
                        bail!("--score requires a path argument");
                    };
                    score = Some(PathBuf::from(path));
                }
                "--output" | "-o" => {
                    i += 1;
                    let Some(name) = args.get(i) else {
                        bail!("--output requires a filename argument");
                    };
                    output = name.clone();
                }
                "--out-dir" => {
                    i += 1;
                    let Some(dir) = args.get(i) else {
                        bail!("--out-dir requires a directory argument");
                    };
                    out_dir = PathBuf::from(dir);
                }
                "--sample-rate" | "-r" => {
                    i += 1;
                    let Some(rate) = args.get(i) else {
                        bail!("--sample-rate requires a value");
                    };
                    sample_rate = rate
                        .parse()
                        .with_context(|| format!("invalid sample rate: {rate}"))?;
                }
                "--help" | "-h" => {
                    eprintln!("sinemix - polyphonic additive synthesizer");
                    eprintln!();
                    eprintln!(
                        "Usage: {} [OPTIONS]",
                        args.first().map(String::as_str).unwrap_or("sinemix")
                    );
                    eprintln!();
                    eprintln!("Options:");
                    eprintln!("  -s, --score PATH       Render a JSON score file");
                    eprintln!("      --demo             Render the built-in demo score (default)");
                    eprintln!("  -o, --output NAME      Output WAV filename (default: output.wav)");
                    eprintln!("      --out-dir DIR      Output directory (default: .)");
                    eprintln!("  -r, --sample-rate HZ   Sample rate (default: 44100, min 8000)");
                    eprintln!("  -h, --help             Print this help message");
                    std::process::exit(0);
                }
                other => {
                    // A bare .json argument is treated as the score path
                    if other.ends_with(".json") {
                        score = Some(PathBuf::from(other));
                    } else {
                        bail!("unknown option: {other} (use --help for usage)");
                    }
                }
            }
            i += 1;
        }

        Ok(Self {
            score,
            output,
            out_dir,
            sample_rate,
        })
    }
}

/// Formats the score's pitch span like "C#2..G#4" for logging.
fn pitch_span(score: &Score) -> String {
    let mut pitches = score.notes.iter().map(|n| n.midi.clamp(0, 127) as u8);
    match pitches.next() {
        Some(first) => {
            let (lo, hi) = pitches.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
            format!("{}..{}", note_to_name(lo), note_to_name(hi))
        }
        None => String::from("empty"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let options = CliOptions::parse()?;

    let score = match &options.score {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read score file: {}", path.display()))?;
            Score::from_json(&json)
                .with_context(|| format!("failed to parse score file: {}", path.display()))?
        }
        None => moonlight_sonata(),
    };
    tracing::info!(
        notes = score.notes.len(),
        tempo_bpm = score.tempo_bpm,
        span = %pitch_span(&score),
        "loaded score"
    );

    let synth = Synthesizer::new(options.sample_rate)?;
    let buffer = synth.synthesize_polyphonic(&score.notes, score.tempo_bpm)?;
    let path = synth.save_to_wav_in(&buffer, &options.out_dir, &options.output)?;

    let seconds = buffer.len() as f64 / synth.sample_rate() as f64;
    println!("Wrote {} ({seconds:.1} s)", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("sinemix")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let options = CliOptions::from_args(&args(&[])).unwrap();
        assert!(options.score.is_none());
        assert_eq!(options.output, "output.wav");
        assert_eq!(options.out_dir, PathBuf::from("."));
        assert_eq!(options.sample_rate, DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn test_score_and_demo_last_flag_wins() {
        let options = CliOptions::from_args(&args(&["--score", "x.json", "--demo"])).unwrap();
        assert!(options.score.is_none());

        let options = CliOptions::from_args(&args(&["--demo", "--score", "x.json"])).unwrap();
        assert_eq!(options.score, Some(PathBuf::from("x.json")));
    }

    #[test]
    fn test_bare_json_argument_is_score_path() {
        let options = CliOptions::from_args(&args(&["melody.json", "-o", "m.wav"])).unwrap();
        assert_eq!(options.score, Some(PathBuf::from("melody.json")));
        assert_eq!(options.output, "m.wav");
    }

    #[test]
    fn test_missing_argument_values_rejected() {
        assert!(CliOptions::from_args(&args(&["--score"])).is_err());
        assert!(CliOptions::from_args(&args(&["--sample-rate", "fast"])).is_err());
        assert!(CliOptions::from_args(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_pitch_span_formatting() {
        let span = pitch_span(&moonlight_sonata());
        assert_eq!(span, "C#2..G#4");

        let empty = Score::new(120.0, Vec::new());
        assert_eq!(pitch_span(&empty), "empty");
    }
}
