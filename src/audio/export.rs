//! WAV serialization.
//!
//! Writes a mixed sample buffer as a mono 16-bit signed PCM WAV file via
//! `hound`. The buffer is peak-normalized before quantization, and the file
//! is written to a temporary sibling path and renamed into place so a failed
//! write never leaves a truncated file that looks like a success.

use crate::error::{Result, SynthError};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::{Path, PathBuf};

/// Peak target for normalization. Deliberately below i16::MAX to leave a
/// little headroom above the loudest sample.
const NORMALIZE_PEAK: f64 = 32760.0;

/// Reduces a caller-supplied filename to its final component.
///
/// Directory prefixes and traversal sequences are stripped; the exporter
/// only ever writes into the directory it is told to write into.
fn sanitize_filename(filename: &str) -> Option<String> {
    Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_string())
}

/// Writes samples to a mono 16-bit PCM WAV file in `dir`.
///
/// The samples are scaled so the loudest one lands at ±32760, clipped to
/// [-32767, 32767], and rounded to `i16`. The write goes to a `.tmp`
/// sibling first and is renamed over the final path on success.
///
/// # Arguments
///
/// * `samples` - Float samples, nominally in [-1.0, 1.0]
/// * `sample_rate` - Output sample rate in Hz
/// * `dir` - Directory receiving the file
/// * `filename` - Output name; any directory components are stripped
///
/// # Returns
///
/// The full path of the written file.
///
/// # Errors
///
/// * [`SynthError::EmptyBuffer`] if `samples` is empty
/// * [`SynthError::SilentBuffer`] if every sample is exactly zero
/// * [`SynthError::DirectoryMissing`] if `dir` does not exist
/// * [`SynthError::Io`] for any other write failure
pub fn write_wav(
    samples: &[f32],
    sample_rate: u32,
    dir: impl AsRef<Path>,
    filename: &str,
) -> Result<PathBuf> {
    if samples.is_empty() {
        return Err(SynthError::EmptyBuffer);
    }
    if samples.iter().all(|s| *s == 0.0) {
        return Err(SynthError::SilentBuffer);
    }

    let dir = dir.as_ref();
    let name = sanitize_filename(filename).ok_or_else(|| SynthError::Io {
        path: PathBuf::from(filename),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty filename"),
    })?;
    let path = dir.join(&name);

    if !dir.is_dir() {
        return Err(SynthError::DirectoryMissing(dir.to_path_buf()));
    }

    let max_abs = samples
        .iter()
        .map(|s| (*s as f64).abs())
        .fold(0.0, f64::max);
    let scale = NORMALIZE_PEAK / max_abs;

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    // Atomic write: build the file next to its destination, rename on success.
    let tmp_path = dir.join(format!("{name}.tmp"));
    let write_result = write_samples(&tmp_path, spec, samples, scale);
    if let Err(err) = write_result {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(err);
    }
    std::fs::rename(&tmp_path, &path).map_err(|source| {
        let _ = std::fs::remove_file(&tmp_path);
        SynthError::Io {
            path: path.clone(),
            source,
        }
    })?;

    tracing::info!(path = %path.display(), samples = samples.len(), "wrote WAV file");
    Ok(path)
}

fn write_samples(tmp_path: &Path, spec: WavSpec, samples: &[f32], scale: f64) -> Result<()> {
    let io_err = |source: std::io::Error| SynthError::Io {
        path: tmp_path.to_path_buf(),
        source,
    };
    let from_hound = |err: hound::Error| match err {
        hound::Error::IoError(source) => io_err(source),
        other => io_err(std::io::Error::other(other)),
    };

    let mut writer = WavWriter::create(tmp_path, spec).map_err(from_hound)?;
    for sample in samples {
        let scaled = (*sample as f64 * scale).clamp(-32767.0, 32767.0).round() as i16;
        writer.write_sample(scaled).map_err(from_hound)?;
    }
    writer.finalize().map_err(from_hound)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;
    use std::path::PathBuf;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("sinemix_export_tests").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_empty_buffer_rejected() {
        let dir = test_dir("empty");
        assert!(matches!(
            write_wav(&[], 44_100, &dir, "out.wav"),
            Err(SynthError::EmptyBuffer)
        ));
    }

    #[test]
    fn test_silent_buffer_rejected() {
        let dir = test_dir("silent");
        let samples = vec![0.0f32; 1024];
        assert!(matches!(
            write_wav(&samples, 44_100, &dir, "out.wav"),
            Err(SynthError::SilentBuffer)
        ));
        // Rejected before any I/O
        assert!(!dir.join("out.wav").exists());
    }

    #[test]
    fn test_missing_directory_distinguished() {
        let dir = std::env::temp_dir()
            .join("sinemix_export_tests")
            .join("does_not_exist");
        let _ = std::fs::remove_dir_all(&dir);
        let samples = vec![0.5f32; 64];
        assert!(matches!(
            write_wav(&samples, 44_100, &dir, "out.wav"),
            Err(SynthError::DirectoryMissing(_))
        ));
    }

    #[test]
    fn test_normalization_peak_is_32760() {
        let dir = test_dir("peak");
        let mut samples = vec![0.0f32; 1000];
        samples[500] = 1.0;
        samples[100] = -0.25;
        let path = write_wav(&samples, 44_100, &dir, "peak.wav").unwrap();

        let mut reader = WavReader::open(&path).unwrap();
        let read: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read.len(), 1000);
        assert_eq!(read[500], 32760);
        assert_eq!(read[100], -8190); // -0.25 * 32760
        assert_eq!(read.iter().map(|s| s.abs()).max(), Some(32760));
    }

    #[test]
    fn test_quiet_buffer_scaled_up() {
        // Normalization raises quiet material to the same peak.
        let dir = test_dir("quiet");
        let mut samples = vec![0.0f32; 256];
        samples[10] = 0.001;
        let path = write_wav(&samples, 44_100, &dir, "quiet.wav").unwrap();

        let mut reader = WavReader::open(&path).unwrap();
        let read: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read[10], 32760);
    }

    #[test]
    fn test_wav_format_fields() {
        let dir = test_dir("format");
        let samples: Vec<f32> = (0..2048)
            .map(|i| (i as f32 * 0.01).sin() * 0.5)
            .collect();
        let path = write_wav(&samples, 22_050, &dir, "format.wav").unwrap();

        let reader = WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 22_050);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, SampleFormat::Int);
        assert_eq!(reader.duration() as usize, samples.len());
    }

    #[test]
    fn test_filename_sanitized_to_basename() {
        let dir = test_dir("sanitize");
        let samples = vec![0.5f32; 64];
        let path = write_wav(&samples, 44_100, &dir, "../../escape.wav").unwrap();
        assert_eq!(path, dir.join("escape.wav"));
        assert!(path.exists());
    }

    #[test]
    fn test_no_tmp_file_left_behind() {
        let dir = test_dir("tmp_cleanup");
        let samples = vec![0.5f32; 64];
        write_wav(&samples, 44_100, &dir, "clean.wav").unwrap();
        assert!(dir.join("clean.wav").exists());
        assert!(!dir.join("clean.wav.tmp").exists());
    }
}
