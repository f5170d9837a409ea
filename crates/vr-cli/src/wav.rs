//! WAV file input and output

use std::path::{Path, PathBuf};

use vr_core::{AudioFrame, VrError, VrResult};
use vr_session::{BufferSource, FrameSource};

/// Read a WAV file and mix it down to mono f32
pub fn read_mono(path: &Path) -> VrResult<(Vec<f32>, u32)> {
    let path_str = path.display().to_string();
    let reader = hound::WavReader::open(path)
        .map_err(|e| VrError::CaptureUnavailable(format!("{}: {}", path_str, e)))?;

    let spec = reader.spec();
    let channels = spec.channels as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| VrError::Audio(format!("{}: {}", path_str, e)))?,
        hound::SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| VrError::Audio(format!("{}: {}", path_str, e)))?
        }
    };

    if interleaved.is_empty() {
        return Ok((Vec::new(), spec.sample_rate));
    }

    let mono = AudioFrame::from_interleaved(&interleaved, channels, spec.sample_rate)?;
    log::debug!(
        "Loaded {}: {} Hz, {} ch, {:.2} s",
        path_str,
        spec.sample_rate,
        channels,
        mono.duration_secs()
    );
    Ok((mono.samples().to_vec(), spec.sample_rate))
}

/// Write mono f32 samples as a 32-bit float WAV
pub fn write_mono(path: &Path, samples: &[f32], sample_rate: u32) -> VrResult<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let audio_err = |e: hound::Error| VrError::Audio(format!("{}: {}", path.display(), e));

    let mut writer = hound::WavWriter::create(path, spec).map_err(audio_err)?;
    for &sample in samples {
        writer.write_sample(sample).map_err(audio_err)?;
    }
    writer.finalize().map_err(audio_err)
}

/// Frame source backed by a WAV file.
///
/// The file is opened on the first `start()`; an unreadable file is a
/// capture failure.
pub struct WavFrameSource {
    path: PathBuf,
    frame_size: usize,
    buffer: Option<BufferSource>,
}

impl WavFrameSource {
    pub fn new(path: impl Into<PathBuf>, frame_size: usize) -> Self {
        Self {
            path: path.into(),
            frame_size,
            buffer: None,
        }
    }

    /// Sample rate of the opened file
    pub fn sample_rate(&self) -> Option<u32> {
        self.buffer.as_ref().map(BufferSource::sample_rate)
    }
}

impl FrameSource for WavFrameSource {
    fn start(&mut self) -> VrResult<()> {
        if let Some(buffer) = self.buffer.as_mut() {
            return buffer.start();
        }

        let (samples, sample_rate) = read_mono(&self.path)?;
        let mut buffer = BufferSource::new(samples, sample_rate, self.frame_size)?;
        log::info!(
            "Opened {} ({} frames of {})",
            self.path.display(),
            buffer.remaining_frames(),
            self.frame_size
        );
        buffer.start()?;
        self.buffer = Some(buffer);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.stop();
        }
    }

    fn next_frame(&mut self) -> Option<AudioFrame> {
        self.buffer.as_mut().and_then(|buffer| buffer.next_frame())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_stereo_i16(path: &Path, frames: usize) {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for _ in 0..frames {
            writer.write_sample(16384i16).unwrap();
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_read_mono_mixes_channels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("stereo.wav");
        write_stereo_i16(&path, 100);

        let (samples, sample_rate) = read_mono(&path).unwrap();
        assert_eq!(sample_rate, 8000);
        assert_eq!(samples.len(), 100);
        assert!(samples.iter().all(|&s| (s - 0.25).abs() < 1e-4));
    }

    #[test]
    fn test_write_then_read_float() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.wav");
        let samples: Vec<f32> = (0..64).map(|i| i as f32 / 64.0 - 0.5).collect();

        write_mono(&path, &samples, 22050).unwrap();
        let (read, sample_rate) = read_mono(&path).unwrap();
        assert_eq!(sample_rate, 22050);
        assert_eq!(read, samples);
    }

    #[test]
    fn test_wav_source_frames() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("take.wav");
        write_stereo_i16(&path, 1000);

        let mut source = WavFrameSource::new(&path, 256);
        assert!(source.next_frame().is_none());

        source.start().unwrap();
        assert_eq!(source.sample_rate(), Some(8000));

        let mut frames = 0;
        while let Some(frame) = source.next_frame() {
            assert_eq!(frame.len(), 256);
            frames += 1;
        }
        // 1000 / 256, partial tail dropped
        assert_eq!(frames, 3);
    }

    #[test]
    fn test_missing_file_is_capture_failure() {
        let dir = TempDir::new().unwrap();
        let mut source = WavFrameSource::new(dir.path().join("missing.wav"), 256);
        assert!(matches!(source.start(), Err(VrError::CaptureUnavailable(_))));
    }
}
