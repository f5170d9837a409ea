//! Audio frames handed to the pitch pipeline, one per tick.

use crate::{VrError, VrResult};

/// Fixed-length block of mono samples plus the rate they were captured at.
///
/// Samples are expected in [-1.0, 1.0]. A frame is immutable once built and
/// is only borrowed by the estimator for the duration of a single call.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioFrame {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioFrame {
    /// Build a frame, rejecting empty sample blocks and a zero sample rate
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> VrResult<Self> {
        if sample_rate == 0 {
            return Err(VrError::InvalidSampleRate(sample_rate));
        }
        if samples.is_empty() {
            return Err(VrError::EmptyFrame);
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Build a frame from interleaved multichannel audio by averaging channels
    pub fn from_interleaved(interleaved: &[f32], channels: usize, sample_rate: u32) -> VrResult<Self> {
        if channels == 0 {
            return Err(VrError::Audio("channel count must be non-zero".to_string()));
        }
        let mono = interleaved
            .chunks_exact(channels)
            .map(|chunk| chunk.iter().sum::<f32>() / channels as f32)
            .collect();
        Self::new(mono, sample_rate)
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Frame duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Root-mean-square level of the frame
    pub fn rms(&self) -> f64 {
        rms(&self.samples)
    }
}

/// Root-mean-square level of a sample block (0.0 for an empty block)
pub fn rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| s as f64 * s as f64).sum();
    (sum / samples.len() as f64).sqrt()
}
