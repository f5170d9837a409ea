//! Time-domain autocorrelation pitch estimator
//!
//! Per frame:
//! - RMS silence gate
//! - Edge trim to the central voiced region
//! - Unnormalized autocorrelation over every lag
//! - Peak pick past the zero-lag lobe, parabolic refinement

use vr_core::{AudioFrame, VocalRangeConfig, rms};

/// Result of estimating one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PitchEstimate {
    /// Silent, unvoiced or degenerate frame
    NoPitch,
    /// Estimated fundamental (Hz, always finite and > 0)
    Frequency(f64),
}

impl PitchEstimate {
    pub fn frequency(self) -> Option<f64> {
        match self {
            PitchEstimate::Frequency(freq) => Some(freq),
            PitchEstimate::NoPitch => None,
        }
    }

    pub fn is_pitched(self) -> bool {
        matches!(self, PitchEstimate::Frequency(_))
    }
}

/// Autocorrelation pitch estimator.
///
/// Holds only thresholds, so `estimate` is pure: the same frame always yields
/// the same estimate and nothing carries over between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutocorrelationEstimator {
    /// Frames quieter than this RMS are silence
    silence_rms_threshold: f64,
    /// Samples quieter than this bound the voiced region
    voiced_edge_threshold: f64,
}

impl Default for AutocorrelationEstimator {
    fn default() -> Self {
        Self::from_config(&VocalRangeConfig::default())
    }
}

impl AutocorrelationEstimator {
    /// Create estimator with explicit thresholds
    pub fn new(silence_rms_threshold: f64, voiced_edge_threshold: f64) -> Self {
        Self {
            silence_rms_threshold,
            voiced_edge_threshold,
        }
    }

    pub fn from_config(config: &VocalRangeConfig) -> Self {
        Self::new(config.silence_rms_threshold, config.voiced_edge_threshold)
    }

    pub fn silence_rms_threshold(&self) -> f64 {
        self.silence_rms_threshold
    }

    pub fn voiced_edge_threshold(&self) -> f64 {
        self.voiced_edge_threshold
    }

    /// Estimate the fundamental of one frame
    pub fn estimate(&self, frame: &AudioFrame) -> PitchEstimate {
        self.estimate_samples(frame.samples(), frame.sample_rate() as f64)
    }

    /// Estimate the fundamental of a raw sample block
    pub fn estimate_samples(&self, samples: &[f32], sample_rate: f64) -> PitchEstimate {
        if samples.is_empty() || !sample_rate.is_finite() || sample_rate <= 0.0 {
            return PitchEstimate::NoPitch;
        }

        if rms(samples) < self.silence_rms_threshold {
            return PitchEstimate::NoPitch;
        }

        let voiced = voiced_region(samples, self.voiced_edge_threshold);
        if voiced.len() < 3 {
            log::trace!("Voiced region too short: {} samples", voiced.len());
            return PitchEstimate::NoPitch;
        }

        let corr = autocorrelate(voiced);
        let start = first_minimum(&corr);

        let Some(peak) = peak_lag(&corr, start) else {
            return PitchEstimate::NoPitch;
        };
        if peak == 0 {
            return PitchEstimate::NoPitch;
        }

        let Some(lag) = parabolic_interpolation(&corr, peak) else {
            log::trace!("Autocorrelation peak at lag {} has no usable neighbourhood", peak);
            return PitchEstimate::NoPitch;
        };

        let freq = sample_rate / lag;
        if freq.is_finite() && freq > 0.0 {
            PitchEstimate::Frequency(freq)
        } else {
            PitchEstimate::NoPitch
        }
    }
}

/// Trim leading/trailing loud edges, keeping `[r1, r2)`.
///
/// `r1` is the first sample in the first half quieter than `threshold` (else 0).
/// `r2` is the first sample, scanning back from the end over the second half,
/// quieter than `threshold` (else the last index).
fn voiced_region(samples: &[f32], threshold: f64) -> &[f32] {
    let size = samples.len();
    let half = size.div_ceil(2);

    let r1 = (0..half)
        .find(|&i| (samples[i] as f64).abs() < threshold)
        .unwrap_or(0);
    let r2 = (1..half)
        .map(|i| size - i)
        .find(|&i| (samples[i] as f64).abs() < threshold)
        .unwrap_or(size.saturating_sub(1));

    if r1 < r2 { &samples[r1..r2] } else { &[] }
}

/// Unnormalized autocorrelation for lags `0..len`
fn autocorrelate(buf: &[f32]) -> Vec<f64> {
    let size = buf.len();
    (0..size)
        .map(|lag| {
            buf[..size - lag]
                .iter()
                .zip(&buf[lag..])
                .map(|(&a, &b)| a as f64 * b as f64)
                .sum()
        })
        .collect()
}

/// First lag at which the autocorrelation stops decreasing
fn first_minimum(corr: &[f64]) -> usize {
    let mut lag = 0;
    while lag + 1 < corr.len() && corr[lag] > corr[lag + 1] {
        lag += 1;
    }
    lag
}

/// Lag of the largest value at or after `start` (first one wins on ties)
fn peak_lag(corr: &[f64], start: usize) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (lag, &value) in corr.iter().enumerate().skip(start) {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((lag, value)),
        }
    }
    best.map(|(lag, _)| lag)
}

/// Parabolic interpolation for sub-sample accuracy.
///
/// Needs both neighbours of `lag`; returns `None` when the peak sits on the
/// edge of the buffer or the fit is not finite and positive.
fn parabolic_interpolation(corr: &[f64], lag: usize) -> Option<f64> {
    if lag == 0 || lag + 1 >= corr.len() {
        return None;
    }

    let x1 = corr[lag - 1];
    let x2 = corr[lag];
    let x3 = corr[lag + 1];

    let a = (x1 + x3 - 2.0 * x2) / 2.0;
    let b = (x3 - x1) / 2.0;

    let mut refined = lag as f64;
    if a != 0.0 {
        refined -= b / (2.0 * a);
    }

    (refined.is_finite() && refined > 0.0).then_some(refined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_sine(freq: f32, sample_rate: u32, num_samples: usize) -> Vec<f32> {
        (0..num_samples)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    fn generate_with_harmonics(freq: f32, sample_rate: u32, num_samples: usize) -> Vec<f32> {
        (0..num_samples)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                let f = 2.0 * std::f32::consts::PI * freq;
                0.5 * ((f * t).sin() + 0.5 * (f * 2.0 * t).sin() + 0.33 * (f * 3.0 * t).sin())
            })
            .collect()
    }

    #[test]
    fn test_220hz_sine() {
        let estimator = AutocorrelationEstimator::default();
        let frame = AudioFrame::new(generate_sine(220.0, 44100, 2048), 44100).unwrap();

        let freq = estimator
            .estimate(&frame)
            .frequency()
            .expect("sine should be pitched");
        assert!((freq - 220.0).abs() < 1.0, "Expected ~220 Hz, got {}", freq);
    }

    #[test]
    fn test_440hz_sine_at_48k() {
        let estimator = AutocorrelationEstimator::default();
        let samples = generate_sine(440.0, 48000, 2048);

        let freq = estimator.estimate_samples(&samples, 48000.0).frequency().unwrap();
        assert!((freq - 440.0).abs() < 3.0, "Expected ~440 Hz, got {}", freq);
    }

    #[test]
    fn test_harmonic_signal_tracks_fundamental() {
        let estimator = AutocorrelationEstimator::default();
        let samples = generate_with_harmonics(196.0, 44100, 2048);

        let freq = estimator.estimate_samples(&samples, 44100.0).frequency().unwrap();
        assert!((freq - 196.0).abs() < 2.0, "Expected ~196 Hz (G3), got {}", freq);
    }

    #[test]
    fn test_silence_detection() {
        let estimator = AutocorrelationEstimator::default();
        let frame = AudioFrame::new(vec![0.0; 2048], 44100).unwrap();
        assert_eq!(estimator.estimate(&frame), PitchEstimate::NoPitch);
    }

    #[test]
    fn test_quiet_sine_is_gated() {
        let estimator = AutocorrelationEstimator::default();
        let samples: Vec<f32> = generate_sine(220.0, 44100, 2048)
            .into_iter()
            .map(|s| s * 0.005)
            .collect();
        assert_eq!(estimator.estimate_samples(&samples, 44100.0), PitchEstimate::NoPitch);
    }

    #[test]
    fn test_dc_offset_is_unvoiced() {
        // Monotonically decaying autocorrelation: peak lands on the buffer edge
        let estimator = AutocorrelationEstimator::default();
        let samples = vec![0.5f32; 2048];
        assert_eq!(estimator.estimate_samples(&samples, 44100.0), PitchEstimate::NoPitch);
    }

    #[test]
    fn test_degenerate_frames_do_not_panic() {
        let estimator = AutocorrelationEstimator::default();
        assert_eq!(estimator.estimate_samples(&[], 44100.0), PitchEstimate::NoPitch);
        assert_eq!(estimator.estimate_samples(&[0.9], 44100.0), PitchEstimate::NoPitch);
        assert_eq!(estimator.estimate_samples(&[0.9, -0.9], 44100.0), PitchEstimate::NoPitch);
        assert_eq!(
            estimator.estimate_samples(&generate_sine(220.0, 44100, 2048), 0.0),
            PitchEstimate::NoPitch
        );
    }

    #[test]
    fn test_estimate_is_stateless() {
        let estimator = AutocorrelationEstimator::default();
        let frame = AudioFrame::new(generate_sine(330.0, 44100, 2048), 44100).unwrap();
        let silent = AudioFrame::new(vec![0.0; 2048], 44100).unwrap();

        let first = estimator.estimate(&frame);
        let _ = estimator.estimate(&silent);
        assert_eq!(estimator.estimate(&frame), first);
    }

    #[test]
    fn test_voiced_region_trims_loud_edges() {
        let samples = [0.9, 0.8, 0.1, 0.5, -0.5, 0.05, 0.9, 0.9];
        // r1 = 2 (first quiet sample), r2 = 5 (first quiet sample from the end)
        assert_eq!(voiced_region(&samples, 0.2), &[0.1, 0.5, -0.5]);
    }

    #[test]
    fn test_voiced_region_without_quiet_samples() {
        let samples = [0.9f32; 6];
        assert_eq!(voiced_region(&samples, 0.2).len(), 5);
    }

    #[test]
    fn test_parabolic_interpolation_skips_flat_fit() {
        let corr = [3.0, 2.0, 2.0, 2.0];
        assert_eq!(parabolic_interpolation(&corr, 2), Some(2.0));
        assert_eq!(parabolic_interpolation(&corr, 3), None);
        assert_eq!(parabolic_interpolation(&corr, 0), None);
    }

    #[test]
    fn test_parabolic_interpolation_finds_vertex() {
        // y = -(x - 2.25)^2 sampled at 1, 2, 3
        let f = |x: f64| -(x - 2.25) * (x - 2.25);
        let corr = [f(0.0), f(1.0), f(2.0), f(3.0)];
        let refined = parabolic_interpolation(&corr, 2).unwrap();
        assert!((refined - 2.25).abs() < 1e-12);
    }
}
