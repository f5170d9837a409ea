//! Preview tone synthesis
//!
//! Short sine "pluck" used to audition a note: 10 ms linear attack to a
//! quiet peak, exponential decay over the next 590 ms, hard stop at 700 ms.

use std::f64::consts::TAU;
use vr_core::note_to_freq;

/// Peak gain reached at the end of the attack
pub const TONE_PEAK_GAIN: f64 = 0.18;

/// Gain the exponential decay lands on
pub const TONE_FLOOR_GAIN: f64 = 0.0001;

/// Attack length (seconds)
pub const TONE_ATTACK_SECS: f64 = 0.01;

/// Time at which the decay reaches the floor (seconds)
pub const TONE_DECAY_END_SECS: f64 = 0.6;

/// Time at which the oscillator stops (seconds)
pub const TONE_STOP_SECS: f64 = 0.7;

/// Renders preview tones at a fixed sample rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TonePreview {
    sample_rate: u32,
}

impl TonePreview {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Envelope gain at `t` seconds after note start
    pub fn gain_at(t: f64) -> f64 {
        if t <= 0.0 || t >= TONE_STOP_SECS {
            0.0
        } else if t < TONE_ATTACK_SECS {
            TONE_PEAK_GAIN * t / TONE_ATTACK_SECS
        } else if t < TONE_DECAY_END_SECS {
            let progress = (t - TONE_ATTACK_SECS) / (TONE_DECAY_END_SECS - TONE_ATTACK_SECS);
            TONE_PEAK_GAIN * (TONE_FLOOR_GAIN / TONE_PEAK_GAIN).powf(progress)
        } else {
            TONE_FLOOR_GAIN
        }
    }

    /// Render the full preview for a (possibly fractional) MIDI note
    pub fn render(&self, midi: f64) -> Vec<f32> {
        let freq = note_to_freq(midi);
        let sr = self.sample_rate as f64;
        let len = (TONE_STOP_SECS * sr).round() as usize;

        log::debug!("Rendering {:.1} Hz preview tone ({} samples)", freq, len);

        (0..len)
            .map(|i| {
                let t = i as f64 / sr;
                (Self::gain_at(t) * (TAU * freq * t).sin()) as f32
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_envelope_shape() {
        assert_eq!(TonePreview::gain_at(0.0), 0.0);
        assert_relative_eq!(TonePreview::gain_at(0.005), 0.09, epsilon = 1e-12);
        assert_relative_eq!(TonePreview::gain_at(TONE_ATTACK_SECS), TONE_PEAK_GAIN, epsilon = 1e-12);
        assert_relative_eq!(TonePreview::gain_at(0.6), TONE_FLOOR_GAIN, epsilon = 1e-12);
        assert_relative_eq!(TonePreview::gain_at(0.65), TONE_FLOOR_GAIN, epsilon = 1e-12);
        assert_eq!(TonePreview::gain_at(0.7), 0.0);
    }

    #[test]
    fn test_decay_is_monotonic() {
        let mut last = TonePreview::gain_at(TONE_ATTACK_SECS);
        let mut t = TONE_ATTACK_SECS;
        while t < TONE_DECAY_END_SECS {
            t += 0.01;
            let g = TonePreview::gain_at(t);
            assert!(g <= last);
            last = g;
        }
    }

    #[test]
    fn test_render_length_and_peak() {
        let tone = TonePreview::new(44100).render(69.0);
        assert_eq!(tone.len(), 30870);

        let peak = tone.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
        assert!(peak <= TONE_PEAK_GAIN as f32 + 1e-6);
        assert!(peak > 0.15);
        assert_eq!(tone[0], 0.0);
    }

    #[test]
    fn test_render_frequency() {
        // Count positive-going zero crossings over the first half second
        let sr = 48000;
        let tone = TonePreview::new(sr).render(57.0); // A3 = 220 Hz
        let window = &tone[1..(sr as usize / 2)];
        let crossings = window
            .windows(2)
            .filter(|pair| pair[0] <= 0.0 && pair[1] > 0.0)
            .count();
        let freq = crossings as f64 / 0.5;
        assert!((freq - 220.0).abs() <= 4.0, "Expected ~220 Hz, got {}", freq);
    }
}
