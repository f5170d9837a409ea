//! Vocal band filter
//!
//! Gatekeeper between the estimator and the session: only frequencies inside
//! the configured band may move the tracked range or enter the history.

use serde::{Deserialize, Serialize};
use vr_core::{DEFAULT_MAX_FREQ, DEFAULT_MIN_FREQ, VocalRangeConfig, VrError, VrResult};

/// Inclusive frequency band accepted as voice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter {
    /// Lower bound (Hz, inclusive)
    min_freq: f64,
    /// Upper bound (Hz, inclusive)
    max_freq: f64,
}

impl Default for RangeFilter {
    fn default() -> Self {
        Self {
            min_freq: DEFAULT_MIN_FREQ,
            max_freq: DEFAULT_MAX_FREQ,
        }
    }
}

impl RangeFilter {
    /// Create a filter, rejecting inverted or non-positive bands
    pub fn new(min_freq: f64, max_freq: f64) -> VrResult<Self> {
        let valid = min_freq.is_finite() && max_freq.is_finite() && min_freq > 0.0 && min_freq <= max_freq;
        if !valid {
            return Err(VrError::InvalidFrequencyRange {
                min: min_freq,
                max: max_freq,
            });
        }
        Ok(Self { min_freq, max_freq })
    }

    pub fn from_config(config: &VocalRangeConfig) -> VrResult<Self> {
        Self::new(config.min_freq, config.max_freq)
    }

    pub fn min_freq(&self) -> f64 {
        self.min_freq
    }

    pub fn max_freq(&self) -> f64 {
        self.max_freq
    }

    /// True iff `min_freq <= freq <= max_freq`
    #[inline]
    pub fn accept(&self, freq: f64) -> bool {
        freq >= self.min_freq && freq <= self.max_freq
    }
}
