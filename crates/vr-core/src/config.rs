//! Pipeline configuration
//!
//! All tunables for one tracking session. Stored as JSON; missing fields fall
//! back to their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{VrError, VrResult};

/// Lowest accepted frequency (Hz), bass low E2
pub const DEFAULT_MIN_FREQ: f64 = 82.0;

/// Highest accepted frequency (Hz), soprano high C7
pub const DEFAULT_MAX_FREQ: f64 = 2093.0;

/// Number of recent notes kept for display
pub const DEFAULT_HISTORY_LIMIT: usize = 12;

/// Frames with RMS below this are treated as silence
pub const DEFAULT_SILENCE_RMS_THRESHOLD: f64 = 0.01;

/// Amplitude below which a sample counts as the edge of the voiced region
pub const DEFAULT_VOICED_EDGE_THRESHOLD: f64 = 0.2;

/// Samples per analysis frame
pub const DEFAULT_FRAME_SIZE: usize = 2048;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocalRangeConfig {
    /// Lower edge of the accepted vocal band (Hz, inclusive)
    pub min_freq: f64,
    /// Upper edge of the accepted vocal band (Hz, inclusive)
    pub max_freq: f64,
    /// Recent-note history length
    pub history_limit: usize,
    /// RMS silence gate
    pub silence_rms_threshold: f64,
    /// Edge-trim amplitude threshold
    pub voiced_edge_threshold: f64,
    /// Samples per frame
    pub frame_size: usize,
    /// Restrict previewable notes to the observed range
    pub lock_enabled: bool,
}

impl Default for VocalRangeConfig {
    fn default() -> Self {
        Self {
            min_freq: DEFAULT_MIN_FREQ,
            max_freq: DEFAULT_MAX_FREQ,
            history_limit: DEFAULT_HISTORY_LIMIT,
            silence_rms_threshold: DEFAULT_SILENCE_RMS_THRESHOLD,
            voiced_edge_threshold: DEFAULT_VOICED_EDGE_THRESHOLD,
            frame_size: DEFAULT_FRAME_SIZE,
            lock_enabled: false,
        }
    }
}

impl VocalRangeConfig {
    /// Check that every field is usable
    pub fn validate(&self) -> VrResult<()> {
        let band_ok = self.min_freq.is_finite()
            && self.max_freq.is_finite()
            && self.min_freq > 0.0
            && self.min_freq <= self.max_freq;
        if !band_ok {
            return Err(VrError::InvalidFrequencyRange {
                min: self.min_freq,
                max: self.max_freq,
            });
        }
        if self.history_limit == 0 {
            return Err(VrError::InvalidConfig("history_limit must be at least 1".to_string()));
        }
        if self.frame_size < 4 {
            return Err(VrError::InvalidConfig(format!(
                "frame_size must be at least 4 samples, got {}",
                self.frame_size
            )));
        }
        if !self.silence_rms_threshold.is_finite() || self.silence_rms_threshold < 0.0 {
            return Err(VrError::InvalidConfig(format!(
                "silence_rms_threshold must be non-negative, got {}",
                self.silence_rms_threshold
            )));
        }
        if !self.voiced_edge_threshold.is_finite() || self.voiced_edge_threshold <= 0.0 {
            return Err(VrError::InvalidConfig(format!(
                "voiced_edge_threshold must be positive, got {}",
                self.voiced_edge_threshold
            )));
        }
        Ok(())
    }

    /// Load and validate a JSON configuration file
    pub fn load_from<P: AsRef<Path>>(path: P) -> VrResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> VrResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VocalRangeConfig::default();
        assert_eq!(config.min_freq, 82.0);
        assert_eq!(config.max_freq, 2093.0);
        assert_eq!(config.history_limit, 12);
        assert_eq!(config.silence_rms_threshold, 0.01);
        assert_eq!(config.voiced_edge_threshold, 0.2);
        assert_eq!(config.frame_size, 2048);
        assert!(!config.lock_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_band_rejected() {
        let config = VocalRangeConfig {
            min_freq: 500.0,
            max_freq: 100.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(VrError::InvalidFrequencyRange { .. })
        ));
    }

    #[test]
    fn test_zero_history_rejected() {
        let config = VocalRangeConfig {
            history_limit: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(VrError::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: VocalRangeConfig =
            serde_json::from_str(r#"{ "min_freq": 100.0, "lock_enabled": true }"#).unwrap();
        assert_eq!(config.min_freq, 100.0);
        assert_eq!(config.max_freq, DEFAULT_MAX_FREQ);
        assert!(config.lock_enabled);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocalrange.json");

        let config = VocalRangeConfig {
            max_freq: 1046.0,
            history_limit: 8,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = VocalRangeConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{ "frame_size": 2 }"#).unwrap();
        assert!(VocalRangeConfig::load_from(&path).is_err());

        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            VocalRangeConfig::load_from(&path),
            Err(VrError::Serialization(_))
        ));
    }
}
