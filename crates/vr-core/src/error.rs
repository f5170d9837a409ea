//! Error types for VocalRange

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum VrError {
    /// Audio source could not be acquired (permission denied, device missing, unreadable file)
    #[error("Audio capture unavailable: {0}")]
    CaptureUnavailable(String),

    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(u32),

    #[error("Invalid frequency range: {min} - {max} Hz")]
    InvalidFrequencyRange { min: f64, max: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Audio frame contains no samples")]
    EmptyFrame,

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for VrError {
    fn from(err: serde_json::Error) -> Self {
        VrError::Serialization(err.to_string())
    }
}

/// Result type alias
pub type VrResult<T> = Result<T, VrError>;
