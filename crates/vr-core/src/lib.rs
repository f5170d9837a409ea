//! vr-core: Shared types for VocalRange
//!
//! Audio frames, note math, configuration and the error type used by every
//! other VocalRange crate.

mod config;
mod error;
mod frame;
mod note;

pub use config::*;
pub use error::*;
pub use frame::*;
pub use note::*;

/// Standard sample rate options
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[repr(u32)]
pub enum SampleRate {
    Hz22050 = 22050,
    Hz44100 = 44100,
    Hz48000 = 48000,
    Hz96000 = 96000,
}

impl SampleRate {
    #[inline]
    pub fn as_f64(self) -> f64 {
        self as u32 as f64
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self::Hz44100
    }
}
