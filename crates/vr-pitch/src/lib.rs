//! VocalRange Pitch Engine
//!
//! Monophonic pitch estimation for singing voice:
//!
//! ## Features
//! - **Autocorrelation Detection**: Time-domain fundamental estimation per frame
//! - **Vocal Band Filter**: Reject sub-/super-vocal pitches before they reach the session
//! - **Voice Types**: Classify an observed range against classical voice categories
//! - **Tone Preview**: Render a short sine pluck for any MIDI note
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vr_pitch::{AutocorrelationEstimator, RangeFilter};
//!
//! let estimator = AutocorrelationEstimator::default();
//! let filter = RangeFilter::default();
//!
//! if let Some(freq) = estimator.estimate(&frame).frequency() {
//!     if filter.accept(freq) {
//!         let note = vr_core::freq_to_note(freq);
//!     }
//! }
//! ```

pub mod autocorrelation;
pub mod filter;
pub mod tone;
pub mod voice;

pub use autocorrelation::{AutocorrelationEstimator, PitchEstimate};
pub use filter::RangeFilter;
pub use tone::TonePreview;
pub use voice::{VoiceMatch, VoiceType, classify};
