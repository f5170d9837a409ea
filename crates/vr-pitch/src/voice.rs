//! Reference voice types and range classification

use serde::{Deserialize, Serialize};
use vr_core::freq_to_midi;

/// Classical voice categories with their approximate ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceType {
    /// E2 to E4
    Bass,
    /// A2 to A4
    Baritone,
    /// C3 to C5
    Tenor,
    /// E3 to E5
    Countertenor,
    /// F3 to F5
    Alto,
    /// A3 to A5
    Mezzo,
    /// C4 to C6
    Soprano,
    /// F6 to C7
    Coloratura,
}

impl VoiceType {
    pub const ALL: [VoiceType; 8] = [
        VoiceType::Bass,
        VoiceType::Baritone,
        VoiceType::Tenor,
        VoiceType::Countertenor,
        VoiceType::Alto,
        VoiceType::Mezzo,
        VoiceType::Soprano,
        VoiceType::Coloratura,
    ];

    /// Approximate range in Hz as (low, high)
    pub fn range_hz(self) -> (f64, f64) {
        match self {
            VoiceType::Bass => (82.0, 330.0),
            VoiceType::Baritone => (110.0, 440.0),
            VoiceType::Tenor => (130.0, 523.0),
            VoiceType::Countertenor => (165.0, 660.0),
            VoiceType::Alto => (175.0, 700.0),
            VoiceType::Mezzo => (220.0, 880.0),
            VoiceType::Soprano => (261.0, 1046.0),
            VoiceType::Coloratura => (1300.0, 2093.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VoiceType::Bass => "Bass",
            VoiceType::Baritone => "Baritone",
            VoiceType::Tenor => "Tenor",
            VoiceType::Countertenor => "Countertenor",
            VoiceType::Alto => "Alto",
            VoiceType::Mezzo => "Mezzo-soprano",
            VoiceType::Soprano => "Soprano",
            VoiceType::Coloratura => "Coloratura",
        }
    }
}

/// How well an observed range fits one voice type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceMatch {
    pub voice: VoiceType,
    /// Fraction (0-1] of the voice type's range, in semitones, that was sung
    pub coverage: f64,
}

/// Rank voice types by how much of their range `[low_hz, high_hz]` covers.
///
/// Coverage is measured on the semitone scale. Voice types without overlap
/// are left out; ties keep the low-to-high order of [`VoiceType::ALL`].
pub fn classify(low_hz: f64, high_hz: f64) -> Vec<VoiceMatch> {
    if low_hz.is_nan() || high_hz.is_nan() || low_hz <= 0.0 || high_hz < low_hz {
        return Vec::new();
    }
    let low = freq_to_midi(low_hz);
    let high = freq_to_midi(high_hz);

    let mut matches: Vec<VoiceMatch> = VoiceType::ALL
        .iter()
        .filter_map(|&voice| {
            let (v_low, v_high) = voice.range_hz();
            let (v_low, v_high) = (freq_to_midi(v_low), freq_to_midi(v_high));
            let overlap = high.min(v_high) - low.max(v_low);
            (overlap > 0.0).then(|| VoiceMatch {
                voice,
                coverage: (overlap / (v_high - v_low)).min(1.0),
            })
        })
        .collect();

    matches.sort_by(|a, b| b.coverage.partial_cmp(&a.coverage).unwrap_or(std::cmp::Ordering::Equal));
    matches
}
