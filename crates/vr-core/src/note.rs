//! Note math
//!
//! Frequency ↔ MIDI ↔ note name conversion using equal temperament with
//! MIDI 69 = A4 = 440 Hz. MIDI numbers stay fractional until display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference pitch (A4)
pub const A4_FREQ: f64 = 440.0;

/// MIDI number of the reference pitch
pub const A4_MIDI: f64 = 69.0;

/// Note names, indexed by pitch class
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// One of the twelve chromatic pitch classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    C, Cs, D, Ds, E, F, Fs, G, Gs, A, As, B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Pitch class of an integer MIDI note (negative notes wrap correctly)
    pub fn from_midi(midi: i32) -> Self {
        Self::ALL[midi.rem_euclid(12) as usize]
    }

    /// Index 0-11, C = 0
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.index()]
    }

    /// True for the five black keys
    pub fn is_sharp(self) -> bool {
        matches!(
            self,
            PitchClass::Cs | PitchClass::Ds | PitchClass::Fs | PitchClass::Gs | PitchClass::As
        )
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A detected frequency resolved to the nearest equal-tempered note
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Pitch class of the rounded MIDI number
    pub pitch_class: PitchClass,
    /// Nearest integer MIDI number
    pub midi_rounded: i32,
    /// Exact (fractional) MIDI number of `freq`
    pub midi_float: f64,
    /// Scientific pitch octave of `midi_rounded`
    pub octave: i32,
    /// Source frequency (Hz)
    pub freq: f64,
}

impl Note {
    pub fn name(&self) -> &'static str {
        self.pitch_class.name()
    }

    /// Deviation from the rounded note in cents (-50..=50)
    pub fn cents_offset(&self) -> f64 {
        (self.midi_float - self.midi_rounded as f64) * 100.0
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name(), self.octave)
    }
}

/// Convert frequency to (fractional) MIDI note number
#[inline]
pub fn freq_to_midi(freq: f64) -> f64 {
    12.0 * (freq / A4_FREQ).log2() + A4_MIDI
}

/// Convert (possibly fractional) MIDI note number to frequency
#[inline]
pub fn note_to_freq(midi: f64) -> f64 {
    A4_FREQ * 2.0f64.powf((midi - A4_MIDI) / 12.0)
}

/// Octave number of an integer MIDI note (C4 = 60)
#[inline]
pub fn octave_of(midi: i32) -> i32 {
    midi.div_euclid(12) - 1
}

/// Note label for an integer MIDI note, e.g. `"C#4"`
pub fn midi_to_name(midi: i32) -> String {
    format!("{}{}", PitchClass::from_midi(midi), octave_of(midi))
}

/// Resolve a frequency to its nearest note.
///
/// Returns `None` for non-positive or non-finite frequencies.
pub fn freq_to_note(freq: f64) -> Option<Note> {
    if !freq.is_finite() || freq <= 0.0 {
        return None;
    }
    let midi_float = freq_to_midi(freq);
    let midi_rounded = midi_float.round() as i32;
    Some(Note {
        pitch_class: PitchClass::from_midi(midi_rounded),
        midi_rounded,
        midi_float,
        octave: octave_of(midi_rounded),
        freq,
    })
}
