//! Session range and its display form

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use vr_core::{midi_to_name, note_to_freq};

/// Summary text shown before any note has been accepted
pub const NO_DATA_TEXT: &str = "No data yet";

/// Placeholder for missing note names and frequencies
pub const PLACEHOLDER: &str = "—";

/// Lowest and highest fractional MIDI pitch observed in a session.
///
/// Always non-empty: an unset range is `Option::<SessionRange>::None` at the
/// owner, never a pair of infinities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionRange {
    min_midi: f64,
    max_midi: f64,
}

impl SessionRange {
    /// Range collapsed onto a single observation
    pub fn from_midi(midi: f64) -> Self {
        Self {
            min_midi: midi,
            max_midi: midi,
        }
    }

    /// Widen to include `midi`; never narrows
    pub fn include(&mut self, midi: f64) {
        self.min_midi = self.min_midi.min(midi);
        self.max_midi = self.max_midi.max(midi);
    }

    pub fn min_midi(&self) -> f64 {
        self.min_midi
    }

    pub fn max_midi(&self) -> f64 {
        self.max_midi
    }

    /// Width in semitones
    pub fn span_semitones(&self) -> f64 {
        self.max_midi - self.min_midi
    }

    /// Display note for the low end (rounded after tracking)
    pub fn low_rounded(&self) -> i32 {
        self.min_midi.round() as i32
    }

    /// Display note for the high end (rounded after tracking)
    pub fn high_rounded(&self) -> i32 {
        self.max_midi.round() as i32
    }

    /// Whole notes lying fully inside the range
    pub fn lock_interval(&self) -> LockInterval {
        LockInterval::new(self.min_midi.ceil() as i32, self.max_midi.floor() as i32)
    }

    /// Display pair for the presenter
    pub fn bounds(&self) -> (RangeBound, RangeBound) {
        (
            RangeBound::from_midi(self.low_rounded()),
            RangeBound::from_midi(self.high_rounded()),
        )
    }
}

/// Inclusive integer MIDI interval; empty when `low > high`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockInterval {
    pub low: i32,
    pub high: i32,
}

impl LockInterval {
    pub fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }

    /// Interval containing nothing
    pub fn empty() -> Self {
        Self { low: 1, high: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.low > self.high
    }

    pub fn contains(&self, midi: i32) -> bool {
        midi >= self.low && midi <= self.high
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.high - self.low) as usize + 1
        }
    }

    pub fn notes(&self) -> RangeInclusive<i32> {
        self.low..=self.high
    }
}

/// One end of the range, ready for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeBound {
    pub midi: i32,
    /// Note name with octave, e.g. `"G#3"`
    pub name: String,
    /// Equal-tempered frequency of `midi`
    pub freq: f64,
}

impl RangeBound {
    pub fn from_midi(midi: i32) -> Self {
        Self {
            midi,
            name: midi_to_name(midi),
            freq: note_to_freq(midi as f64),
        }
    }

    /// Frequency with one decimal, e.g. `"196.0 Hz"`
    pub fn freq_label(&self) -> String {
        format!("{:.1} Hz", self.freq)
    }
}

/// Everything the presenter needs to draw the range panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeSummary {
    pub low: Option<RangeBound>,
    pub high: Option<RangeBound>,
    /// `"<low> → <high>"`, or [`NO_DATA_TEXT`]
    pub text: String,
}

impl RangeSummary {
    pub fn empty() -> Self {
        Self {
            low: None,
            high: None,
            text: NO_DATA_TEXT.to_string(),
        }
    }

    pub fn from_range(range: &SessionRange) -> Self {
        let (low, high) = range.bounds();
        let text = format!("{} → {}", low.name, high.name);
        Self {
            low: Some(low),
            high: Some(high),
            text,
        }
    }

    pub fn has_data(&self) -> bool {
        self.low.is_some()
    }

    pub fn low_name(&self) -> &str {
        self.low.as_ref().map_or(PLACEHOLDER, |b| b.name.as_str())
    }

    pub fn high_name(&self) -> &str {
        self.high.as_ref().map_or(PLACEHOLDER, |b| b.name.as_str())
    }

    pub fn low_freq_label(&self) -> String {
        self.low
            .as_ref()
            .map_or_else(|| PLACEHOLDER.to_string(), RangeBound::freq_label)
    }

    pub fn high_freq_label(&self) -> String {
        self.high
            .as_ref()
            .map_or_else(|| PLACEHOLDER.to_string(), RangeBound::freq_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_is_monotonic() {
        let mut range = SessionRange::from_midi(60.0);
        for midi in [55.3, 65.9, 58.0] {
            range.include(midi);
        }
        assert_eq!(range.min_midi(), 55.3);
        assert_eq!(range.max_midi(), 65.9);
    }

    #[test]
    fn test_lock_interval() {
        let mut range = SessionRange::from_midi(60.4);
        range.include(67.6);
        let lock = range.lock_interval();
        assert_eq!(lock, LockInterval::new(61, 67));
        assert_eq!(lock.notes().collect::<Vec<_>>(), vec![61, 62, 63, 64, 65, 66, 67]);
        assert_eq!(lock.len(), 7);
    }

    #[test]
    fn test_lock_interval_inside_one_semitone_is_empty() {
        let range = SessionRange::from_midi(60.4);
        let lock = range.lock_interval();
        assert!(lock.is_empty());
        assert_eq!(lock.len(), 0);
        assert!(!lock.contains(60));
        assert!(!lock.contains(61));
    }

    #[test]
    fn test_display_rounds_tracked_extremes() {
        let mut range = SessionRange::from_midi(59.6);
        range.include(64.4);
        let summary = RangeSummary::from_range(&range);
        assert_eq!(summary.low_name(), "C4");
        assert_eq!(summary.high_name(), "E4");
        assert_eq!(summary.text, "C4 → E4");
        assert_eq!(summary.low_freq_label(), "261.6 Hz");
    }

    #[test]
    fn test_empty_summary_uses_placeholders() {
        let summary = RangeSummary::empty();
        assert!(!summary.has_data());
        assert_eq!(summary.text, "No data yet");
        assert_eq!(summary.low_name(), "—");
        assert_eq!(summary.high_freq_label(), "—");
    }

    #[test]
    fn test_empty_interval() {
        let empty = LockInterval::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.notes().count(), 0);
    }
}
