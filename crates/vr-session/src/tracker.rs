//! Session tracker
//!
//! Owns everything that survives between ticks: the observed range, the
//! recent-note history and the lock setting.

use vr_core::{Note, VocalRangeConfig, note_to_freq};
use vr_pitch::{TonePreview, VoiceMatch, classify};

use crate::history::NoteHistory;
use crate::range::{LockInterval, RangeSummary, SessionRange};

/// Running vocal-range state for one session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTracker {
    /// `None` until the first accepted note
    range: Option<SessionRange>,
    history: NoteHistory,
    lock_enabled: bool,
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::from_config(&VocalRangeConfig::default())
    }
}

impl SessionTracker {
    pub fn new(history_limit: usize, lock_enabled: bool) -> Self {
        Self {
            range: None,
            history: NoteHistory::new(history_limit),
            lock_enabled,
        }
    }

    pub fn from_config(config: &VocalRangeConfig) -> Self {
        Self::new(config.history_limit, config.lock_enabled)
    }

    /// Fold an accepted note into the range and history
    pub fn observe(&mut self, note: Note) {
        let mut range = self
            .range
            .unwrap_or_else(|| SessionRange::from_midi(note.midi_float));
        range.include(note.midi_float);

        self.range = Some(range);
        self.history.push(note);

        log::debug!(
            "Observed {} ({:.1} Hz), range {:.2}..{:.2}",
            note,
            note.freq,
            range.min_midi(),
            range.max_midi()
        );
    }

    /// Forget the range and history; the lock setting is kept
    pub fn clear(&mut self) {
        self.range = None;
        self.history.clear();
        log::info!("Session cleared");
    }

    pub fn range(&self) -> Option<SessionRange> {
        self.range
    }

    /// Lowest tracked fractional MIDI
    pub fn min_midi(&self) -> Option<f64> {
        self.range.map(|r| r.min_midi())
    }

    /// Highest tracked fractional MIDI
    pub fn max_midi(&self) -> Option<f64> {
        self.range.map(|r| r.max_midi())
    }

    pub fn history(&self) -> &NoteHistory {
        &self.history
    }

    /// Most recently accepted note
    pub fn last_note(&self) -> Option<&Note> {
        self.history.newest()
    }

    pub fn has_data(&self) -> bool {
        self.range.is_some()
    }

    pub fn lock_enabled(&self) -> bool {
        self.lock_enabled
    }

    pub fn set_lock_enabled(&mut self, enabled: bool) {
        self.lock_enabled = enabled;
    }

    /// Locked interval, recomputed from the current bounds.
    ///
    /// `None` while lock is off. With lock on and nothing observed yet the
    /// interval is empty.
    pub fn lock_interval(&self) -> Option<LockInterval> {
        if !self.lock_enabled {
            return None;
        }
        Some(
            self.range
                .map_or_else(LockInterval::empty, |r| r.lock_interval()),
        )
    }

    /// Whether `midi` may be previewed under the current lock
    pub fn is_playable(&self, midi: i32) -> bool {
        self.lock_interval()
            .is_none_or(|interval| interval.contains(midi))
    }

    /// Render a preview tone for `midi`, or `None` when the lock forbids it
    pub fn preview_tone(&self, midi: i32, preview: &TonePreview) -> Option<Vec<f32>> {
        if !self.is_playable(midi) {
            log::debug!("Preview of MIDI {} blocked by range lock", midi);
            return None;
        }
        Some(preview.render(midi as f64))
    }

    pub fn summary(&self) -> RangeSummary {
        self.range
            .as_ref()
            .map_or_else(RangeSummary::empty, RangeSummary::from_range)
    }

    /// Voice types ranked against the tracked extremes
    pub fn voice_matches(&self) -> Vec<VoiceMatch> {
        self.range.map_or_else(Vec::new, |r| {
            classify(note_to_freq(r.min_midi()), note_to_freq(r.max_midi()))
        })
    }
}
