//! Keyboard and staff display helpers
//!
//! Per-key marks are derived from the tracker on every call, so clearing the
//! session or toggling the lock never leaves stale marks behind.

use serde::{Deserialize, Serialize};
use vr_core::{PitchClass, octave_of};

use crate::tracker::SessionTracker;

/// First key of the default keyboard (C3)
pub const KEY_START: i32 = 48;

/// Default keyboard width (three octaves)
pub const KEY_COUNT: usize = 36;

/// MIDI range of the staff plot
pub const STAFF_LOW_MIDI: i32 = 48;
pub const STAFF_HIGH_MIDI: i32 = 84;

/// Display state of one key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    pub midi: i32,
    pub pitch_class: PitchClass,
    /// Tooltip label, e.g. `"F#3"`
    pub title: String,
    pub is_black: bool,
    /// Outside the locked interval
    pub locked: bool,
    /// Most recently detected note
    pub active: bool,
}

/// Contiguous run of keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardLayout {
    pub start: i32,
    pub count: usize,
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self {
            start: KEY_START,
            count: KEY_COUNT,
        }
    }
}

impl KeyboardLayout {
    pub fn new(start: i32, count: usize) -> Self {
        Self { start, count }
    }

    /// MIDI numbers of every key, low to high
    pub fn keys(&self) -> impl Iterator<Item = i32> + '_ {
        (0..self.count).map(move |i| self.start + i as i32)
    }

    pub fn contains(&self, midi: i32) -> bool {
        midi >= self.start && ((midi - self.start) as usize) < self.count
    }

    /// Marks for every key given the current session state
    pub fn key_states(&self, tracker: &SessionTracker) -> Vec<KeyState> {
        let interval = tracker.lock_interval().filter(|_| tracker.has_data());
        let active = tracker.last_note().map(|n| n.midi_rounded);

        self.keys()
            .map(|midi| {
                let pitch_class = PitchClass::from_midi(midi);
                KeyState {
                    midi,
                    pitch_class,
                    title: format!("{}{}", pitch_class, octave_of(midi)),
                    is_black: pitch_class.is_sharp(),
                    locked: interval.is_some_and(|lock| !lock.contains(midi)),
                    active: active == Some(midi),
                }
            })
            .collect()
    }
}

/// Vertical staff position of a note: 0.0 at C3, 1.0 at C6 (not clamped)
pub fn staff_position(midi: i32) -> f64 {
    (midi - STAFF_LOW_MIDI) as f64 / (STAFF_HIGH_MIDI - STAFF_LOW_MIDI) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use vr_core::{freq_to_note, note_to_freq};

    fn observe(tracker: &mut SessionTracker, midi: f64) {
        tracker.observe(freq_to_note(note_to_freq(midi)).unwrap());
    }

    #[test]
    fn test_default_layout() {
        let layout = KeyboardLayout::default();
        let keys: Vec<i32> = layout.keys().collect();
        assert_eq!(keys.len(), 36);
        assert_eq!(keys[0], 48);
        assert_eq!(keys[35], 83);
        assert!(layout.contains(48));
        assert!(!layout.contains(84));
        assert!(!layout.contains(47));
    }

    #[test]
    fn test_key_labels() {
        let tracker = SessionTracker::default();
        let states = KeyboardLayout::default().key_states(&tracker);
        assert_eq!(states[0].title, "C3");
        assert!(!states[0].is_black);
        assert_eq!(states[1].title, "C#3");
        assert!(states[1].is_black);
        assert!(states.iter().all(|k| !k.locked && !k.active));
    }

    #[test]
    fn test_lock_marks_follow_range() {
        let mut tracker = SessionTracker::new(12, true);
        observe(&mut tracker, 60.0);
        observe(&mut tracker, 64.0);

        let states = KeyboardLayout::default().key_states(&tracker);
        let unlocked: Vec<i32> = states.iter().filter(|k| !k.locked).map(|k| k.midi).collect();
        assert_eq!(unlocked, vec![60, 61, 62, 63, 64]);

        let active: Vec<i32> = states.iter().filter(|k| k.active).map(|k| k.midi).collect();
        assert_eq!(active, vec![64]);
    }

    #[test]
    fn test_clear_resets_marks_but_keeps_lock() {
        let mut tracker = SessionTracker::new(12, true);
        observe(&mut tracker, 60.0);
        tracker.clear();

        let states = KeyboardLayout::default().key_states(&tracker);
        assert!(states.iter().all(|k| !k.locked && !k.active));
        assert!(tracker.lock_enabled());
    }

    #[test]
    fn test_toggling_lock_off_removes_marks() {
        let mut tracker = SessionTracker::new(12, true);
        observe(&mut tracker, 60.0);
        tracker.set_lock_enabled(false);

        let states = KeyboardLayout::default().key_states(&tracker);
        assert!(states.iter().all(|k| !k.locked));
    }

    #[test]
    fn test_staff_position() {
        assert_eq!(staff_position(48), 0.0);
        assert_eq!(staff_position(66), 0.5);
        assert_eq!(staff_position(84), 1.0);
    }
}
