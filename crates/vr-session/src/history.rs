//! Bounded recent-note history

use std::collections::VecDeque;
use vr_core::{DEFAULT_HISTORY_LIMIT, Note};

/// The last `limit` accepted notes.
///
/// Stored oldest-first; exposed newest-first.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteHistory {
    entries: VecDeque<Note>,
    limit: usize,
}

impl Default for NoteHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl NoteHistory {
    /// Create history holding at most `limit` notes (at least one)
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit + 1),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Append a note, evicting the oldest once over the limit
    pub fn push(&mut self, note: Note) {
        self.entries.push_back(note);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    /// Most recent note
    pub fn newest(&self) -> Option<&Note> {
        self.entries.back()
    }

    /// Iterate newest first
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.entries.iter().rev()
    }

    /// Newest-first copy for the presenter
    pub fn to_vec(&self) -> Vec<Note> {
        self.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
