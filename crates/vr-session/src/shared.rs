//! Tracker shared across threads
//!
//! One mutex guards the whole tracker, so `observe` and `clear` are each a
//! single critical section.

use parking_lot::Mutex;
use std::sync::Arc;
use vr_core::Note;

use crate::range::RangeSummary;
use crate::tracker::SessionTracker;

/// Cloneable handle to a mutex-guarded [`SessionTracker`]
#[derive(Debug, Clone, Default)]
pub struct SharedTracker {
    inner: Arc<Mutex<SessionTracker>>,
}

impl SharedTracker {
    pub fn new(tracker: SessionTracker) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    pub fn observe(&self, note: Note) {
        self.inner.lock().observe(note);
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn summary(&self) -> RangeSummary {
        self.inner.lock().summary()
    }

    /// Run `f` with exclusive access
    pub fn with<R>(&self, f: impl FnOnce(&mut SessionTracker) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SessionTracker {
        self.inner.lock().clone()
    }
}
