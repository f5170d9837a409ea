//! Per-tick pipeline: estimate → filter → map → track

use serde::{Deserialize, Serialize};
use vr_core::{AudioFrame, Note, VocalRangeConfig, VrResult, freq_to_note};
use vr_pitch::{AutocorrelationEstimator, PitchEstimate, RangeFilter};

use crate::range::{LockInterval, PLACEHOLDER, RangeSummary};
use crate::tracker::SessionTracker;

/// Confidence label shown next to the current note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    Good,
    OutOfRange,
    NoSignal,
}

impl Confidence {
    pub fn label(self) -> &'static str {
        match self {
            Confidence::Good => "Good",
            Confidence::OutOfRange => "Out of range",
            Confidence::NoSignal => PLACEHOLDER,
        }
    }
}

/// Presenter payload for an accepted note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteReport {
    pub note: Note,
    pub summary: RangeSummary,
    /// Newest first
    pub history: Vec<Note>,
    /// Present only while lock is enabled
    pub lock: Option<LockInterval>,
}

/// What one tick produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Silence, unvoiced or degenerate frame
    NoPitch,
    /// Pitched, but outside the vocal band; the session was not touched
    OutOfRange { freq: f64 },
    /// Accepted note and the updated session view
    Note(NoteReport),
}

impl TickOutcome {
    pub fn confidence(&self) -> Confidence {
        match self {
            TickOutcome::NoPitch => Confidence::NoSignal,
            TickOutcome::OutOfRange { .. } => Confidence::OutOfRange,
            TickOutcome::Note(_) => Confidence::Good,
        }
    }

    pub fn note(&self) -> Option<&Note> {
        match self {
            TickOutcome::Note(report) => Some(&report.note),
            _ => None,
        }
    }

    /// Current note display, e.g. `"A3"`, or the placeholder
    pub fn note_label(&self) -> String {
        self.note()
            .map_or_else(|| PLACEHOLDER.to_string(), |n| n.to_string())
    }

    /// Current frequency display, e.g. `"220.0 Hz"`, or `"— Hz"`
    pub fn freq_label(&self) -> String {
        match self.note() {
            Some(note) => format!("{:.1} Hz", note.freq),
            None => format!("{} Hz", PLACEHOLDER),
        }
    }
}

/// Stateless part of the tick: estimator plus band filter
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PitchPipeline {
    estimator: AutocorrelationEstimator,
    filter: RangeFilter,
}

impl PitchPipeline {
    pub fn new(estimator: AutocorrelationEstimator, filter: RangeFilter) -> Self {
        Self { estimator, filter }
    }

    pub fn from_config(config: &VocalRangeConfig) -> VrResult<Self> {
        Ok(Self::new(
            AutocorrelationEstimator::from_config(config),
            RangeFilter::from_config(config)?,
        ))
    }

    pub fn estimator(&self) -> &AutocorrelationEstimator {
        &self.estimator
    }

    pub fn filter(&self) -> &RangeFilter {
        &self.filter
    }

    /// Run one frame through the pipeline, updating `tracker` on acceptance
    pub fn process(&self, frame: &AudioFrame, tracker: &mut SessionTracker) -> TickOutcome {
        let freq = match self.estimator.estimate(frame) {
            PitchEstimate::Frequency(freq) => freq,
            PitchEstimate::NoPitch => return TickOutcome::NoPitch,
        };

        if !self.filter.accept(freq) {
            log::debug!(
                "Rejected {:.1} Hz outside {:.0}-{:.0} Hz",
                freq,
                self.filter.min_freq(),
                self.filter.max_freq()
            );
            return TickOutcome::OutOfRange { freq };
        }

        let Some(note) = freq_to_note(freq) else {
            return TickOutcome::NoPitch;
        };

        tracker.observe(note);

        TickOutcome::Note(NoteReport {
            note,
            summary: tracker.summary(),
            history: tracker.history().to_vec(),
            lock: tracker.lock_interval(),
        })
    }
}
