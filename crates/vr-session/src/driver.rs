//! Capture driver
//!
//! Caller-driven tick loop with an explicit Idle/Running state machine.
//! Each `tick()` pulls one frame, runs the pipeline and pushes the outcome to
//! the sink; nothing happens while idle.

use serde::{Deserialize, Serialize};
use vr_core::{VocalRangeConfig, VrError, VrResult};

use crate::pipeline::{PitchPipeline, TickOutcome};
use crate::source::{FrameSource, PitchSink};
use crate::tracker::SessionTracker;

/// Capture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverState {
    Idle,
    Running,
}

/// Owns the source, sink, pipeline and session for one capture session
pub struct SessionDriver<S: FrameSource, K: PitchSink> {
    source: S,
    sink: K,
    pipeline: PitchPipeline,
    tracker: SessionTracker,
    state: DriverState,
}

impl<S: FrameSource, K: PitchSink> SessionDriver<S, K> {
    pub fn new(source: S, sink: K, pipeline: PitchPipeline, tracker: SessionTracker) -> Self {
        Self {
            source,
            sink,
            pipeline,
            tracker,
            state: DriverState::Idle,
        }
    }

    pub fn from_config(source: S, sink: K, config: &VocalRangeConfig) -> VrResult<Self> {
        config.validate()?;
        Ok(Self::new(
            source,
            sink,
            PitchPipeline::from_config(config)?,
            SessionTracker::from_config(config),
        ))
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Acquire the source and begin ticking; no-op while already running.
    ///
    /// Acquisition failures are reported to the sink once and surface as
    /// [`VrError::CaptureUnavailable`]; the driver stays idle.
    pub fn start(&mut self) -> VrResult<()> {
        if self.is_running() {
            log::debug!("start() ignored: already running");
            return Ok(());
        }

        if let Err(err) = self.source.start() {
            let err = match err {
                VrError::CaptureUnavailable(_) => err,
                other => VrError::CaptureUnavailable(other.to_string()),
            };
            log::error!("Failed to start capture: {}", err);
            self.sink.on_error(&err);
            return Err(err);
        }

        self.state = DriverState::Running;
        log::info!("Capture started");
        Ok(())
    }

    /// Release the source; no-op while idle
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.source.stop();
        self.state = DriverState::Idle;
        log::info!("Capture stopped");
    }

    /// Process one frame.
    ///
    /// Returns `None` while idle, or when the source ran dry (the driver then
    /// stops itself).
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if !self.is_running() {
            return None;
        }

        let Some(frame) = self.source.next_frame() else {
            log::info!("Frame source exhausted");
            self.stop();
            return None;
        };

        self.sink.on_frame(&frame);
        let outcome = self.pipeline.process(&frame, &mut self.tracker);
        self.sink.on_tick(&outcome);
        Some(outcome)
    }

    /// Tick until the source is exhausted or the driver is stopped; returns
    /// the number of frames processed
    pub fn run(&mut self) -> usize {
        let mut ticks = 0;
        while self.tick().is_some() {
            ticks += 1;
        }
        ticks
    }

    /// Reset the session; capture state is unaffected
    pub fn clear(&mut self) {
        self.tracker.clear();
        self.sink.on_clear();
    }

    pub fn set_lock_enabled(&mut self, enabled: bool) {
        self.tracker.set_lock_enabled(enabled);
    }

    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    pub fn pipeline(&self) -> &PitchPipeline {
        &self.pipeline
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Stop capture and hand back the parts
    pub fn into_parts(mut self) -> (S, K, SessionTracker) {
        self.stop();
        (self.source, self.sink, self.tracker)
    }
}
