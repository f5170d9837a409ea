//! Frame sources and display sinks
//!
//! The capture side and the display side of the pipeline are both outside
//! the core; these traits are the seams.

use vr_core::{AudioFrame, VrError, VrResult};

use crate::pipeline::TickOutcome;

/// Pull-based supplier of audio frames
pub trait FrameSource {
    /// Acquire the underlying device or stream
    fn start(&mut self) -> VrResult<()>;

    /// Release the device or stream
    fn stop(&mut self);

    /// Next frame, or `None` once the source is exhausted
    fn next_frame(&mut self) -> Option<AudioFrame>;
}

/// Push-based consumer of tick results
pub trait PitchSink {
    /// Raw frame for waveform drawing, delivered before its outcome
    fn on_frame(&mut self, _frame: &AudioFrame) {}

    fn on_tick(&mut self, outcome: &TickOutcome);

    /// Session was cleared
    fn on_clear(&mut self) {}

    /// Capture could not be started
    fn on_error(&mut self, _error: &VrError) {}
}

/// Source that slices an in-memory mono buffer into consecutive frames.
///
/// Frames do not overlap; a trailing partial frame is dropped.
#[derive(Debug, Clone)]
pub struct BufferSource {
    samples: Vec<f32>,
    sample_rate: u32,
    frame_size: usize,
    position: usize,
    started: bool,
}

impl BufferSource {
    pub fn new(samples: Vec<f32>, sample_rate: u32, frame_size: usize) -> VrResult<Self> {
        if sample_rate == 0 {
            return Err(VrError::InvalidSampleRate(sample_rate));
        }
        if frame_size == 0 {
            return Err(VrError::InvalidConfig("frame_size must be non-zero".to_string()));
        }
        Ok(Self {
            samples,
            sample_rate,
            frame_size,
            position: 0,
            started: false,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Frames left to deliver
    pub fn remaining_frames(&self) -> usize {
        (self.samples.len() - self.position.min(self.samples.len())) / self.frame_size
    }
}

impl FrameSource for BufferSource {
    fn start(&mut self) -> VrResult<()> {
        self.started = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.started = false;
    }

    fn next_frame(&mut self) -> Option<AudioFrame> {
        if !self.started || self.remaining_frames() == 0 {
            return None;
        }
        let end = self.position + self.frame_size;
        let frame = AudioFrame::new(self.samples[self.position..end].to_vec(), self.sample_rate).ok();
        self.position = end;
        frame
    }
}
