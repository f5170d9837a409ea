//! Terminal presenter

use vr_core::{AudioFrame, VrError};
use vr_session::{PitchSink, TickOutcome};

/// Prints one line per frame
pub struct ConsoleSink {
    sample_rate: u32,
    frame_index: usize,
    frame_len: usize,
    /// Also print frames with no accepted note
    verbose: bool,
}

impl ConsoleSink {
    pub fn new(verbose: bool) -> Self {
        Self {
            sample_rate: 0,
            frame_index: 0,
            frame_len: 0,
            verbose,
        }
    }

    fn timestamp(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        (self.frame_index * self.frame_len) as f64 / self.sample_rate as f64
    }
}

impl PitchSink for ConsoleSink {
    fn on_frame(&mut self, frame: &AudioFrame) {
        self.sample_rate = frame.sample_rate();
        self.frame_len = frame.len();
    }

    fn on_tick(&mut self, outcome: &TickOutcome) {
        let show = self.verbose || matches!(outcome, TickOutcome::Note(_));
        if show {
            let cents = outcome
                .note()
                .map_or_else(String::new, |n| format!(" {:+.0}c", n.cents_offset()));
            println!(
                "{:>8.3}s  {:<4} {:>10}{:<6}  {}",
                self.timestamp(),
                outcome.note_label(),
                outcome.freq_label(),
                cents,
                outcome.confidence().label()
            );
        }
        self.frame_index += 1;
    }

    fn on_clear(&mut self) {
        println!("-- cleared --");
    }

    fn on_error(&mut self, error: &VrError) {
        eprintln!("error: {}", error);
    }
}
