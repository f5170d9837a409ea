//! vr-session: Vocal range session tracking
//!
//! Everything stateful in VocalRange lives here:
//! - `SessionTracker`: running min/max, recent notes, range lock
//! - `PitchPipeline`: per-tick estimate → filter → note → tracker
//! - `SessionDriver`: Idle/Running capture state machine over a `FrameSource`
//! - `SharedTracker`: mutex-guarded tracker for multi-threaded hosts

pub mod driver;
pub mod history;
pub mod keyboard;
pub mod pipeline;
pub mod range;
pub mod shared;
pub mod source;
pub mod tracker;

pub use driver::{DriverState, SessionDriver};
pub use history::NoteHistory;
pub use keyboard::{KeyState, KeyboardLayout, staff_position};
pub use pipeline::{Confidence, NoteReport, PitchPipeline, TickOutcome};
pub use range::{LockInterval, RangeBound, RangeSummary, SessionRange};
pub use shared::SharedTracker;
pub use source::{BufferSource, FrameSource, PitchSink};
pub use tracker::SessionTracker;
