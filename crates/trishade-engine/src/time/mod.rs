//! Time subsystem.
//!
//! - `FrameClock`: one per window; monotonic seconds for the frame loop
//! - `FrameTimer`: turns frame ticks into a periodic frames-per-second sample

mod fps;
mod frame_clock;

pub use fps::{DEFAULT_SAMPLE_INTERVAL, FpsSample, FrameTimer, MIN_SAMPLE_INTERVAL, fps_title};
pub use frame_clock::FrameClock;
