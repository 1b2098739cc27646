//! Frame loop coordinator.
//!
//! [`FrameLoop`] owns the program registry and decides, once per frame, what
//! to draw: it applies exit/reload/select requests, samples throughput, then
//! clears, sets the viewport from the latest framebuffer extent, uploads
//! dirty uniforms and draws through a [`crate::render::FrameBackend`].

mod config;
mod coordinator;

pub use config::{DrawMode, FrameLoopConfig, ReloadPolicy};
pub use coordinator::{FrameInput, FrameLoop, FrameReport, LoopState, ReloadOutcome};
