//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single Window, wires them to the GPU
//! layer and keeps [`WindowState`] in sync with resize/close notifications.

mod runtime;
mod state;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
pub use state::{DEFAULT_EXTENT, ResizeEvent, WindowState};
