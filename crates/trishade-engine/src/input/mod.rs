//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code is responsible for translating platform events into `InputEvent`s.

mod bindings;
mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use bindings::{FrameActions, KeyBindings};
pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
