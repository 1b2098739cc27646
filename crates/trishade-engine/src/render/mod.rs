//! GPU rendering subsystem.
//!
//! [`FrameBackend`] is the drawing seam used by the frame loop; [`WgpuBackend`]
//! implements it (and [`crate::shader::ProgramBackend`]) on top of wgpu.
//!
//! Convention: geometry arrives in clip space, the viewport is in framebuffer
//! pixels.

mod backend;
mod ctx;
mod wgpu_backend;

pub use backend::{FrameBackend, FrameStatus};
pub use ctx::{RenderCtx, RenderTarget};
pub use wgpu_backend::{WgpuBackend, WgpuProgram};
