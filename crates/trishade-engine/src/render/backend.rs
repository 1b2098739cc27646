use crate::coords::ViewportRect;
use crate::geometry::GeometryHandle;
use crate::paint::Color;
use crate::shader::{ProgramBackend, UniformLocation};

/// Outcome of starting a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    /// A surface image was acquired and cleared; draws may follow.
    Ready,
    /// No image this frame (surface reconfigured, timeout); nothing is drawn.
    Skip,
    /// The surface cannot be used any more.
    Fatal,
}

/// Per-frame drawing operations on top of program creation.
///
/// Call order within a frame: `begin_frame`, then any number of
/// `set_viewport` / `write_uniform` / `draw`, then `end_frame`. When
/// `begin_frame` does not return [`FrameStatus::Ready`] the frame is over.
pub trait FrameBackend: ProgramBackend {
    /// Acquires the next surface image and clears it to `clear`.
    fn begin_frame(&mut self, clear: Color) -> FrameStatus;

    /// Viewport used by subsequent draws, in framebuffer pixels.
    fn set_viewport(&mut self, viewport: ViewportRect);

    /// Uploads one uniform value for `program`.
    fn write_uniform(&mut self, program: &Self::Program, location: UniformLocation, value: [f32; 4]);

    /// Draws `geometry` with `program`.
    fn draw(&mut self, program: &Self::Program, geometry: GeometryHandle);

    /// Submits recorded work and presents the image.
    fn end_frame(&mut self);
}
