use winit::window::{Window, WindowId};

use crate::device::Gpu;
use crate::geometry::GeometryStore;
use crate::input::{FrameActions, InputFrame, InputState, KeyBindings};
use crate::render::WgpuBackend;
use crate::window::{RuntimeCtx, WindowState};

/// Window handle plus the runtime's view of its extents.
pub struct WindowCtx<'a> {
    pub id: WindowId,
    pub window: &'a Window,
    pub state: &'a WindowState,
}

impl<'a> WindowCtx<'a> {
    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

/// Context passed to `core::App::on_init`.
pub struct InitCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    /// Clock reading at initialization, in seconds.
    pub seconds: f64,
}

impl<'a, 'w> InitCtx<'a, 'w> {
    /// Backend for creating programs before the first frame.
    pub fn backend<'s>(&'s mut self, geometry: &'s GeometryStore) -> WgpuBackend<'s, 'w> {
        WgpuBackend::new(self.gpu, geometry, self.window.window)
    }
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: &'a mut Gpu<'w>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub bindings: &'a KeyBindings,
    /// Clock reading for this frame, in seconds.
    pub seconds: f64,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Exit/reload/select requests from this frame's key presses.
    pub fn actions(&self) -> FrameActions {
        self.bindings.actions(self.input_frame)
    }

    /// Backend drawing into this window's surface.
    pub fn backend<'s>(&'s mut self, geometry: &'s GeometryStore) -> WgpuBackend<'s, 'w> {
        WgpuBackend::new(self.gpu, geometry, self.window.window)
    }
}
