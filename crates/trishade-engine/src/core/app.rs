use winit::event::WindowEvent;

use super::ctx::{FrameCtx, InitCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called once after the window and GPU context have been created.
    ///
    /// An error stops the runtime; [`crate::window::Runtime::run`] returns it.
    fn on_init(&mut self, ctx: &mut InitCtx<'_, '_>) -> anyhow::Result<()>;

    /// Called for every window event, after the runtime has applied it to the
    /// input and window state.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
