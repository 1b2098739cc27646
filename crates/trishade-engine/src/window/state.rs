use crate::coords::{Extent, ViewportRect};

/// Default window and framebuffer extent.
pub const DEFAULT_EXTENT: Extent = Extent::new(640, 480);

/// Resize notification delivered by the platform layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResizeEvent {
    /// Window size in screen units.
    Window(Extent),
    /// Drawable size in physical pixels.
    Framebuffer(Extent),
}

/// Live mirror of the window's extents and close request.
///
/// Mutated only through [`WindowState::apply`] and
/// [`WindowState::request_close`], both called on the event-loop thread
/// between frames; the frame loop reads it once per frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WindowState {
    window: Extent,
    framebuffer: Extent,
    close_requested: bool,
}

impl WindowState {
    pub fn new(initial: Extent) -> Self {
        Self {
            window: initial,
            framebuffer: initial,
            close_requested: false,
        }
    }

    pub fn apply(&mut self, event: ResizeEvent) {
        match event {
            ResizeEvent::Window(extent) => self.window = extent,
            ResizeEvent::Framebuffer(extent) => {
                if extent != self.framebuffer {
                    log::debug!("framebuffer resized to {}x{}", extent.width, extent.height);
                }
                self.framebuffer = extent;
            }
        }
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    pub fn window_extent(&self) -> Extent {
        self.window
    }

    pub fn framebuffer_extent(&self) -> Extent {
        self.framebuffer
    }

    /// Viewport covering the latest framebuffer extent.
    pub fn viewport(&self) -> ViewportRect {
        ViewportRect::covering(self.framebuffer)
    }
}

impl Default for WindowState {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_default_extent() {
        let state = WindowState::default();
        assert_eq!(state.window_extent(), DEFAULT_EXTENT);
        assert_eq!(state.framebuffer_extent(), DEFAULT_EXTENT);
        assert!(!state.close_requested());
    }

    #[test]
    fn extents_are_tracked_independently() {
        let mut state = WindowState::default();
        state.apply(ResizeEvent::Window(Extent::new(400, 300)));
        state.apply(ResizeEvent::Framebuffer(Extent::new(800, 600)));

        assert_eq!(state.window_extent(), Extent::new(400, 300));
        assert_eq!(state.framebuffer_extent(), Extent::new(800, 600));
        assert_eq!(state.viewport(), ViewportRect::new(0, 0, 800, 600));
    }

    #[test]
    fn latest_framebuffer_resize_wins() {
        let mut state = WindowState::default();
        state.apply(ResizeEvent::Framebuffer(Extent::new(800, 600)));
        state.apply(ResizeEvent::Framebuffer(Extent::new(400, 300)));
        assert_eq!(state.viewport(), ViewportRect::new(0, 0, 400, 300));
    }
}
