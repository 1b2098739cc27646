/// Width/height pair in whole units (screen units or physical pixels,
/// depending on the source).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Zero-area extents occur while a window is minimized.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for Extent {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Viewport rectangle in framebuffer pixels, origin at the top-left corner.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct ViewportRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ViewportRect {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Full-target viewport `(0, 0, W, H)` for a framebuffer extent.
    #[inline]
    pub const fn covering(extent: Extent) -> Self {
        Self::new(0, 0, extent.width, extent.height)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clips the rectangle to a target of the given size.
    ///
    /// Returns `None` when nothing of the rectangle remains visible.
    pub fn clipped_to(self, target: Extent) -> Option<Self> {
        let x = self.x.min(target.width);
        let y = self.y.min(target.height);
        let x2 = self.x.saturating_add(self.width).min(target.width);
        let y2 = self.y.saturating_add(self.height).min(target.height);
        let r = Self::new(x, y, x2 - x, y2 - y);
        if r.is_empty() { None } else { Some(r) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covering_starts_at_origin() {
        let v = ViewportRect::covering(Extent::new(800, 600));
        assert_eq!(v, ViewportRect::new(0, 0, 800, 600));
    }

    #[test]
    fn clipped_to_larger_target_is_identity() {
        let v = ViewportRect::new(0, 0, 400, 300);
        assert_eq!(v.clipped_to(Extent::new(800, 600)), Some(v));
    }

    #[test]
    fn clipped_to_smaller_target_shrinks() {
        let v = ViewportRect::new(0, 0, 800, 600);
        assert_eq!(
            v.clipped_to(Extent::new(400, 300)),
            Some(ViewportRect::new(0, 0, 400, 300))
        );
    }

    #[test]
    fn clipped_to_empty_target_is_none() {
        let v = ViewportRect::new(0, 0, 800, 600);
        assert!(v.clipped_to(Extent::new(0, 300)).is_none());
    }

    #[test]
    fn extent_is_empty_when_minimized() {
        assert!(Extent::new(0, 0).is_empty());
        assert!(!Extent::new(1, 1).is_empty());
    }
}
