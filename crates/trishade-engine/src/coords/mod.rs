//! Extents and viewport rectangles.
//!
//! Window extents are in screen units, framebuffer extents and viewports in
//! physical pixels.

mod viewport;

pub use viewport::{Extent, ViewportRect};
