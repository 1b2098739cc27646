//! Color values shared by the frame loop, uniforms and the GPU backend.

mod color;

pub use color::Color;
