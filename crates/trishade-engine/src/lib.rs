//! trishade engine crate.
//!
//! Shader program lifecycle (compile, link, validate, uniform binding, a
//! fixed-capacity registry with hot reload) and the frame loop that draws the
//! active program, plus the platform + GPU runtime pieces they run on.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod frame_loop;
pub mod geometry;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shader;

#[cfg(test)]
mod testing;
