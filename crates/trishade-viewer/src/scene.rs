use trishade_engine::geometry::Triangle;
use trishade_engine::paint::Color;

/// One registry slot of the viewer scene.
pub struct SceneProgram {
    pub slot: usize,
    pub label: &'static str,
    pub vertex: &'static str,
    pub fragment: &'static str,
    pub triangle: Triangle,
    pub color: Color,
}

/// Slot 0 is active at startup.
pub const PROGRAMS: [SceneProgram; 2] = [
    SceneProgram {
        slot: 0,
        label: "upright",
        vertex: "triangle.vert.wgsl",
        fragment: "triangle.frag.wgsl",
        triangle: Triangle::UPRIGHT,
        color: Color::new(1.0, 1.0, 1.0, 1.0),
    },
    SceneProgram {
        slot: 1,
        label: "inverted",
        vertex: "triangle.vert.wgsl",
        fragment: "inverted.frag.wgsl",
        triangle: Triangle::INVERTED,
        color: Color::new(0.2, 0.4, 1.0, 1.0),
    },
];
