/// A single triangle with one xyz position and one rgb color per vertex.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Triangle {
    pub positions: [[f32; 3]; 3],
    pub colors: [[f32; 3]; 3],
}

impl Triangle {
    pub const VERTEX_COUNT: u32 = 3;

    pub const fn new(positions: [[f32; 3]; 3], colors: [[f32; 3]; 3]) -> Self {
        Self { positions, colors }
    }

    /// Apex up, centered on the origin.
    pub const UPRIGHT: Triangle = Triangle::new(
        [[0.0, 0.5, 0.0], [0.5, -0.5, 0.0], [-0.5, -0.5, 0.0]],
        [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
    );

    /// Apex down, mirrored from [`Triangle::UPRIGHT`].
    pub const INVERTED: Triangle = Triangle::new(
        [[0.0, -0.5, 0.0], [-0.5, 0.5, 0.0], [0.5, 0.5, 0.0]],
        [[0.8, 0.0, 0.0], [0.0, 0.8, 0.0], [1.0, 0.0, 0.0]],
    );

    /// Per-attribute vertex data in layout order: positions then colors.
    pub fn attribute_data(&self) -> [&[[f32; 3]; 3]; 2] {
        [&self.positions, &self.colors]
    }
}
