/// Straight-alpha RGBA color in linear space.
///
/// This is the value type pushed into `vec4<f32>` shader uniforms and used for
/// the frame clear color.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Layout used for uniform uploads (`vec4<f32>`).
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

impl From<[f32; 4]> for Color {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_round_trips_through_from() {
        let c = Color::new(0.6, 0.6, 0.8, 1.0);
        assert_eq!(Color::from(c.to_array()), c);
    }

    #[test]
    fn wgpu_conversion_widens_channels() {
        let w = Color::new(0.5, 0.25, 0.0, 1.0).to_wgpu();
        assert_eq!((w.r, w.g, w.b, w.a), (0.5, 0.25, 0.0, 1.0));
    }
}
