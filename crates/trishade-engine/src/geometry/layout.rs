/// One float vector attribute fed from its own vertex buffer slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct VertexAttributeDesc {
    /// Shader `@location`.
    pub location: u32,
    /// Number of `f32` components (1–4).
    pub components: u8,
}

impl VertexAttributeDesc {
    pub const fn new(location: u32, components: u8) -> Self {
        Self { location, components }
    }

    pub fn wgpu_format(self) -> wgpu::VertexFormat {
        match self.components {
            1 => wgpu::VertexFormat::Float32,
            2 => wgpu::VertexFormat::Float32x2,
            3 => wgpu::VertexFormat::Float32x3,
            _ => wgpu::VertexFormat::Float32x4,
        }
    }

    pub fn stride(self) -> wgpu::BufferAddress {
        (self.components as usize * std::mem::size_of::<f32>()) as wgpu::BufferAddress
    }
}

/// Vertex input layout shared by every program in the registry.
///
/// Attribute `i` is bound from vertex buffer slot `i`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttributeDesc>,
}

impl VertexLayout {
    pub fn new(attributes: Vec<VertexAttributeDesc>) -> Self {
        Self { attributes }
    }

    /// `@location(0)` xyz position, `@location(1)` rgb color.
    pub fn position_color() -> Self {
        Self::new(vec![
            VertexAttributeDesc::new(0, 3),
            VertexAttributeDesc::new(1, 3),
        ])
    }

    pub fn attributes(&self) -> &[VertexAttributeDesc] {
        &self.attributes
    }

    pub fn attribute(&self, location: u32) -> Option<VertexAttributeDesc> {
        self.attributes.iter().copied().find(|a| a.location == location)
    }
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self::position_color()
    }
}
