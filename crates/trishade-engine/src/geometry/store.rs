use wgpu::util::DeviceExt;

use super::triangle::Triangle;

/// Opaque reference to geometry uploaded to a [`GeometryStore`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GeometryHandle(pub(crate) usize);

impl GeometryHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Vertex buffers of one uploaded mesh, one buffer per attribute.
pub(crate) struct GpuMesh {
    pub(crate) buffers: Vec<wgpu::Buffer>,
    pub(crate) vertex_count: u32,
}

/// Owns the GPU vertex buffers for every piece of static geometry.
///
/// Geometry is immutable once uploaded.
#[derive(Default)]
pub struct GeometryStore {
    meshes: Vec<GpuMesh>,
}

impl GeometryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads a triangle as one position buffer and one color buffer.
    pub fn upload_triangle(&mut self, device: &wgpu::Device, triangle: &Triangle) -> GeometryHandle {
        let index = self.meshes.len();
        let buffers = triangle
            .attribute_data()
            .iter()
            .enumerate()
            .map(|(attr, data)| {
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("trishade mesh {index} attr {attr}")),
                    contents: bytemuck::cast_slice(data.as_slice()),
                    usage: wgpu::BufferUsages::VERTEX,
                })
            })
            .collect();

        self.meshes.push(GpuMesh {
            buffers,
            vertex_count: Triangle::VERTEX_COUNT,
        });
        log::debug!("uploaded triangle geometry {index}");
        GeometryHandle(index)
    }

    pub(crate) fn mesh(&self, handle: GeometryHandle) -> Option<&GpuMesh> {
        self.meshes.get(handle.0)
    }
}
