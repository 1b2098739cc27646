use std::num::NonZeroU64;

use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::coords::{Extent, ViewportRect};
use crate::device::{DEPTH_FORMAT, Gpu, GpuFrame, SurfaceErrorAction};
use crate::geometry::{GeometryHandle, GeometryStore, VertexLayout};
use crate::paint::Color;
use crate::shader::{
    LinkedProgram, ProgramBackend, ShaderError, UniformLocation, UniformLocations,
};

use super::backend::{FrameBackend, FrameStatus};
use super::ctx::{RenderCtx, RenderTarget};

const UNIFORM_SIZE: u64 = std::mem::size_of::<[f32; 4]>() as u64;

/// GPU side of one shader program: the render pipeline plus one uniform
/// buffer per semantic uniform.
pub struct WgpuProgram {
    label: String,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffers: Vec<(UniformLocation, wgpu::Buffer)>,
}

impl WgpuProgram {
    pub fn label(&self) -> &str {
        &self.label
    }

    fn uniform_buffer(&self, location: UniformLocation) -> Option<&wgpu::Buffer> {
        self.uniform_buffers
            .iter()
            .find(|(l, _)| *l == location)
            .map(|(_, b)| b)
    }
}

impl std::fmt::Debug for WgpuProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuProgram")
            .field("label", &self.label)
            .field("uniforms", &self.uniform_buffers.len())
            .finish()
    }
}

/// wgpu implementation of [`ProgramBackend`] and [`FrameBackend`].
///
/// Borrows the GPU context for the duration of one callback. A frame in
/// progress is submitted by [`FrameBackend::end_frame`]; if the backend is
/// dropped first the frame is discarded.
pub struct WgpuBackend<'a, 'w> {
    gpu: &'a mut Gpu<'w>,
    geometry: &'a GeometryStore,
    window: &'a Window,
    frame: Option<GpuFrame>,
    viewport: Option<ViewportRect>,
}

impl<'a, 'w> WgpuBackend<'a, 'w> {
    pub fn new(gpu: &'a mut Gpu<'w>, geometry: &'a GeometryStore, window: &'a Window) -> Self {
        Self {
            gpu,
            geometry,
            window,
            frame: None,
            viewport: None,
        }
    }

    fn ctx(&self) -> RenderCtx<'_> {
        RenderCtx::new(self.gpu.device(), self.gpu.surface_format(), DEPTH_FORMAT)
    }
}

impl ProgramBackend for WgpuBackend<'_, '_> {
    type Program = WgpuProgram;

    fn create_program(
        &mut self,
        program: LinkedProgram,
        uniforms: &UniformLocations,
        layout: &VertexLayout,
    ) -> Result<WgpuProgram, ShaderError> {
        let ctx = self.ctx();
        let label = program.label().to_string();

        // wgpu reports invalid descriptors through the device's error handler,
        // which panics by default. Capture them so a bad reload stays an error.
        let scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let modules: Vec<wgpu::ShaderModule> = program
            .stages()
            .iter()
            .map(|stage| {
                ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some(stage.label()),
                    source: wgpu::ShaderSource::Wgsl(stage.source().into()),
                })
            })
            .collect();

        let bgl_entries: Vec<wgpu::BindGroupLayoutEntry> = uniforms
            .iter()
            .map(|(_, location)| wgpu::BindGroupLayoutEntry {
                binding: location.binding,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(UNIFORM_SIZE),
                },
                count: None,
            })
            .collect();

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{label} bgl")),
            entries: &bgl_entries,
        });

        let uniform_buffers: Vec<(UniformLocation, wgpu::Buffer)> = uniforms
            .iter()
            .map(|(uniform, location)| {
                let buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{label} {}", uniform.name())),
                    contents: bytemuck::cast_slice(&[0.0f32; 4]),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
                (location, buffer)
            })
            .collect();

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} bind group")),
            layout: &bind_group_layout,
            entries: &uniform_buffers
                .iter()
                .map(|(location, buffer)| wgpu::BindGroupEntry {
                    binding: location.binding,
                    resource: buffer.as_entire_binding(),
                })
                .collect::<Vec<_>>(),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} pipeline layout")),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        // One buffer slot per attribute, in layout order.
        let attributes: Vec<[wgpu::VertexAttribute; 1]> = layout
            .attributes()
            .iter()
            .map(|a| {
                [wgpu::VertexAttribute {
                    format: a.wgpu_format(),
                    offset: 0,
                    shader_location: a.location,
                }]
            })
            .collect();
        let buffers: Vec<wgpu::VertexBufferLayout<'_>> = layout
            .attributes()
            .iter()
            .zip(attributes.iter())
            .map(|(a, attrs)| wgpu::VertexBufferLayout {
                array_stride: a.stride(),
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: attrs,
            })
            .collect();

        let [vertex_stage, fragment_stage] = program.stages();
        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{label} pipeline")),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &modules[0],
                entry_point: Some(vertex_stage.entry_point_name()),
                compilation_options: Default::default(),
                buffers: &buffers,
            },
            fragment: Some(wgpu::FragmentState {
                module: &modules[1],
                entry_point: Some(fragment_stage.entry_point_name()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: ctx.depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(scope.pop()) {
            return Err(ShaderError::Backend {
                program: label,
                log: err.to_string(),
            });
        }

        log::debug!("created pipeline for '{label}' ({:?})", ctx.surface_format);

        Ok(WgpuProgram {
            label,
            pipeline,
            bind_group,
            uniform_buffers,
        })
    }
}

impl FrameBackend for WgpuBackend<'_, '_> {
    fn begin_frame(&mut self, clear: Color) -> FrameStatus {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => FrameStatus::Fatal,
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        FrameStatus::Skip
                    }
                };
            }
        };

        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view, self.gpu.depth_view());
            let _rpass = target.begin_pass("trishade clear", Some(clear.to_wgpu()));
        }

        self.frame = Some(frame);
        self.viewport = None;
        FrameStatus::Ready
    }

    fn set_viewport(&mut self, viewport: ViewportRect) {
        // The framebuffer extent can run ahead of the surface for one frame
        // during a resize; wgpu rejects viewports outside the target.
        self.viewport = viewport.clipped_to(Extent::from(self.gpu.size()));
    }

    fn write_uniform(&mut self, program: &WgpuProgram, location: UniformLocation, value: [f32; 4]) {
        match program.uniform_buffer(location) {
            Some(buffer) => self
                .gpu
                .queue()
                .write_buffer(buffer, 0, bytemuck::cast_slice(&value)),
            None => log::warn!(
                "program '{}' has no uniform at group {} binding {}",
                program.label,
                location.group,
                location.binding
            ),
        }
    }

    fn draw(&mut self, program: &WgpuProgram, geometry: GeometryHandle) {
        let Some(frame) = self.frame.as_mut() else { return; };
        let Some(viewport) = self.viewport else { return; };
        let Some(mesh) = self.geometry.mesh(geometry) else {
            log::warn!("draw with unknown geometry {}", geometry.index());
            return;
        };

        let mut target = RenderTarget::new(&mut frame.encoder, &frame.view, self.gpu.depth_view());
        let mut rpass = target.begin_pass("trishade draw", None);

        rpass.set_viewport(
            viewport.x as f32,
            viewport.y as f32,
            viewport.width as f32,
            viewport.height as f32,
            0.0,
            1.0,
        );
        rpass.set_pipeline(&program.pipeline);
        rpass.set_bind_group(0, &program.bind_group, &[]);
        for (slot, buffer) in mesh.buffers.iter().enumerate() {
            rpass.set_vertex_buffer(slot as u32, buffer.slice(..));
        }
        rpass.draw(0..mesh.vertex_count, 0..1);
    }

    fn end_frame(&mut self) {
        if let Some(frame) = self.frame.take() {
            self.window.pre_present_notify();
            self.gpu.submit(frame);
        }
    }
}
