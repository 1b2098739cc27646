//! Test doubles shared by the registry and frame loop tests.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::coords::ViewportRect;
use crate::geometry::{GeometryHandle, VertexLayout};
use crate::paint::Color;
use crate::render::{FrameBackend, FrameStatus};
use crate::shader::fixtures;
use crate::shader::{
    LinkedProgram, ProgramBackend, ProgramSources, ShaderError, UniformLocation, UniformLocations,
};

/// Backend call, in the order it was made.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateProgram { label: String, handle: u32 },
    BeginFrame(Color),
    SetViewport(ViewportRect),
    WriteUniform { program: u32, location: UniformLocation, value: [f32; 4] },
    Draw { program: u32, geometry: GeometryHandle },
    EndFrame,
}

/// Backend without a GPU: programs are numbered handles and every call is
/// recorded.
#[derive(Debug)]
pub struct RecordingBackend {
    next_handle: u32,
    calls: Vec<Call>,
    fail_next: Option<String>,
    frame_status: FrameStatus,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            next_handle: 1,
            calls: Vec::new(),
            fail_next: None,
            frame_status: FrameStatus::Ready,
        }
    }
}

impl RecordingBackend {
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn programs_created(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::CreateProgram { .. }))
            .count()
    }

    /// The next `create_program` fails with a backend error carrying `log`.
    pub fn fail_next_program(&mut self, log: &str) {
        self.fail_next = Some(log.to_string());
    }

    /// Status returned by every following `begin_frame`.
    pub fn set_frame_status(&mut self, status: FrameStatus) {
        self.frame_status = status;
    }

    pub fn draws(&self) -> Vec<(u32, GeometryHandle)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Draw { program, geometry } => Some((*program, *geometry)),
                _ => None,
            })
            .collect()
    }

    pub fn viewports(&self) -> Vec<ViewportRect> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SetViewport(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn uniform_writes(&self) -> Vec<(u32, [f32; 4])> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::WriteUniform { program, value, .. } => Some((*program, *value)),
                _ => None,
            })
            .collect()
    }
}

impl ProgramBackend for RecordingBackend {
    type Program = u32;

    fn create_program(
        &mut self,
        program: LinkedProgram,
        _uniforms: &UniformLocations,
        _layout: &VertexLayout,
    ) -> Result<u32, ShaderError> {
        if let Some(log) = self.fail_next.take() {
            return Err(ShaderError::Backend {
                program: program.label().to_string(),
                log,
            });
        }

        let handle = self.next_handle;
        self.next_handle += 1;
        self.calls.push(Call::CreateProgram {
            label: program.label().to_string(),
            handle,
        });
        Ok(handle)
    }
}

impl FrameBackend for RecordingBackend {
    fn begin_frame(&mut self, clear: Color) -> FrameStatus {
        self.calls.push(Call::BeginFrame(clear));
        self.frame_status
    }

    fn set_viewport(&mut self, viewport: ViewportRect) {
        self.calls.push(Call::SetViewport(viewport));
    }

    fn write_uniform(&mut self, program: &u32, location: UniformLocation, value: [f32; 4]) {
        self.calls.push(Call::WriteUniform {
            program: *program,
            location,
            value,
        });
    }

    fn draw(&mut self, program: &u32, geometry: GeometryHandle) {
        self.calls.push(Call::Draw {
            program: *program,
            geometry,
        });
    }

    fn end_frame(&mut self) {
        self.calls.push(Call::EndFrame);
    }
}

/// Temporary directory of WGSL files.
///
/// `with_defaults` writes `tri.vert`, `tri.frag` (uniform color) and
/// `flat.frag` (interpolated color).
pub struct ShaderDir {
    dir: TempDir,
}

impl ShaderDir {
    pub fn with_defaults() -> Self {
        let dir = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        dir.write("tri.vert", fixtures::VERTEX);
        dir.write("tri.frag", fixtures::FRAGMENT);
        dir.write("flat.frag", fixtures::FRAGMENT_FLAT);
        dir
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn sources(&self, vertex: &str, fragment: &str) -> ProgramSources {
        ProgramSources::in_dir(self.path(), vertex, fragment)
    }

    pub fn write(&self, name: &str, contents: &str) {
        fs::write(self.path().join(name), contents).unwrap();
    }
}
