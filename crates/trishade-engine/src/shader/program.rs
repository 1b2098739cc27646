use crate::geometry::VertexLayout;

use super::backend::ProgramBackend;
use super::error::ShaderError;
use super::link::{link, validate};
use super::source::{ProgramSources, read_source, source_label};
use super::stage::{StageKind, compile_stage};
use super::uniform::{UniformLocations, resolve_uniforms};

/// One linked, GPU-resident program.
///
/// Only ever constructed through [`build_program`], so an instance is always
/// fully compiled, linked, validated and has its uniforms resolved.
#[derive(Debug)]
pub struct ShaderProgram<P> {
    label: String,
    sources: ProgramSources,
    handle: P,
    uniforms: UniformLocations,
    generation: u64,
}

impl<P> ShaderProgram<P> {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Files the program was built from; reloads read them again.
    pub fn sources(&self) -> &ProgramSources {
        &self.sources
    }

    pub fn handle(&self) -> &P {
        &self.handle
    }

    pub fn uniforms(&self) -> &UniformLocations {
        &self.uniforms
    }

    /// 0 for the initial load of a slot, incremented on every successful reload.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Runs the full pipeline for one program: read both sources, compile each
/// stage, link, validate against `layout`, resolve uniforms, create the GPU
/// object.
///
/// The first failure is returned; nothing outside the returned value is
/// modified.
pub fn build_program<B: ProgramBackend>(
    backend: &mut B,
    label: &str,
    sources: &ProgramSources,
    layout: &VertexLayout,
    generation: u64,
) -> Result<ShaderProgram<B::Program>, ShaderError> {
    let vertex_src = read_source(&sources.vertex)?;
    let fragment_src = read_source(&sources.fragment)?;

    let vertex = compile_stage(StageKind::Vertex, source_label(&sources.vertex), vertex_src)?;
    let fragment = compile_stage(
        StageKind::Fragment,
        source_label(&sources.fragment),
        fragment_src,
    )?;

    let linked = link(label, vertex, fragment)?;
    validate(&linked, layout)?;
    let uniforms = resolve_uniforms(&linked)?;

    let handle = backend.create_program(linked, &uniforms, layout)?;

    Ok(ShaderProgram {
        label: label.to_string(),
        sources: sources.clone(),
        handle,
        uniforms,
        generation,
    })
}
