//! Shader program lifecycle.
//!
//! Pipeline for one program, in order:
//! - [`read_source`] both files in full
//! - [`compile_stage`] parses and validates each WGSL stage
//! - [`link`] matches the vertex outputs against the fragment inputs
//! - [`validate`] checks the program against the geometry vertex layout
//! - [`resolve_uniforms`] finds every [`SemanticUniform`]
//! - [`ProgramBackend::create_program`] creates the GPU object
//!
//! [`ProgramRegistry`] runs this pipeline per slot and swaps the result in
//! only when every step succeeded.

mod backend;
mod error;
mod link;
mod program;
mod registry;
mod source;
mod stage;
mod uniform;

#[cfg(test)]
pub(crate) mod fixtures;

pub use backend::ProgramBackend;
pub use error::ShaderError;
pub use link::{LinkedProgram, link, validate};
pub use program::{ShaderProgram, build_program};
pub use registry::{DEFAULT_CAPACITY, ProgramRegistry};
pub use source::{ProgramSources, read_source};
pub use stage::{CompiledStage, StageKind, compile_stage};
pub use uniform::{
    SemanticUniform, UNIFORM_GROUP, UniformLocation, UniformLocations, UniformValues,
    resolve_uniforms,
};
