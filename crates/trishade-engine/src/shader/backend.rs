use crate::geometry::VertexLayout;

use super::error::ShaderError;
use super::link::LinkedProgram;
use super::uniform::UniformLocations;

/// Turns a linked, validated program into a GPU-resident object.
///
/// This is the only step of program construction that touches the GPU. It
/// consumes the linked stages; they are not needed once the pipeline exists.
pub trait ProgramBackend {
    /// Opaque GPU program handle.
    type Program;

    fn create_program(
        &mut self,
        program: LinkedProgram,
        uniforms: &UniformLocations,
        layout: &VertexLayout,
    ) -> Result<Self::Program, ShaderError>;
}
