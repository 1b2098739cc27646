use naga::{AddressSpace, ResourceBinding, Scalar, TypeInner, VectorSize};

use super::error::ShaderError;
use super::link::{LinkedProgram, describe_type};

/// Uniforms the rest of the system expects every program to declare.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SemanticUniform {
    /// `var<uniform> input_color: vec4<f32>`
    PrimaryColor,
}

impl SemanticUniform {
    pub const COUNT: usize = 1;
    pub const ALL: [SemanticUniform; Self::COUNT] = [SemanticUniform::PrimaryColor];

    /// Name of the WGSL global the uniform is resolved from.
    pub const fn name(self) -> &'static str {
        match self {
            SemanticUniform::PrimaryColor => "input_color",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            SemanticUniform::PrimaryColor => 0,
        }
    }
}

/// Resolved location of a uniform: bind group and binding index.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct UniformLocation {
    pub group: u32,
    pub binding: u32,
}

impl From<ResourceBinding> for UniformLocation {
    fn from(rb: ResourceBinding) -> Self {
        Self {
            group: rb.group,
            binding: rb.binding,
        }
    }
}

/// Locations of every [`SemanticUniform`] for one program instance.
///
/// Populated once after linking and never mutated.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformLocations {
    slots: [UniformLocation; SemanticUniform::COUNT],
}

impl UniformLocations {
    pub fn get(&self, uniform: SemanticUniform) -> UniformLocation {
        self.slots[uniform.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SemanticUniform, UniformLocation)> + '_ {
        SemanticUniform::ALL.iter().map(|u| (*u, self.get(*u)))
    }
}

/// Bind group all semantic uniforms must be declared in.
pub const UNIFORM_GROUP: u32 = 0;

/// Resolves every semantic uniform of a linked program.
///
/// A uniform must be declared in at least one stage, in the `uniform` address
/// space, as `vec4<f32>`, in bind group [`UNIFORM_GROUP`]. When both stages
/// declare it the bindings must agree. Uniforms must not share a binding.
///
/// Any other resource binding is rejected: the pipeline layout only carries
/// the semantic uniforms.
pub fn resolve_uniforms(program: &LinkedProgram) -> Result<UniformLocations, ShaderError> {
    let mut slots = [UniformLocation::default(); SemanticUniform::COUNT];

    for uniform in SemanticUniform::ALL {
        let fail = |reason: String| ShaderError::UniformResolution {
            program: program.label().to_string(),
            uniform: uniform.name(),
            reason,
        };

        let mut found: Option<UniformLocation> = None;
        for stage in program.stages() {
            let module = stage.module();
            let Some((_, var)) = module
                .global_variables
                .iter()
                .find(|(_, v)| v.name.as_deref() == Some(uniform.name()))
            else {
                continue;
            };

            if var.space != AddressSpace::Uniform {
                return Err(fail(format!(
                    "declared in {} stage '{}' outside the uniform address space",
                    stage.kind(),
                    stage.label()
                )));
            }

            let ty = &module.types[var.ty].inner;
            let expected = TypeInner::Vector {
                size: VectorSize::Quad,
                scalar: Scalar::F32,
            };
            if *ty != expected {
                return Err(fail(format!(
                    "declared as {} in {} stage '{}', expected vec4<f32>",
                    describe_type(ty),
                    stage.kind(),
                    stage.label()
                )));
            }

            let Some(binding) = var.binding.clone() else {
                return Err(fail(format!("has no @group/@binding in '{}'", stage.label())));
            };
            let location = UniformLocation::from(binding);

            match found {
                Some(prev) if prev != location => {
                    return Err(fail(format!(
                        "bound at group {} binding {} and group {} binding {} in different stages",
                        prev.group, prev.binding, location.group, location.binding
                    )));
                }
                _ => found = Some(location),
            }
        }

        let Some(location) = found else {
            return Err(fail("not declared by either stage".to_string()));
        };

        if location.group != UNIFORM_GROUP {
            return Err(fail(format!(
                "declared in bind group {}, expected {UNIFORM_GROUP}",
                location.group
            )));
        }

        if let Some(other) = SemanticUniform::ALL[..uniform.index()]
            .iter()
            .find(|u| slots[u.index()] == location)
        {
            return Err(fail(format!("shares its binding with '{}'", other.name())));
        }

        slots[uniform.index()] = location;
    }

    for stage in program.stages() {
        for (_, var) in stage.module().global_variables.iter() {
            let Some(binding) = var.binding.clone() else {
                continue;
            };
            let name = var.name.as_deref().unwrap_or("<unnamed>");
            if SemanticUniform::ALL.iter().any(|u| u.name() == name) {
                continue;
            }
            return Err(ShaderError::Validate {
                program: program.label().to_string(),
                log: format!(
                    "{} stage '{}' binds '{name}' at group {} binding {}, which is not a known uniform",
                    stage.kind(),
                    stage.label(),
                    binding.group,
                    binding.binding
                ),
            });
        }
    }

    Ok(UniformLocations { slots })
}

/// Current uniform values for one registry slot, with per-uniform dirty flags.
///
/// Only dirty values are uploaded; a freshly (re)loaded program starts with
/// every uniform dirty so the rendered result does not depend on upload history.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UniformValues {
    values: [[f32; 4]; SemanticUniform::COUNT],
    dirty: [bool; SemanticUniform::COUNT],
}

impl UniformValues {
    pub fn new(primary_color: [f32; 4]) -> Self {
        let mut values = [[0.0; 4]; SemanticUniform::COUNT];
        values[SemanticUniform::PrimaryColor.index()] = primary_color;
        Self {
            values,
            dirty: [true; SemanticUniform::COUNT],
        }
    }

    pub fn get(&self, uniform: SemanticUniform) -> [f32; 4] {
        self.values[uniform.index()]
    }

    /// Updates a value; marks it dirty only when it actually changed.
    pub fn set(&mut self, uniform: SemanticUniform, value: [f32; 4]) {
        let i = uniform.index();
        if self.values[i] != value {
            self.values[i] = value;
            self.dirty[i] = true;
        }
    }

    pub fn is_dirty(&self, uniform: SemanticUniform) -> bool {
        self.dirty[uniform.index()]
    }

    pub fn mark_all_dirty(&mut self) {
        self.dirty = [true; SemanticUniform::COUNT];
    }

    /// Calls `upload` for every dirty uniform and clears its flag.
    pub fn flush(&mut self, mut upload: impl FnMut(SemanticUniform, [f32; 4])) {
        for uniform in SemanticUniform::ALL {
            let i = uniform.index();
            if self.dirty[i] {
                upload(uniform, self.values[i]);
                self.dirty[i] = false;
            }
        }
    }
}
