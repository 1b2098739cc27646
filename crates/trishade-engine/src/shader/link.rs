use naga::{Binding, BuiltIn, Handle, Module, Scalar, ScalarKind, Type, TypeInner};

use crate::geometry::VertexLayout;

use super::error::ShaderError;
use super::stage::{CompiledStage, StageKind};

/// A vertex and fragment stage whose interfaces have been matched.
///
/// Owns both stages until the backend turns them into a GPU pipeline.
#[derive(Debug)]
pub struct LinkedProgram {
    label: String,
    vertex: CompiledStage,
    fragment: CompiledStage,
}

impl LinkedProgram {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn vertex(&self) -> &CompiledStage {
        &self.vertex
    }

    pub fn fragment(&self) -> &CompiledStage {
        &self.fragment
    }

    /// Both stages, vertex first.
    pub fn stages(&self) -> [&CompiledStage; 2] {
        [&self.vertex, &self.fragment]
    }
}

/// Links a vertex and a fragment stage into one program.
///
/// Every fragment input location must be written by the vertex stage with an
/// identical type, and the vertex stage must write `@builtin(position)`.
pub fn link(
    label: impl Into<String>,
    vertex: CompiledStage,
    fragment: CompiledStage,
) -> Result<LinkedProgram, ShaderError> {
    let label = label.into();
    let fail = |log: String| ShaderError::Link {
        program: label.clone(),
        log,
    };

    if vertex.kind() != StageKind::Vertex {
        return Err(fail(format!(
            "'{}' is a {} stage, expected a vertex stage",
            vertex.label(),
            vertex.kind()
        )));
    }
    if fragment.kind() != StageKind::Fragment {
        return Err(fail(format!(
            "'{}' is a {} stage, expected a fragment stage",
            fragment.label(),
            fragment.kind()
        )));
    }

    let outputs = result_varyings(&vertex);
    if !outputs.iter().any(|v| matches!(v, Varying::BuiltIn(BuiltIn::Position { .. }))) {
        return Err(fail(format!(
            "vertex stage '{}' does not write @builtin(position)",
            vertex.label()
        )));
    }

    for input in argument_varyings(&fragment) {
        let Varying::Location(location, ref wanted) = input else {
            continue;
        };
        let written = outputs.iter().find_map(|v| match v {
            Varying::Location(l, ty) if *l == location => Some(ty),
            _ => None,
        });
        match written {
            None => {
                return Err(fail(format!(
                    "fragment input @location({location}) is not written by vertex stage '{}'",
                    vertex.label()
                )));
            }
            Some(ty) if ty != wanted => {
                return Err(fail(format!(
                    "@location({location}) type mismatch: vertex writes {}, fragment reads {}",
                    describe_type(ty),
                    describe_type(wanted)
                )));
            }
            Some(_) => {}
        }
    }

    log::debug!(
        "linked program '{label}' ({} + {})",
        vertex.label(),
        fragment.label()
    );

    Ok(LinkedProgram {
        label,
        vertex,
        fragment,
    })
}

/// Post-link validation against the geometry the program will be drawn with.
///
/// Every vertex input must be fed by a float attribute of the same width, and
/// the fragment stage must write color target `@location(0)`.
pub fn validate(program: &LinkedProgram, layout: &VertexLayout) -> Result<(), ShaderError> {
    let fail = |log: String| ShaderError::Validate {
        program: program.label.clone(),
        log,
    };

    for input in argument_varyings(&program.vertex) {
        let Varying::Location(location, ty) = input else {
            continue;
        };
        let Some(attribute) = layout.attribute(location) else {
            return Err(fail(format!(
                "vertex input @location({location}) has no matching vertex attribute"
            )));
        };
        match float_components(&ty) {
            Some(n) if n == attribute.components => {}
            _ => {
                return Err(fail(format!(
                    "vertex input @location({location}) is {}, geometry provides {} x f32",
                    describe_type(&ty),
                    attribute.components
                )));
            }
        }
    }

    let writes_color = result_varyings(&program.fragment)
        .iter()
        .any(|v| matches!(v, Varying::Location(0, _)));
    if !writes_color {
        return Err(fail(format!(
            "fragment stage '{}' does not write color target @location(0)",
            program.fragment.label()
        )));
    }

    Ok(())
}

/// A single stage input or output.
#[derive(Debug, Clone, PartialEq)]
enum Varying {
    Location(u32, TypeInner),
    BuiltIn(BuiltIn),
}

/// Entry-point arguments: vertex attributes or fragment varyings.
fn argument_varyings(stage: &CompiledStage) -> Vec<Varying> {
    let mut out = Vec::new();
    for arg in &stage.entry_point().function.arguments {
        collect_varyings(stage.module(), arg.ty, arg.binding.as_ref(), &mut out);
    }
    out
}

fn result_varyings(stage: &CompiledStage) -> Vec<Varying> {
    let mut out = Vec::new();
    if let Some(result) = &stage.entry_point().function.result {
        collect_varyings(stage.module(), result.ty, result.binding.as_ref(), &mut out);
    }
    out
}

// Unbound values are structs whose members carry the bindings.
fn collect_varyings(
    module: &Module,
    ty: Handle<Type>,
    binding: Option<&Binding>,
    out: &mut Vec<Varying>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => {
            out.push(Varying::Location(*location, module.types[ty].inner.clone()));
        }
        Some(Binding::BuiltIn(b)) => out.push(Varying::BuiltIn(*b)),
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect_varyings(module, member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}

fn float_components(ty: &TypeInner) -> Option<u8> {
    match *ty {
        TypeInner::Scalar(Scalar {
            kind: ScalarKind::Float,
            width: 4,
        }) => Some(1),
        TypeInner::Vector {
            size,
            scalar:
                Scalar {
                    kind: ScalarKind::Float,
                    width: 4,
                },
        } => Some(size as u8),
        _ => None,
    }
}

/// WGSL-style spelling of a scalar or vector type for diagnostics.
pub(crate) fn describe_type(ty: &TypeInner) -> String {
    match *ty {
        TypeInner::Scalar(scalar) => scalar_name(scalar),
        TypeInner::Vector { size, scalar } => {
            format!("vec{}<{}>", size as u8, scalar_name(scalar))
        }
        ref other => format!("{other:?}"),
    }
}

fn scalar_name(scalar: Scalar) -> String {
    let bits = scalar.width as u32 * 8;
    match scalar.kind {
        ScalarKind::Float => format!("f{bits}"),
        ScalarKind::Sint => format!("i{bits}"),
        ScalarKind::Uint => format!("u{bits}"),
        ScalarKind::Bool => "bool".to_string(),
        other => format!("{other:?}"),
    }
}
