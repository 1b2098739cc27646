use std::fmt;

use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::error::ShaderError;

/// Pipeline stage a source file is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    pub(crate) fn naga_stage(self) -> naga::ShaderStage {
        match self {
            StageKind::Vertex => naga::ShaderStage::Vertex,
            StageKind::Fragment => naga::ShaderStage::Fragment,
        }
    }

    pub(crate) fn attribute(self) -> &'static str {
        match self {
            StageKind::Vertex => "@vertex",
            StageKind::Fragment => "@fragment",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Vertex => f.write_str("vertex"),
            StageKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// A parsed and validated WGSL stage.
///
/// Owns the source text (needed again when the GPU module is created) and the
/// validated IR used for interface and uniform reflection. Consumed by
/// [`link`](super::link::link); nothing keeps it alive past pipeline creation.
#[derive(Debug)]
pub struct CompiledStage {
    kind: StageKind,
    label: String,
    source: String,
    module: naga::Module,
    entry_point: usize,
}

impl CompiledStage {
    pub fn kind(&self) -> StageKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn module(&self) -> &naga::Module {
        &self.module
    }

    pub fn entry_point(&self) -> &naga::EntryPoint {
        &self.module.entry_points[self.entry_point]
    }

    pub fn entry_point_name(&self) -> &str {
        &self.entry_point().name
    }
}

/// Compiles one shader stage from WGSL source text.
///
/// The stage must contain exactly one entry point of `kind`. Any parse,
/// validation or entry-point problem is reported as
/// [`ShaderError::Compile`] with the full diagnostic text.
pub fn compile_stage(
    kind: StageKind,
    label: impl Into<String>,
    source: impl Into<String>,
) -> Result<CompiledStage, ShaderError> {
    let label = label.into();
    let source = source.into();

    if source.trim().is_empty() {
        return Err(ShaderError::EmptySource { stage: kind, label });
    }

    let compile_error = |log: String| ShaderError::Compile {
        stage: kind,
        label: label.clone(),
        log,
    };

    let module = naga::front::wgsl::parse_str(&source)
        .map_err(|e| compile_error(e.emit_to_string(&source)))?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| compile_error(e.emit_to_string(&source)))?;

    let wanted = kind.naga_stage();
    let candidates: Vec<usize> = module
        .entry_points
        .iter()
        .enumerate()
        .filter(|(_, ep)| ep.stage == wanted)
        .map(|(i, _)| i)
        .collect();

    let entry_point = match candidates.as_slice() {
        [only] => *only,
        [] => {
            return Err(compile_error(format!(
                "no {} entry point declared",
                kind.attribute()
            )));
        }
        many => {
            let names: Vec<&str> = many
                .iter()
                .map(|&i| module.entry_points[i].name.as_str())
                .collect();
            return Err(compile_error(format!(
                "expected one {} entry point, found {}: {}",
                kind.attribute(),
                names.len(),
                names.join(", ")
            )));
        }
    };

    log::debug!(
        "compiled {kind} stage '{label}' (entry point '{}')",
        module.entry_points[entry_point].name
    );

    Ok(CompiledStage {
        kind,
        label,
        source,
        module,
        entry_point,
    })
}
