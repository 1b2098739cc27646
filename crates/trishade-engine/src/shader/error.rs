use std::path::PathBuf;

use super::stage::StageKind;

/// Failure raised while building, registering or reloading a shader program.
///
/// Every variant carries the program/stage identifier plus the diagnostic text
/// needed to reproduce the problem. None of them are retried: given the same
/// source the outcome is deterministic.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read shader source {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{stage} stage '{label}' has an empty source")]
    EmptySource { stage: StageKind, label: String },

    #[error("failed to compile {stage} stage '{label}':\n{log}")]
    Compile {
        stage: StageKind,
        label: String,
        log: String,
    },

    #[error("failed to link program '{program}': {log}")]
    Link { program: String, log: String },

    #[error("program '{program}' failed validation: {log}")]
    Validate { program: String, log: String },

    #[error("program '{program}' does not provide uniform '{uniform}': {reason}")]
    UniformResolution {
        program: String,
        uniform: &'static str,
        reason: String,
    },

    #[error("program slot {index} is out of range (capacity {capacity})")]
    SlotOutOfRange { index: usize, capacity: usize },

    #[error("program slot {index} has never been loaded")]
    EmptySlot { index: usize },

    #[error("GPU rejected program '{program}': {log}")]
    Backend { program: String, log: String },
}

impl ShaderError {
    /// Short category name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ShaderError::Io { .. } => "io",
            ShaderError::EmptySource { .. } => "empty-source",
            ShaderError::Compile { .. } => "compile",
            ShaderError::Link { .. } => "link",
            ShaderError::Validate { .. } => "validate",
            ShaderError::UniformResolution { .. } => "uniform",
            ShaderError::SlotOutOfRange { .. } => "slot-range",
            ShaderError::EmptySlot { .. } => "empty-slot",
            ShaderError::Backend { .. } => "backend",
        }
    }
}
