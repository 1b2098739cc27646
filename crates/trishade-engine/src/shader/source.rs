use std::fs;
use std::path::{Path, PathBuf};

use super::error::ShaderError;

/// Vertex and fragment source files making up one logical program.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ProgramSources {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl ProgramSources {
    pub fn new(vertex: impl Into<PathBuf>, fragment: impl Into<PathBuf>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Resolves both paths against `dir`.
    pub fn in_dir(dir: &Path, vertex: &str, fragment: &str) -> Self {
        Self::new(dir.join(vertex), dir.join(fragment))
    }
}

/// Reads a shader source file in full.
///
/// The whole file is returned regardless of its size; emptiness is checked by
/// the stage compiler, which knows the stage being built.
pub fn read_source(path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Label used in diagnostics for a source file (its file name).
pub(crate) fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn reads_files_larger_than_a_page() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut expected = String::from("// header\n");
        while expected.len() < 3 * 4096 {
            expected.push_str("// padding line to grow the shader file past one page\n");
        }
        expected.push_str("// trailer\n");
        file.write_all(expected.as_bytes()).unwrap();

        let text = read_source(file.path()).unwrap();
        assert_eq!(text.len(), expected.len());
        assert!(text.ends_with("// trailer\n"));
    }

    #[test]
    fn missing_file_reports_io_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.wgsl");

        let err = read_source(&path).unwrap_err();
        match err {
            ShaderError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn in_dir_joins_both_paths() {
        let s = ProgramSources::in_dir(Path::new("shaders"), "a.vert.wgsl", "a.frag.wgsl");
        assert_eq!(s.vertex, Path::new("shaders").join("a.vert.wgsl"));
        assert_eq!(s.fragment, Path::new("shaders").join("a.frag.wgsl"));
    }

    #[test]
    fn source_label_is_file_name() {
        assert_eq!(source_label(Path::new("dir/x.frag.wgsl")), "x.frag.wgsl");
    }
}
