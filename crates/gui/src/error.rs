//! Error types for the remesh pipeline.
//!
//! Every failure aborts only the current invocation. Errors are grouped the
//! way they are reported to the user: configuration, validation, export,
//! process and import.

use std::path::PathBuf;

use thiserror::Error;

use crate::platform::Platform;

/// Result type for remesh operations.
pub type RemeshResult<T> = Result<T, RemeshError>;

/// Missing or unusable configuration, detected before any file I/O.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the QuadriFlow path must be set in the preferences before remeshing")]
    PathNotSet,

    #[error("the QuadriFlow path {} cannot be found on this computer", .0.display())]
    PathNotFound(PathBuf),

    #[error("remeshing is supported only on Linux and Windows (this is {0})")]
    UnsupportedPlatform(Platform),

    #[error("flip removal needs Linux with `minisat` and `timeout` installed")]
    FlipRemovalUnavailable,

    #[error("resolution must be a positive integer")]
    InvalidResolution,
}

/// The mesh failed a precondition that the options make mandatory.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("'Require Manifold Input' is set but the active mesh is not manifold ({0})")]
    NonManifold(String),
}

/// Writing the active mesh to the interchange file failed.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("a mesh object must be active to remesh")]
    NoActiveMesh,

    #[error("the active mesh '{0}' has no geometry")]
    EmptyMesh(String),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Running the external executable failed.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("permission denied running {}; check the QuadriFlow path", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("failed to start {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("QuadriFlow exited with {}: {stderr}", exit_label(.code))]
    Failed { code: Option<i32>, stderr: String },

    #[error("QuadriFlow did not finish within {secs} seconds")]
    TimedOut { secs: u64 },

    #[error("failed waiting for QuadriFlow: {0}")]
    Wait(#[source] std::io::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Line-level problems in an OBJ file.
#[derive(Debug, Error, PartialEq)]
pub enum ObjError {
    #[error("line {line}: expected 3 coordinates in vertex")]
    BadVertex { line: usize },

    #[error("line {line}: invalid number '{token}'")]
    BadNumber { line: usize, token: String },

    #[error("line {line}: face needs at least 3 corners")]
    ShortFace { line: usize },

    #[error("line {line}: face index {index} is out of range")]
    IndexOutOfRange { line: usize, index: i64 },
}

/// Reading the remeshed result back failed.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("QuadriFlow produced no output at {}: {stderr}", .path.display())]
    MissingOutput { path: PathBuf, stderr: String },

    #[error("remeshed file is malformed: {0}")]
    Malformed(#[from] ObjError),

    #[error("remeshed file contains no geometry")]
    Empty,

    #[error("remeshed mesh is invalid: {0}")]
    Invalid(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Any failure of one remesh invocation.
#[derive(Debug, Error)]
pub enum RemeshError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("a remesh is already running")]
    Busy,
}

impl RemeshError {
    /// Short name of the error group, used in logs and the status bar.
    pub fn kind(&self) -> &'static str {
        match self {
            RemeshError::Config(_) => "config",
            RemeshError::Validation(_) => "validation",
            RemeshError::Export(_) => "export",
            RemeshError::Process(_) => "process",
            RemeshError::Import(_) => "import",
            RemeshError::Busy => "busy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(RemeshError::from(ConfigError::PathNotSet).kind(), "config");
        assert_eq!(
            RemeshError::from(ValidationError::NonManifold("x".into())).kind(),
            "validation"
        );
        assert_eq!(RemeshError::from(ExportError::NoActiveMesh).kind(), "export");
        assert_eq!(RemeshError::from(ImportError::Empty).kind(), "import");
        assert_eq!(RemeshError::Busy.kind(), "busy");
    }

    #[test]
    fn test_failed_message_includes_code_and_stderr() {
        let err = ProcessError::Failed {
            code: Some(1),
            stderr: "cannot open input".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("code 1"));
        assert!(msg.contains("cannot open input"));

        let killed = ProcessError::Failed { code: None, stderr: String::new() };
        assert!(killed.to_string().contains("signal"));
    }

    #[test]
    fn test_obj_error_converts_to_import() {
        let err: ImportError = ObjError::ShortFace { line: 7 }.into();
        assert!(err.to_string().contains("line 7"));
    }
}
