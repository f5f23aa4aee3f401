use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all verman registry operations.
#[derive(Debug, Error, Diagnostic)]
pub enum VermanError {
    /// Filesystem or transport failure other than absence.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A root, package, or version path does not exist.
    #[error("not found: {path}")]
    NotFound { path: PathBuf },

    /// A version-range expression could not be parsed. This covers both
    /// expressions supplied in a query and the contents of a `latest`
    /// sentinel file.
    #[error("invalid version constraint {expression:?}: {message}")]
    #[diagnostic(help("constraints use semver operators such as `=1.2.3`, `>=1.0.0, <2.0.0`, `^1.2`, `~1.2.3`"))]
    InvalidConstraint { expression: String, message: String },

    /// A `file://` location could not be built for a repository file.
    #[error("cannot build file location for {path}")]
    Location { path: PathBuf },
}

impl VermanError {
    /// Absence of a path, as opposed to a hard I/O failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, VermanError::NotFound { .. })
    }

    /// Typed `NotFound` for the given path.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        VermanError::NotFound { path: path.into() }
    }
}

/// Convenience alias used throughout the verman crates.
pub type VermanResult<T> = Result<T, VermanError>;
