//! Fatal walk errors and non-fatal walk warnings.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that stop a command before or while opening a root.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The root exists but may not be read.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// The root does not exist.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Any other failure opening the root.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A name pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Caller-supplied parameters are inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl WalkError {
    /// Classify an I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Reject caller-supplied parameters.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Category of a [`WalkWarning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    PermissionDenied,
    /// A symlink whose target is missing.
    BrokenSymlink,
    /// A directory listing or file read failed.
    ReadError,
    /// `stat` failed on an entry that was listed.
    MetadataError,
}

/// A problem with one entry; the walk carries on past it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkWarning {
    pub path: PathBuf,
    pub message: String,
    pub kind: WarningKind,
}

impl WalkWarning {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Build a warning for an I/O failure; denied access gets its own kind.
    pub fn from_io(path: impl Into<PathBuf>, error: &io::Error) -> Self {
        if error.kind() == io::ErrorKind::PermissionDenied {
            Self::permission_denied(path)
        } else {
            Self::read_error(path, error)
        }
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let message = format!("Permission denied: {}", path.display());
        Self::new(path, message, WarningKind::PermissionDenied)
    }

    pub fn broken_symlink(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let message = format!("Broken symlink: {}", path.display());
        Self::new(path, message, WarningKind::BrokenSymlink)
    }

    pub fn read_error(path: impl Into<PathBuf>, error: &io::Error) -> Self {
        let path = path.into();
        let message = format!("Error accessing path {}: {error}", path.display());
        Self::new(path, message, WarningKind::ReadError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_error_io() {
        let err = WalkError::io(
            "/test/path",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, WalkError::PermissionDenied { .. }));

        let err = WalkError::io(
            "/test/path",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, WalkError::NotFound { .. }));
        assert!(err.to_string().contains("/test/path"));
    }

    #[test]
    fn test_warning_from_io() {
        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let warning = WalkWarning::from_io("/test/path", &denied);
        assert_eq!(warning.kind, WarningKind::PermissionDenied);
        assert!(warning.message.contains("Permission denied"));

        let other = io::Error::other("boom");
        let warning = WalkWarning::from_io("/test/path", &other);
        assert_eq!(warning.kind, WarningKind::ReadError);
        assert!(warning.message.contains("boom"));
    }
}
