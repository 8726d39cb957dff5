//! File operation types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fileman_core::WalkError;

/// A batch operation applied to every matched entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileOperation {
    /// Delete matched files.
    Remove { use_trash: bool },
    /// Replace the extension of matched files.
    SetExtension { new_extension: String },
}

impl FileOperation {
    /// Create a remove operation.
    pub fn remove(use_trash: bool) -> Self {
        Self::Remove { use_trash }
    }

    /// Create an extension change operation.
    pub fn set_extension(new_extension: impl Into<String>) -> Self {
        Self::SetExtension {
            new_extension: new_extension.into(),
        }
    }
}

/// A per-file failure; the batch continues past it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationError {
    pub path: PathBuf,
    pub message: String,
}

impl OperationError {
    pub fn new(path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Errors that prevent a batch from running at all.
#[derive(Debug, Error)]
pub enum OpsError {
    /// The walk itself failed.
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// The replacement extension is not usable in a file name.
    #[error("Invalid extension '{extension}': {message}")]
    InvalidExtension { extension: String, message: String },
}
