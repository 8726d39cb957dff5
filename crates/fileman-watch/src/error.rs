//! Error types for the change watcher.

use std::path::PathBuf;

use fileman_core::WalkError;
use thiserror::Error;

/// Errors that stop a watch before events start flowing.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The notification backend could not be created.
    #[error("Failed to create watcher: {0}")]
    Backend(#[source] notify::Error),

    /// Walking the root to collect directories failed.
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// A directory could not be registered with the backend.
    #[error("Failed to watch {path}: {source}")]
    Register {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

impl WatchError {
    /// Create a registration error for a path.
    pub fn register(path: impl Into<PathBuf>, source: notify::Error) -> Self {
        Self::Register {
            path: path.into(),
            source,
        }
    }
}
