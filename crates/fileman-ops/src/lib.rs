//! File operations for fileman.
//!
//! Batch remove and extension-change operations applied to every entry a
//! pattern walk matches. Each batch produces an [`OperationComplete`]
//! report; per-file failures are logged and recorded without stopping the
//! walk, and nothing is rolled back.

mod executor;
mod operation;
mod progress;
mod remove;
mod rename;

pub use executor::OperationExecutor;
pub use operation::{FileOperation, OperationError, OpsError};
pub use progress::{OperationComplete, OperationType};
pub use remove::{RemoveOptions, RemoveVisitor, remove_files};
pub use rename::{ExtensionVisitor, set_files_extension, validate_extension};
