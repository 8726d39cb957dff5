//! Dispatch a [`FileOperation`] over a set of roots.

use std::path::PathBuf;

use fileman_core::{NamePattern, WalkConfig};

use crate::progress::OperationComplete;
use crate::remove::{RemoveOptions, remove_files};
use crate::rename::set_files_extension;
use crate::{FileOperation, OpsError};

/// Executor applying one operation to every match under a set of roots.
#[derive(Debug, Clone)]
pub struct OperationExecutor {
    roots: Vec<PathBuf>,
    config: WalkConfig,
}

impl OperationExecutor {
    /// Create an executor for the given roots.
    pub fn new(roots: Vec<PathBuf>, config: WalkConfig) -> Self {
        Self { roots, config }
    }

    /// Run `operation` on every entry whose base name matches `pattern`.
    pub fn execute(
        &self,
        operation: &FileOperation,
        pattern: &NamePattern,
    ) -> Result<OperationComplete, OpsError> {
        let report = match operation {
            FileOperation::Remove { use_trash } => remove_files(
                &self.roots,
                &self.config,
                pattern,
                RemoveOptions {
                    use_trash: *use_trash,
                },
            )?,
            FileOperation::SetExtension { new_extension } => {
                set_files_extension(&self.roots, &self.config, pattern, new_extension)?
            }
        };

        tracing::info!("{}: {}", report.operation_type, report.summary());
        Ok(report)
    }
}
