//! Batch result types for file operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::OperationError;

/// Which batch produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum OperationType {
    #[strum(to_string = "Remove")]
    Remove,
    #[strum(to_string = "Trash")]
    Trash,
    #[strum(to_string = "Change extension")]
    Rename,
}

/// Result of a completed batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationComplete {
    pub operation_type: OperationType,
    /// Files removed or renamed.
    pub succeeded: usize,
    /// Files the operation could not handle.
    pub failed: usize,
    /// Matched entries left alone (directories, no-op renames).
    pub skipped: usize,
    /// Paths processed successfully, in traversal order.
    pub processed: Vec<PathBuf>,
    /// One entry per failed file.
    pub errors: Vec<OperationError>,
}

impl OperationComplete {
    /// Start an empty report.
    pub fn new(operation_type: OperationType) -> Self {
        Self {
            operation_type,
            succeeded: 0,
            failed: 0,
            skipped: 0,
            processed: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Count `path` as done.
    pub fn record_success(&mut self, path: PathBuf) {
        self.succeeded += 1;
        self.processed.push(path);
    }

    /// Count a per-file failure.
    pub fn record_error(&mut self, error: OperationError) {
        self.failed += 1;
        self.errors.push(error);
    }

    /// Record a matched entry that was deliberately left alone.
    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// `true` when no file failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// One-line outcome, e.g. `Removed 3 items, 1 failed`.
    pub fn summary(&self) -> String {
        let action = match self.operation_type {
            OperationType::Remove => "Removed",
            OperationType::Trash => "Trashed",
            OperationType::Rename => "Renamed",
        };

        if self.failed == 0 {
            format!("{} {} items", action, self.succeeded)
        } else {
            format!("{} {} items, {} failed", action, self.succeeded, self.failed)
        }
    }
}
