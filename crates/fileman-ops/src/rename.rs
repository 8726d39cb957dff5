//! Extension change operation.

use std::fs;
use std::path::PathBuf;

use fileman_core::{NamePattern, WalkConfig, replace_extension};
use fileman_scan::{EntryVisitor, VisitedEntry, walk_roots};

use crate::progress::{OperationComplete, OperationType};
use crate::{OperationError, OpsError};

/// Visitor replacing the extension of every matched non-directory entry.
#[derive(Debug)]
pub struct ExtensionVisitor {
    new_extension: String,
    /// Running report for the batch.
    pub report: OperationComplete,
}

impl ExtensionVisitor {
    /// Create a visitor; the extension is validated first.
    pub fn new(new_extension: impl Into<String>) -> Result<Self, OpsError> {
        let new_extension = new_extension.into();
        validate_extension(&new_extension).map_err(|message| OpsError::InvalidExtension {
            extension: new_extension.clone(),
            message,
        })?;

        Ok(Self {
            new_extension,
            report: OperationComplete::new(OperationType::Rename),
        })
    }

    /// Finish the batch and return its report.
    pub fn finish(self) -> OperationComplete {
        self.report
    }
}

impl EntryVisitor for ExtensionVisitor {
    fn visit(&mut self, entry: &VisitedEntry) {
        if entry.is_dir() {
            tracing::debug!("Not renaming directory {}", entry.path.display());
            self.report.record_skip();
            return;
        }

        let new_path = replace_extension(&entry.path, &self.new_extension);
        if new_path == entry.path {
            self.report.record_skip();
            return;
        }

        // An existing target is replaced, as `rename(2)` does.
        match fs::rename(&entry.path, &new_path) {
            Ok(()) => {
                tracing::debug!("Renamed {} -> {}", entry.path.display(), new_path.display());
                self.report.record_success(new_path);
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to rename file: {}. Error: {}",
                    entry.path.display(),
                    e
                );
                self.report.record_error(OperationError::new(
                    entry.path.clone(),
                    format!("Rename failed: {e}"),
                ));
            }
        }
    }
}

/// Replace the extension of every non-directory entry under `roots` whose
/// name matches `pattern`.
pub fn set_files_extension(
    roots: &[PathBuf],
    config: &WalkConfig,
    pattern: &NamePattern,
    new_extension: &str,
) -> Result<OperationComplete, OpsError> {
    let mut visitor = ExtensionVisitor::new(new_extension)?;
    walk_roots(roots, config, pattern, &mut visitor)?;
    Ok(visitor.finish())
}

/// Validate a replacement extension for cross-platform compatibility.
pub fn validate_extension(extension: &str) -> Result<(), String> {
    if extension.is_empty() {
        return Err("Extension cannot be empty".into());
    }

    if extension.len() > 255 {
        return Err("Extension is too long (max 255 characters)".into());
    }

    let invalid_chars = ['/', '\\', '\0'];
    for c in invalid_chars {
        if extension.contains(c) {
            return Err(format!("Extension cannot contain '{}'", c));
        }
    }

    #[cfg(target_os = "windows")]
    {
        let windows_invalid = [':', '*', '?', '"', '<', '>', '|'];
        for c in windows_invalid {
            if extension.contains(c) {
                return Err(format!("Extension cannot contain '{}'", c));
            }
        }
    }

    if extension.ends_with(' ') {
        return Err("Extension cannot end with a space".into());
    }

    Ok(())
}
