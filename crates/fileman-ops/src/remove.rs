//! Remove operation.

use std::fs;
use std::path::{Path, PathBuf};

use fileman_core::{NamePattern, WalkConfig};
use fileman_scan::{EntryVisitor, VisitedEntry, walk_roots};

use crate::progress::{OperationComplete, OperationType};
use crate::{OperationError, OpsError};

/// Options for a remove batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveOptions {
    /// Move files to the system trash instead of unlinking them.
    pub use_trash: bool,
}

/// Visitor deleting every matched non-directory entry.
///
/// Failures are logged and recorded; the walk always continues and earlier
/// deletions are never rolled back.
#[derive(Debug)]
pub struct RemoveVisitor {
    options: RemoveOptions,
    /// Running report for the batch.
    pub report: OperationComplete,
}

impl RemoveVisitor {
    /// Create a visitor with the given options.
    pub fn new(options: RemoveOptions) -> Self {
        let operation_type = if options.use_trash {
            OperationType::Trash
        } else {
            OperationType::Remove
        };
        Self {
            options,
            report: OperationComplete::new(operation_type),
        }
    }

    /// Finish the batch and return its report.
    pub fn finish(self) -> OperationComplete {
        self.report
    }
}

impl EntryVisitor for RemoveVisitor {
    fn visit(&mut self, entry: &VisitedEntry) {
        if entry.is_dir() {
            tracing::debug!("Not removing directory {}", entry.path.display());
            self.report.record_skip();
            return;
        }

        match remove_one(&entry.path, self.options.use_trash) {
            Ok(()) => {
                tracing::debug!("Removed {}", entry.path.display());
                self.report.record_success(entry.path.clone());
            }
            Err(message) => {
                tracing::warn!(
                    "Failed to remove file: {}. Error: {}",
                    entry.path.display(),
                    message
                );
                self.report
                    .record_error(OperationError::new(entry.path.clone(), message));
            }
        }
    }
}

fn remove_one(path: &Path, use_trash: bool) -> Result<(), String> {
    if use_trash {
        trash::delete(path).map_err(|e| e.to_string())
    } else {
        fs::remove_file(path).map_err(|e| e.to_string())
    }
}

/// Remove every non-directory entry under `roots` whose name matches `pattern`.
pub fn remove_files(
    roots: &[PathBuf],
    config: &WalkConfig,
    pattern: &NamePattern,
    options: RemoveOptions,
) -> Result<OperationComplete, OpsError> {
    let mut visitor = RemoveVisitor::new(options);
    walk_roots(roots, config, pattern, &mut visitor)?;
    Ok(visitor.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_remove_matching_files_only() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("cache.tmp")).unwrap();
        fs::write(temp.path().join("a.tmp"), "x").unwrap();
        fs::write(temp.path().join("cache.tmp/b.tmp"), "x").unwrap();
        fs::write(temp.path().join("keep.txt"), "x").unwrap();

        let pattern = NamePattern::new("*.tmp").unwrap();
        let report = remove_files(
            &[temp.path().to_path_buf()],
            &WalkConfig::default(),
            &pattern,
            RemoveOptions::default(),
        )
        .unwrap();

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.skipped, 1);
        assert!(report.is_success());
        assert!(!temp.path().join("a.tmp").exists());
        assert!(!temp.path().join("cache.tmp/b.tmp").exists());
        assert!(temp.path().join("cache.tmp").is_dir());
        assert!(temp.path().join("keep.txt").exists());
    }

    #[test]
    fn test_missing_root() {
        let temp = TempDir::new().unwrap();
        let pattern = NamePattern::new("*").unwrap();
        let result = remove_files(
            &[temp.path().join("missing")],
            &WalkConfig::default(),
            &pattern,
            RemoveOptions::default(),
        );
        assert!(matches!(result, Err(OpsError::Walk(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_is_recorded_and_walk_continues() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let sealed = temp.path().join("sealed");
        fs::create_dir(&sealed).unwrap();
        fs::write(sealed.join("x.tmp"), "x").unwrap();
        fs::write(temp.path().join("y.tmp"), "y").unwrap();
        // Readable but not writable: listing works, unlinking fails.
        fs::set_permissions(&sealed, fs::Permissions::from_mode(0o555)).unwrap();

        let probe = sealed.join("probe");
        let privileged = fs::write(&probe, "").is_ok();
        let _ = fs::remove_file(&probe);

        let pattern = NamePattern::new("*.tmp").unwrap();
        let report = remove_files(
            &[temp.path().to_path_buf()],
            &WalkConfig::default(),
            &pattern,
            RemoveOptions::default(),
        )
        .unwrap();

        fs::set_permissions(&sealed, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(!temp.path().join("y.tmp").exists());
        if privileged {
            assert_eq!(report.succeeded, 2);
        } else {
            assert_eq!(report.succeeded, 1);
            assert_eq!(report.failed, 1);
            assert_eq!(report.errors[0].path, sealed.join("x.tmp"));
            assert!(sealed.join("x.tmp").exists());
        }
    }
}
