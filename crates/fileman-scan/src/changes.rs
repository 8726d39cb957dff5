//! Entries modified inside a time window.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use fileman_core::{FileChange, TimeWindow, WalkConfig, WalkError, WalkWarning};

use crate::walker::{EntryVisitor, PatternWalker, VisitedEntry};

/// Visitor collecting entries whose modification time is inside a window.
#[derive(Debug)]
pub struct ChangeVisitor {
    window: TimeWindow,
    /// Entries found so far, in traversal order.
    pub changes: Vec<FileChange>,
    /// Links and entries whose metadata could not be read.
    pub warnings: Vec<WalkWarning>,
}

impl ChangeVisitor {
    /// Create a visitor for a window.
    pub fn new(window: TimeWindow) -> Self {
        Self {
            window,
            changes: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn warn(&mut self, warning: WalkWarning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }
}

impl EntryVisitor for ChangeVisitor {
    fn visit(&mut self, entry: &VisitedEntry) {
        let (path, metadata) = if entry.is_symlink() {
            let resolved = match std::fs::canonicalize(&entry.path) {
                Ok(p) => p,
                Err(_) => {
                    self.warn(WalkWarning::broken_symlink(&entry.path));
                    return;
                }
            };
            match std::fs::metadata(&resolved) {
                Ok(m) => (resolved, m),
                Err(e) => {
                    self.warn(WalkWarning::from_io(&resolved, &e));
                    return;
                }
            }
        } else {
            match entry.metadata() {
                Ok(m) => (entry.path.clone(), m),
                Err(e) => {
                    self.warn(WalkWarning::from_io(&entry.path, &e));
                    return;
                }
            }
        };

        let modified = match metadata.modified() {
            Ok(t) => DateTime::<Local>::from(t),
            Err(e) => {
                self.warn(WalkWarning::new(
                    &path,
                    format!("Modification time unavailable: {e}"),
                    fileman_core::WarningKind::MetadataError,
                ));
                return;
            }
        };

        if self.window.contains(modified) {
            self.changes.push(FileChange { path, modified });
        }
    }
}

/// List entries under `root` modified strictly inside `window`.
pub fn changed_between(
    root: &Path,
    config: &WalkConfig,
    window: TimeWindow,
) -> Result<Vec<FileChange>, WalkError> {
    tracing::info!(
        "Looking for changes in {} between {} and {}",
        root.display(),
        window.start,
        window.end
    );
    let mut visitor = ChangeVisitor::new(window);
    PatternWalker::new(config.with_root(root)).visit_all(&mut visitor)?;
    Ok(visitor.changes)
}

/// Paths of a change list, for callers that only need locations.
pub fn change_paths(changes: &[FileChange]) -> Vec<PathBuf> {
    changes.iter().map(|c| c.path.clone()).collect()
}
