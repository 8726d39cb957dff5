//! Directory walking engine for fileman.
//!
//! This crate resolves scan roots and walks them serially with jwalk,
//! handing matching entries to a visitor.
//!
//! # Overview
//!
//! - **Root enumeration** for single-root and drive-letter platforms
//! - **Pattern walking** with shell-glob base-name filters
//! - **Content search** gated by extension and size
//! - **Change listing** over a modification-time window
//!
//! Unreadable entries never abort a walk; they are logged and collected as
//! [`WalkWarning`]s. Only a root that cannot be opened is fatal.
//!
//! # Example
//!
//! ```rust,no_run
//! use fileman_scan::{NamePattern, WalkConfig, find_files};
//! use std::path::PathBuf;
//!
//! let pattern = NamePattern::new("*.log").unwrap();
//! let roots = vec![PathBuf::from("/var/log")];
//! let found = find_files(&roots, &WalkConfig::default(), &pattern).unwrap();
//!
//! for path in &found {
//!     println!("{}", path.display());
//! }
//! ```

mod changes;
mod content;
mod drives;
mod walker;

pub use changes::{ChangeVisitor, change_paths, changed_between};
pub use content::{ContentVisitor, file_contains, find_by_content, scan};
pub use drives::{FsProbe, VolumeProbe, all_drives, resolve_roots};
pub use walker::{
    CountVisitor, EntryVisitor, FindVisitor, PatternWalker, VisitedEntry, WalkSummary,
    count_files, find_files, walk_roots,
};

// Re-export core types for convenience
pub use fileman_core::{
    ContentQuery, FileChange, NamePattern, Platform, RootSelection, TimeWindow, WalkConfig,
    WalkError, WalkWarning, WarningKind,
};
