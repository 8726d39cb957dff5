//! Serial jwalk-based pattern walker.

use std::fs::{FileType, Metadata};
use std::path::{Path, PathBuf};

use jwalk::{Parallelism, WalkDir};

use fileman_core::{NamePattern, WalkConfig, WalkError, WalkWarning};

/// An entry produced by the walker.
#[derive(Debug, Clone)]
pub struct VisitedEntry {
    /// Full path of the entry.
    pub path: PathBuf,
    /// Base name, lossily converted.
    pub name: String,
    /// File type as reported by the directory listing.
    pub file_type: FileType,
    follow_links: bool,
}

impl VisitedEntry {
    /// Check if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.file_type.is_dir()
    }

    /// Check if this entry is a symlink.
    pub fn is_symlink(&self) -> bool {
        self.file_type.is_symlink()
    }

    /// Read metadata, following links only when the walk does.
    pub fn metadata(&self) -> std::io::Result<Metadata> {
        if self.follow_links {
            std::fs::metadata(&self.path)
        } else {
            std::fs::symlink_metadata(&self.path)
        }
    }
}

/// Receives every entry that passes the walker's name filter.
pub trait EntryVisitor {
    /// Handle one matched entry.
    fn visit(&mut self, entry: &VisitedEntry);
}

impl<F> EntryVisitor for F
where
    F: FnMut(&VisitedEntry),
{
    fn visit(&mut self, entry: &VisitedEntry) {
        self(entry)
    }
}

/// Totals for one or more completed walks.
#[derive(Debug, Clone, Default)]
pub struct WalkSummary {
    /// Entries seen, matched or not.
    pub entries_visited: u64,
    /// Entries handed to the visitor.
    pub entries_matched: u64,
    /// Non-fatal problems, in the order they occurred.
    pub warnings: Vec<WalkWarning>,
}

impl WalkSummary {
    /// Fold another summary into this one.
    pub fn merge(&mut self, other: WalkSummary) {
        self.entries_visited += other.entries_visited;
        self.entries_matched += other.entries_matched;
        self.warnings.extend(other.warnings);
    }
}

/// Recursive walker that filters entries by base name.
#[derive(Debug, Clone)]
pub struct PatternWalker {
    config: WalkConfig,
}

impl PatternWalker {
    /// Create a walker for the given configuration.
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    /// Walk the root and visit every entry whose base name matches `pattern`.
    pub fn walk<V>(&self, pattern: &NamePattern, visitor: &mut V) -> Result<WalkSummary, WalkError>
    where
        V: EntryVisitor + ?Sized,
    {
        self.walk_filtered(|name| pattern.matches(name), visitor)
    }

    /// Walk the root and visit every entry.
    pub fn visit_all<V>(&self, visitor: &mut V) -> Result<WalkSummary, WalkError>
    where
        V: EntryVisitor + ?Sized,
    {
        self.walk_filtered(|_| true, visitor)
    }

    fn walk_filtered<P, V>(&self, accept: P, visitor: &mut V) -> Result<WalkSummary, WalkError>
    where
        P: Fn(&str) -> bool,
        V: EntryVisitor + ?Sized,
    {
        let root = &self.config.root;
        open_root(root)?;

        let walker = WalkDir::new(root)
            .parallelism(Parallelism::Serial)
            .skip_hidden(!self.config.include_hidden)
            .follow_links(self.config.follow_symlinks)
            .sort(false)
            .min_depth(0)
            .max_depth(self.config.max_depth.map(|d| d as usize).unwrap_or(usize::MAX));

        let mut summary = WalkSummary::default();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    let warning = match err.io_error() {
                        Some(io) => WalkWarning::from_io(path, io),
                        None => WalkWarning::new(
                            path,
                            err.to_string(),
                            fileman_core::WarningKind::ReadError,
                        ),
                    };
                    tracing::warn!("{}", warning.message);
                    summary.warnings.push(warning);
                    continue;
                }
            };

            summary.entries_visited += 1;

            let name = entry.file_name().to_string_lossy().into_owned();
            if !accept(&name) {
                continue;
            }

            let visited = VisitedEntry {
                path: entry.path(),
                name,
                file_type: entry.file_type(),
                follow_links: self.config.follow_symlinks,
            };

            summary.entries_matched += 1;
            visitor.visit(&visited);
        }

        Ok(summary)
    }
}

/// Fail fast when the root itself cannot be opened.
fn open_root(root: &Path) -> Result<(), WalkError> {
    let metadata = std::fs::metadata(root).map_err(|e| WalkError::io(root, e))?;
    if metadata.is_dir() {
        std::fs::read_dir(root).map_err(|e| WalkError::io(root, e))?;
    }
    Ok(())
}

/// Walk each root in turn with the same visitor.
///
/// Roots are processed sequentially; the first root that cannot be opened
/// aborts the whole operation.
pub fn walk_roots<V>(
    roots: &[PathBuf],
    config: &WalkConfig,
    pattern: &NamePattern,
    visitor: &mut V,
) -> Result<WalkSummary, WalkError>
where
    V: EntryVisitor + ?Sized,
{
    let mut summary = WalkSummary::default();
    for root in roots {
        tracing::info!("Searching: {} for {}", root.display(), pattern);
        let walker = PatternWalker::new(config.with_root(root));
        summary.merge(walker.walk(pattern, visitor)?);
    }
    Ok(summary)
}

/// Collects matched paths in traversal order.
#[derive(Debug, Default)]
pub struct FindVisitor {
    /// Paths found so far.
    pub matches: Vec<PathBuf>,
}

impl EntryVisitor for FindVisitor {
    fn visit(&mut self, entry: &VisitedEntry) {
        self.matches.push(entry.path.clone());
    }
}

/// Counts matched entries.
#[derive(Debug, Default)]
pub struct CountVisitor {
    /// Number of matches so far.
    pub count: u64,
}

impl EntryVisitor for CountVisitor {
    fn visit(&mut self, _entry: &VisitedEntry) {
        self.count += 1;
    }
}

/// Find every entry under `roots` whose base name matches `pattern`.
pub fn find_files(
    roots: &[PathBuf],
    config: &WalkConfig,
    pattern: &NamePattern,
) -> Result<Vec<PathBuf>, WalkError> {
    let mut visitor = FindVisitor::default();
    walk_roots(roots, config, pattern, &mut visitor)?;
    Ok(visitor.matches)
}

/// Count the entries under `roots` whose base name matches `pattern`.
pub fn count_files(
    roots: &[PathBuf],
    config: &WalkConfig,
    pattern: &NamePattern,
) -> Result<u64, WalkError> {
    let mut visitor = CountVisitor::default();
    walk_roots(roots, config, pattern, &mut visitor)?;
    Ok(visitor.count)
}
