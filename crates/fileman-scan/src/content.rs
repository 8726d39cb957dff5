//! Content search: extension and size gates, then a line-by-line substring test.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use fileman_core::{ContentQuery, WalkConfig, WalkError, dotted_extension};

use crate::walker::{EntryVisitor, PatternWalker, VisitedEntry};

/// Visitor that keeps files passing a [`ContentQuery`].
#[derive(Debug)]
pub struct ContentVisitor<'q> {
    query: &'q ContentQuery,
    /// Matching files in traversal order.
    pub matches: Vec<PathBuf>,
    /// Files that passed the gates but could not be read.
    pub unreadable: u64,
}

impl<'q> ContentVisitor<'q> {
    /// Create a visitor for a query.
    pub fn new(query: &'q ContentQuery) -> Self {
        Self {
            query,
            matches: Vec::new(),
            unreadable: 0,
        }
    }
}

impl EntryVisitor for ContentVisitor<'_> {
    fn visit(&mut self, entry: &VisitedEntry) {
        let extension = dotted_extension(&entry.name);
        if entry.is_dir() || extension != self.query.extension {
            return;
        }

        let size = match entry.metadata() {
            Ok(m) => m.len(),
            Err(e) => {
                tracing::debug!("Skipping {}: {}", entry.path.display(), e);
                return;
            }
        };
        if !self.query.admits(extension, size) {
            return;
        }

        match file_contains(&entry.path, &self.query.needle) {
            Ok(true) => self.matches.push(entry.path.clone()),
            Ok(false) => {}
            Err(e) => {
                self.unreadable += 1;
                tracing::debug!("Skipping unreadable {}: {}", entry.path.display(), e);
            }
        }
    }
}

/// Check whether any line of the file contains `needle`.
///
/// Stops reading at the first matching line. Lines are decoded lossily so
/// binary content never aborts the read.
pub fn file_contains(path: &Path, needle: &str) -> std::io::Result<bool> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(false);
        }
        if String::from_utf8_lossy(&line).contains(needle) {
            return Ok(true);
        }
    }
}

/// Search a single root for files matching `query`.
pub fn scan(
    root: &Path,
    config: &WalkConfig,
    query: &ContentQuery,
) -> Result<Vec<PathBuf>, WalkError> {
    let mut visitor = ContentVisitor::new(query);
    PatternWalker::new(config.with_root(root)).visit_all(&mut visitor)?;
    Ok(visitor.matches)
}

/// Search several roots in turn for files matching `query`.
pub fn find_by_content(
    roots: &[PathBuf],
    config: &WalkConfig,
    query: &ContentQuery,
) -> Result<Vec<PathBuf>, WalkError> {
    let mut visitor = ContentVisitor::new(query);
    for root in roots {
        tracing::info!("Searching for content in: {}", root.display());
        PatternWalker::new(config.with_root(root)).visit_all(&mut visitor)?;
    }
    Ok(visitor.matches)
}
