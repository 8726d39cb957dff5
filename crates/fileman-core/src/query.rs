//! Match criteria beyond plain name patterns.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::WalkError;

/// Bytes per kilobyte as used by size limits.
pub const KILOBYTE: u64 = 1024;

/// Criteria for a content search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentQuery {
    /// Dotted extension a file must carry, e.g. `.log`.
    pub extension: String,
    /// Largest file size, in bytes, that is still read.
    pub max_size_bytes: u64,
    /// Case-sensitive substring searched for line by line.
    pub needle: String,
}

impl ContentQuery {
    /// Create a query. A bare extension like `log` is stored as `.log`.
    pub fn new(
        extension: impl Into<String>,
        max_size_bytes: u64,
        needle: impl Into<String>,
    ) -> Self {
        let extension = extension.into();
        let extension = if extension.is_empty() || extension.starts_with('.') {
            extension
        } else {
            format!(".{extension}")
        };

        Self {
            extension,
            max_size_bytes,
            needle: needle.into(),
        }
    }

    /// Create a query with the size limit given in kilobytes.
    pub fn with_max_size_kb(
        extension: impl Into<String>,
        max_size_kb: u64,
        needle: impl Into<String>,
    ) -> Self {
        Self::new(extension, max_size_kb.saturating_mul(KILOBYTE), needle)
    }

    /// Check the cheap gates (extension and size) before any file is opened.
    pub fn admits(&self, extension: &str, size: u64) -> bool {
        extension == self.extension && size <= self.max_size_bytes
    }
}

/// An open time interval `(start, end)` over modification times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Exclusive lower bound.
    pub start: DateTime<Local>,
    /// Exclusive upper bound.
    pub end: DateTime<Local>,
}

impl TimeWindow {
    /// Create a window; `start` must be strictly before `end`.
    pub fn new(start: DateTime<Local>, end: DateTime<Local>) -> Result<Self, WalkError> {
        if start >= end {
            return Err(WalkError::invalid_config(format!(
                "time window start {start} is not before end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Check whether a timestamp lies strictly inside the window.
    pub fn contains(&self, time: DateTime<Local>) -> bool {
        self.start < time && time < self.end
    }
}

/// An entry whose modification time fell inside a [`TimeWindow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Path of the entry, with symlinks resolved.
    pub path: PathBuf,
    /// Last modification time.
    pub modified: DateTime<Local>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_extension_normalized() {
        assert_eq!(ContentQuery::new("log", 10, "x").extension, ".log");
        assert_eq!(ContentQuery::new(".log", 10, "x").extension, ".log");
    }

    #[test]
    fn test_size_in_kb() {
        let query = ContentQuery::with_max_size_kb(".log", 1, "error");
        assert_eq!(query.max_size_bytes, 1024);
        assert!(query.admits(".log", 10));
        assert!(query.admits(".log", 1024));
        assert!(!query.admits(".log", 1025));
        assert!(!query.admits(".txt", 10));

        let zero = ContentQuery::with_max_size_kb(".log", 0, "error");
        assert!(!zero.admits(".log", 10));
        assert!(zero.admits(".log", 0));
    }

    #[test]
    fn test_time_window_bounds_are_strict() {
        let now = Local::now();
        let window = TimeWindow::new(now - Duration::hours(1), now).unwrap();

        assert!(window.contains(now - Duration::minutes(30)));
        assert!(!window.contains(now));
        assert!(!window.contains(now - Duration::hours(1)));
        assert!(!window.contains(now + Duration::minutes(1)));
    }

    #[test]
    fn test_time_window_rejects_inverted() {
        let now = Local::now();
        assert!(TimeWindow::new(now, now).is_err());
        assert!(TimeWindow::new(now, now - Duration::seconds(1)).is_err());
    }
}
