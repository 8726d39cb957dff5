//! Directory change watcher for fileman.
//!
//! Every directory under a root is registered non-recursively with the
//! platform notification backend. Notifications are classified by an ordered
//! rule list and relayed to a [`ChangeSink`] on the calling thread.
//!
//! # Example
//!
//! ```rust,no_run
//! use fileman_watch::{TracingSink, watch};
//! use std::path::Path;
//!
//! // Blocks until the backend shuts down.
//! let summary = watch(Path::new("/srv/incoming"), &mut TracingSink).unwrap();
//! println!("{} changes", summary.changes);
//! ```

mod error;
mod event;
mod sink;
mod watcher;

pub use error::WatchError;
pub use event::{CLASSIFICATION_RULES, ChangeEvent, ChangeKind, ChangeRule, classify, classify_with};
pub use sink::{ChangeSink, CollectingSink, TracingSink};
pub use watcher::{WatchSession, WatchSummary, consume, watch, watched_directories};
