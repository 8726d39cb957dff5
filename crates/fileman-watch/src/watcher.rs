//! Watch registration and the consume loop.

use std::path::{Path, PathBuf};

use crossbeam_channel::{Receiver, select, unbounded};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use fileman_core::WalkConfig;
use fileman_scan::{PatternWalker, VisitedEntry};

use crate::WatchError;
use crate::event::ChangeEvent;
use crate::sink::ChangeSink;

/// Counts gathered over one consume loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchSummary {
    /// Events that matched a classification rule.
    pub changes: u64,
    /// Events no rule matched.
    pub unclassified: u64,
    /// Backend errors relayed to the sink.
    pub errors: u64,
}

/// A live registration plus the channels fed by its callback.
pub struct WatchSession {
    watcher: RecommendedWatcher,
    registered: Vec<PathBuf>,
    events: Receiver<Event>,
    errors: Receiver<notify::Error>,
}

impl std::fmt::Debug for WatchSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchSession")
            .field("registered", &self.registered)
            .finish_non_exhaustive()
    }
}

impl WatchSession {
    /// Create the backend and register every directory under `root`.
    ///
    /// The registration set is fixed here; directories created later are
    /// not picked up.
    pub fn start(root: &Path) -> Result<Self, WatchError> {
        let (events_tx, events) = unbounded();
        let (errors_tx, errors) = unbounded();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            // Send failures only mean the consumer is gone.
            match res {
                Ok(event) => {
                    let _ = events_tx.send(event);
                }
                Err(err) => {
                    let _ = errors_tx.send(err);
                }
            }
        })
        .map_err(WatchError::Backend)?;

        let directories = watched_directories(root)?;
        for dir in &directories {
            watcher
                .watch(dir, RecursiveMode::NonRecursive)
                .map_err(|e| WatchError::register(dir, e))?;
        }

        tracing::info!(
            "Watching {} ({} directories)",
            root.display(),
            directories.len()
        );

        Ok(Self {
            watcher,
            registered: directories,
            events,
            errors,
        })
    }

    /// Directories subscribed at start.
    pub fn registered(&self) -> &[PathBuf] {
        &self.registered
    }

    /// Relay notifications to `sink` until the backend closes its channels.
    pub fn run<S>(self, sink: &mut S) -> WatchSummary
    where
        S: ChangeSink + ?Sized,
    {
        let Self {
            watcher,
            events,
            errors,
            ..
        } = self;
        let summary = consume(&events, &errors, sink);
        drop(watcher);
        summary
    }
}

/// Collect every directory reachable from `root`, root included.
///
/// Unreadable subdirectories are logged by the walker and left out.
pub fn watched_directories(root: &Path) -> Result<Vec<PathBuf>, WatchError> {
    let walker = PatternWalker::new(WalkConfig::new(root));
    let mut directories = Vec::new();
    let mut collect = |entry: &VisitedEntry| {
        if entry.is_dir() {
            directories.push(entry.path.clone());
        }
    };
    walker.visit_all(&mut collect)?;
    Ok(directories)
}

/// Drain both channels into `sink` until either one closes.
pub fn consume<S>(
    events: &Receiver<Event>,
    errors: &Receiver<notify::Error>,
    sink: &mut S,
) -> WatchSummary
where
    S: ChangeSink + ?Sized,
{
    let mut summary = WatchSummary::default();

    loop {
        select! {
            recv(events) -> msg => match msg {
                Ok(event) => match ChangeEvent::from_event(&event) {
                    Some(change) => {
                        summary.changes += 1;
                        sink.on_change(&change);
                    }
                    None => {
                        summary.unclassified += 1;
                        sink.on_unclassified(&event);
                    }
                },
                Err(_) => break,
            },
            recv(errors) -> msg => match msg {
                Ok(err) => {
                    summary.errors += 1;
                    sink.on_error(&err);
                }
                Err(_) => break,
            },
        }
    }

    tracing::debug!("Watch channels closed: {:?}", summary);
    summary
}

/// Watch `root` and relay classified changes to `sink`.
///
/// Blocks until the notification backend shuts down; there is no other way
/// to stop a live watch.
pub fn watch<S>(root: &Path, sink: &mut S) -> Result<WatchSummary, WatchError>
where
    S: ChangeSink + ?Sized,
{
    let session = WatchSession::start(root)?;
    Ok(session.run(sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ChangeKind;
    use crate::sink::CollectingSink;
    use notify::EventKind;
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind, RenameMode};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_consume_classifies_events_in_order() {
        let (events_tx, events_rx) = unbounded();
        let (_errors_tx, errors_rx) = unbounded::<notify::Error>();

        events_tx
            .send(event(EventKind::Create(CreateKind::File), "/w/a"))
            .unwrap();
        events_tx
            .send(event(EventKind::Access(AccessKind::Any), "/w/a"))
            .unwrap();
        events_tx
            .send(event(EventKind::Modify(ModifyKind::Name(RenameMode::From)), "/w/b"))
            .unwrap();
        events_tx
            .send(event(EventKind::Remove(RemoveKind::File), "/w/b"))
            .unwrap();
        drop(events_tx);

        let mut sink = CollectingSink::default();
        let summary = consume(&events_rx, &errors_rx, &mut sink);

        assert_eq!(
            sink.kinds(),
            vec![ChangeKind::Created, ChangeKind::Renamed, ChangeKind::Removed]
        );
        assert_eq!(sink.unclassified, 1);
        assert_eq!(
            summary,
            WatchSummary {
                changes: 3,
                unclassified: 1,
                errors: 0,
            }
        );
    }

    #[test]
    fn test_consume_reports_one_move_once_per_side() {
        let (events_tx, events_rx) = unbounded();
        let (_errors_tx, errors_rx) = unbounded::<notify::Error>();

        // inotify delivers a single `mv a.txt b.txt` as three events.
        events_tx
            .send(event(EventKind::Modify(ModifyKind::Name(RenameMode::From)), "/w/a.txt"))
            .unwrap();
        events_tx
            .send(event(EventKind::Modify(ModifyKind::Name(RenameMode::To)), "/w/b.txt"))
            .unwrap();
        events_tx
            .send(
                Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
                    .add_path(PathBuf::from("/w/a.txt"))
                    .add_path(PathBuf::from("/w/b.txt")),
            )
            .unwrap();
        drop(events_tx);

        let mut sink = CollectingSink::default();
        let summary = consume(&events_rx, &errors_rx, &mut sink);

        assert_eq!(sink.kinds(), vec![ChangeKind::Renamed, ChangeKind::Created]);
        assert_eq!(sink.changes[0].paths, vec![PathBuf::from("/w/a.txt")]);
        assert_eq!(sink.changes[1].paths, vec![PathBuf::from("/w/b.txt")]);
        assert_eq!(summary.changes, 2);
        assert_eq!(summary.unclassified, 1);
    }

    #[test]
    fn test_consume_relays_errors_and_continues() {
        let (_events_tx, events_rx) = unbounded::<Event>();
        let (errors_tx, errors_rx) = unbounded();

        errors_tx.send(notify::Error::generic("first")).unwrap();
        errors_tx.send(notify::Error::generic("second")).unwrap();
        drop(errors_tx);

        let mut sink = CollectingSink::default();
        let summary = consume(&events_rx, &errors_rx, &mut sink);

        assert_eq!(summary.errors, 2);
        assert_eq!(sink.errors.len(), 2);
        assert!(sink.errors[0].contains("first"));
    }

    #[test]
    fn test_consume_ends_when_a_channel_closes() {
        let (events_tx, events_rx) = unbounded::<Event>();
        let (_errors_tx, errors_rx) = unbounded::<notify::Error>();
        drop(events_tx);

        let mut sink = CollectingSink::default();
        let summary = consume(&events_rx, &errors_rx, &mut sink);

        assert_eq!(summary, WatchSummary::default());
        assert!(sink.changes.is_empty());
    }
}
