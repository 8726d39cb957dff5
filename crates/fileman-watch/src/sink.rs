//! Destinations for classified change notifications.

use notify::Event;

use crate::event::{ChangeEvent, ChangeKind};

/// Receives everything the consume loop pulls off the channels.
pub trait ChangeSink {
    /// A classified change.
    fn on_change(&mut self, change: &ChangeEvent);

    /// A backend error; the loop keeps running afterwards.
    fn on_error(&mut self, error: &notify::Error);

    /// An event no classification rule matched.
    fn on_unclassified(&mut self, event: &Event) {
        tracing::trace!("Ignoring {:?} on {:?}", event.kind, event.paths);
    }
}

/// Sink that reports every change through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ChangeSink for TracingSink {
    fn on_change(&mut self, change: &ChangeEvent) {
        tracing::info!("File {}: {}", change.kind, change.describe_paths());
    }

    fn on_error(&mut self, error: &notify::Error) {
        tracing::warn!("Watcher error: {}", error);
    }
}

/// Sink that keeps everything it receives, in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    /// Classified changes.
    pub changes: Vec<ChangeEvent>,
    /// Backend error messages.
    pub errors: Vec<String>,
    /// Number of unclassified events.
    pub unclassified: usize,
}

impl CollectingSink {
    /// Kinds of the collected changes, in order.
    pub fn kinds(&self) -> Vec<ChangeKind> {
        self.changes.iter().map(|c| c.kind).collect()
    }
}

impl ChangeSink for CollectingSink {
    fn on_change(&mut self, change: &ChangeEvent) {
        self.changes.push(change.clone());
    }

    fn on_error(&mut self, error: &notify::Error) {
        self.errors.push(error.to_string());
    }

    fn on_unclassified(&mut self, _event: &Event) {
        self.unclassified += 1;
    }
}
