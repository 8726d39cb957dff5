//! Change classification.
//!
//! Raw notifications are mapped to a [`ChangeKind`] by walking
//! [`CLASSIFICATION_RULES`] top-down; the first rule whose predicate holds
//! decides the kind.
//!
//! A rename is reported once per side: the old name as renamed, the new name
//! as created. The combined both-ends event is left unclassified.

use std::path::PathBuf;

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind};
use strum::Display;

/// Category a change notification is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ChangeKind {
    #[strum(to_string = "created")]
    Created,
    #[strum(to_string = "changed")]
    Modified,
    #[strum(to_string = "deleted")]
    Removed,
    #[strum(to_string = "renamed")]
    Renamed,
}

/// One entry of the ordered classification list.
#[derive(Debug, Clone, Copy)]
pub struct ChangeRule {
    /// Predicate over the raw event kind.
    pub matches: fn(&EventKind) -> bool,
    /// Kind reported when the predicate holds.
    pub kind: ChangeKind,
}

/// Default rules, highest priority first.
pub const CLASSIFICATION_RULES: &[ChangeRule] = &[
    ChangeRule {
        matches: is_create,
        kind: ChangeKind::Created,
    },
    ChangeRule {
        matches: is_write,
        kind: ChangeKind::Modified,
    },
    ChangeRule {
        matches: is_remove,
        kind: ChangeKind::Removed,
    },
    ChangeRule {
        matches: is_rename,
        kind: ChangeKind::Renamed,
    },
];

fn is_create(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(ModifyKind::Name(RenameMode::To))
    )
}

fn is_write(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any | ModifyKind::Other)
    )
}

fn is_remove(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Remove(_))
}

fn is_rename(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Name(
            RenameMode::From | RenameMode::Any | RenameMode::Other
        ))
    )
}

/// Classify an event kind with the default rules.
pub fn classify(kind: &EventKind) -> Option<ChangeKind> {
    classify_with(CLASSIFICATION_RULES, kind)
}

/// Classify an event kind with an explicit rule list; first match wins.
pub fn classify_with(rules: &[ChangeRule], kind: &EventKind) -> Option<ChangeKind> {
    rules
        .iter()
        .find(|rule| (rule.matches)(kind))
        .map(|rule| rule.kind)
}

/// A classified change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Category of the change.
    pub kind: ChangeKind,
    /// Affected paths.
    pub paths: Vec<PathBuf>,
}

impl ChangeEvent {
    /// Classify a raw event, or `None` for access and metadata-only events.
    pub fn from_event(event: &Event) -> Option<Self> {
        classify(&event.kind).map(|kind| Self {
            kind,
            paths: event.paths.clone(),
        })
    }

    /// Human-readable path list for log lines.
    pub fn describe_paths(&self) -> String {
        let joined: Vec<String> = self
            .paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        joined.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, MetadataKind, RemoveKind};

    #[test]
    fn test_default_classification() {
        assert_eq!(
            classify(&EventKind::Create(CreateKind::File)),
            Some(ChangeKind::Created)
        );
        assert_eq!(
            classify(&EventKind::Modify(ModifyKind::Data(DataChange::Content))),
            Some(ChangeKind::Modified)
        );
        assert_eq!(
            classify(&EventKind::Remove(RemoveKind::Folder)),
            Some(ChangeKind::Removed)
        );
        assert_eq!(
            classify(&EventKind::Modify(ModifyKind::Name(RenameMode::From))),
            Some(ChangeKind::Renamed)
        );
    }

    #[test]
    fn test_rename_sides_classified_separately() {
        let name = |mode| EventKind::Modify(ModifyKind::Name(mode));

        assert_eq!(classify(&name(RenameMode::From)), Some(ChangeKind::Renamed));
        assert_eq!(classify(&name(RenameMode::To)), Some(ChangeKind::Created));
        assert_eq!(classify(&name(RenameMode::Any)), Some(ChangeKind::Renamed));
        assert_eq!(classify(&name(RenameMode::Both)), None);
    }

    #[test]
    fn test_unclassified_kinds() {
        assert_eq!(classify(&EventKind::Access(AccessKind::Any)), None);
        assert_eq!(
            classify(&EventKind::Modify(ModifyKind::Metadata(
                MetadataKind::Permissions
            ))),
            None
        );
        assert_eq!(classify(&EventKind::Any), None);
        assert_eq!(classify(&EventKind::Other), None);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        fn any_modify(kind: &EventKind) -> bool {
            matches!(kind, EventKind::Modify(_))
        }

        let rules = [
            ChangeRule {
                matches: any_modify,
                kind: ChangeKind::Modified,
            },
            ChangeRule {
                matches: is_rename,
                kind: ChangeKind::Renamed,
            },
        ];
        let rename = EventKind::Modify(ModifyKind::Name(RenameMode::From));

        assert_eq!(classify_with(&rules, &rename), Some(ChangeKind::Modified));

        let reversed = [rules[1], rules[0]];
        assert_eq!(classify_with(&reversed, &rename), Some(ChangeKind::Renamed));
    }

    #[test]
    fn test_rule_order_is_create_write_remove_rename() {
        let kinds: Vec<ChangeKind> = CLASSIFICATION_RULES.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChangeKind::Created,
                ChangeKind::Modified,
                ChangeKind::Removed,
                ChangeKind::Renamed,
            ]
        );
    }

    #[test]
    fn test_describe_rename_paths() {
        let event = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::From)))
            .add_path(PathBuf::from("/w/old.txt"));
        let change = ChangeEvent::from_event(&event).unwrap();

        assert_eq!(change.kind, ChangeKind::Renamed);
        assert_eq!(change.describe_paths(), "/w/old.txt");
        assert_eq!(change.kind.to_string(), "renamed");

        let both = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
            .add_path(PathBuf::from("/w/old.txt"))
            .add_path(PathBuf::from("/w/new.txt"));
        assert!(ChangeEvent::from_event(&both).is_none());
    }
}
