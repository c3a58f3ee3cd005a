use crate::domains::selection::Selection;
use crate::domains::sessions::{FilterMode, Session, SortMode};
use crate::errors::{Result, SelectionError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GitOperation {
    Merge,
    Rebase,
    Squash,
    #[serde(other)]
    Other,
}

/// Notifications the selection controller reacts to, in arrival order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionEvent {
    SessionsRefreshed {
        sessions: Vec<Session>,
    },
    SessionRemoved {
        session_id: String,
    },
    GitOperationCompleted {
        session_id: String,
        operation: GitOperation,
    },
    FilterChanged {
        filter: FilterMode,
    },
    SortChanged {
        sort: SortMode,
    },
    SelectionRequested {
        selection: Selection,
    },
    ProjectSwitchStarted {
        project_key: String,
    },
    ProjectSwitchCompleted,
}

impl SelectionEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionEvent::SessionsRefreshed { .. } => "schaltwerk:sessions-refreshed",
            SelectionEvent::SessionRemoved { .. } => "schaltwerk:session-removed",
            SelectionEvent::GitOperationCompleted { .. } => "schaltwerk:git-operation-completed",
            SelectionEvent::FilterChanged { .. } => "schaltwerk:filter-changed",
            SelectionEvent::SortChanged { .. } => "schaltwerk:sort-changed",
            SelectionEvent::SelectionRequested { .. } => "schaltwerk:selection",
            SelectionEvent::ProjectSwitchStarted { .. } => "schaltwerk:project-switch-started",
            SelectionEvent::ProjectSwitchCompleted => "schaltwerk:project-switch-completed",
        }
    }
}

/// Parses a recorded event stream: a JSON array of tagged events.
pub fn parse_events(json: &str) -> Result<Vec<SelectionEvent>> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_events(path: &Path) -> Result<Vec<SelectionEvent>> {
    let contents = fs::read_to_string(path).map_err(|source| SelectionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let events = parse_events(&contents)?;
    log::debug!("Read {} events from {}", events.len(), path.display());
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_event_names() {
        assert_eq!(
            SelectionEvent::SessionRemoved {
                session_id: "a".into()
            }
            .as_str(),
            "schaltwerk:session-removed"
        );
        assert_eq!(
            SelectionEvent::ProjectSwitchCompleted.as_str(),
            "schaltwerk:project-switch-completed"
        );
    }

    #[test]
    fn test_events_parse_from_tagged_json() {
        let events: Vec<SelectionEvent> = serde_json::from_str(
            r#"[
                {"type": "git_operation_completed", "session_id": "a", "operation": "merge"},
                {"type": "git_operation_completed", "session_id": "b", "operation": "cherry_pick"},
                {"type": "filter_changed", "filter": "reviewed"},
                {"type": "selection_requested", "selection": {"kind": "root"}},
                {"type": "project_switch_completed"}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            events[0],
            SelectionEvent::GitOperationCompleted {
                session_id: "a".into(),
                operation: GitOperation::Merge
            }
        );
        assert_eq!(
            events[1],
            SelectionEvent::GitOperationCompleted {
                session_id: "b".into(),
                operation: GitOperation::Other
            }
        );
        assert_eq!(
            events[2],
            SelectionEvent::FilterChanged {
                filter: FilterMode::Reviewed
            }
        );
        assert_eq!(
            events[3],
            SelectionEvent::SelectionRequested {
                selection: Selection::Root
            }
        );
        assert_eq!(events[4], SelectionEvent::ProjectSwitchCompleted);
    }

    #[test]
    fn test_read_events_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("scenario.json");
        fs::write(
            &path,
            r#"[{"type": "sessions_refreshed", "sessions": [{"id": "a"}]}, {"type": "session_removed", "session_id": "a"}]"#,
        )
        .unwrap();

        let events = read_events(&path).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].as_str(), "schaltwerk:sessions-refreshed");
    }

    #[test]
    fn test_read_events_reports_missing_and_malformed_files() {
        let tmp = TempDir::new().unwrap();
        let missing = read_events(&tmp.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, SelectionError::Read { .. }));

        let malformed = parse_events(r#"[{"type": "teleported"}]"#).unwrap_err();
        assert!(matches!(malformed, SelectionError::InvalidScenario(_)));
    }
}
