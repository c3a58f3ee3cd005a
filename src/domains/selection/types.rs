use crate::domains::sessions::{Session, SessionState};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What the sidebar currently focuses. `Root` is the orchestrator view and is
/// always a valid resting state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Root,
    Session { session_id: String },
}

impl Selection {
    pub fn session(session_id: impl Into<String>) -> Self {
        Selection::Session {
            session_id: session_id.into(),
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        match self {
            Selection::Root => None,
            Selection::Session { session_id } => Some(session_id),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Selection::Root)
    }
}

/// Outbound "set selection" request handed to the rest of the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionChange {
    pub selection: Selection,
    pub worktree_path: Option<PathBuf>,
    pub session_state: Option<SessionState>,
    /// The user asked for this change directly.
    pub is_intentional: bool,
    /// Downstream should persist this as the project's last selection.
    pub remember: bool,
}

impl SelectionChange {
    pub fn root() -> Self {
        Self {
            selection: Selection::Root,
            worktree_path: None,
            session_state: None,
            is_intentional: false,
            remember: false,
        }
    }

    pub fn for_session(session: &Session, session_state: SessionState) -> Self {
        Self {
            selection: Selection::session(session.id.clone()),
            worktree_path: Some(session.worktree_path.clone()),
            session_state: Some(session_state),
            is_intentional: false,
            remember: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionMemoryEntry {
    pub last_selection: Option<String>,
    pub last_visible_sessions: Vec<Session>,
}

/// Armed when the backend reports a removed session. `was_reviewed` is
/// captured at arming time because the session is gone from later lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalSignal {
    pub session_id: String,
    pub was_reviewed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSignal {
    pub session_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_serializes_as_tagged_union() {
        let json = serde_json::to_string(&Selection::session("alpha")).unwrap();
        assert_eq!(json, r#"{"kind":"session","session_id":"alpha"}"#);
        let root: Selection = serde_json::from_str(r#"{"kind":"root"}"#).unwrap();
        assert!(root.is_root());
        assert_eq!(root.session_id(), None);
    }

    #[test]
    fn change_for_session_carries_worktree() {
        let mut session = Session::new("alpha");
        session.worktree_path = PathBuf::from("/tmp/worktrees/alpha");
        let change = SelectionChange::for_session(&session, SessionState::Running);
        assert_eq!(change.selection.session_id(), Some("alpha"));
        assert_eq!(
            change.worktree_path.as_deref(),
            Some(std::path::Path::new("/tmp/worktrees/alpha"))
        );
        assert!(!change.is_intentional);
        assert!(!change.remember);
    }
}
