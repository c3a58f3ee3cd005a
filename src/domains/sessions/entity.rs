use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    Name,
    Created,
    LastEdited,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Name => "name",
            SortMode::Created => "created",
            SortMode::LastEdited => "last-edited",
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortMode::Name),
            "created" => Ok(SortMode::Created),
            "last-edited" => Ok(SortMode::LastEdited),
            _ => Err(format!("Invalid sort mode: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Spec,
    Running,
    Reviewed,
}

impl FilterMode {
    pub const ALL_MODES: [FilterMode; 4] = [
        FilterMode::All,
        FilterMode::Spec,
        FilterMode::Running,
        FilterMode::Reviewed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Spec => "spec",
            FilterMode::Running => "running",
            FilterMode::Reviewed => "reviewed",
        }
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(FilterMode::All),
            "spec" => Ok(FilterMode::Spec),
            "running" => Ok(FilterMode::Running),
            "reviewed" => Ok(FilterMode::Reviewed),
            _ => Err(format!("Invalid filter mode: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Active,
    Cancelled,
    Spec,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::Spec => "spec",
        }
    }
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SessionStatus::Active),
            "cancelled" => Ok(SessionStatus::Cancelled),
            "spec" => Ok(SessionStatus::Spec),
            _ => Err(format!("Invalid session status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Spec,
    #[default]
    Running,
    Reviewed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Spec => "spec",
            SessionState::Running => "running",
            SessionState::Reviewed => "reviewed",
        }
    }
}

impl FromStr for SessionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spec" => Ok(SessionState::Spec),
            "running" => Ok(SessionState::Running),
            "reviewed" => Ok(SessionState::Reviewed),
            _ => Err(format!("Invalid session state: {s}")),
        }
    }
}

/// The sidebar's read-only view of a backend session. Sessions are created and
/// destroyed by the backend; this side only ever receives snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Session {
    pub id: String,
    // Optional human-friendly display name (does not affect branch/worktree)
    pub display_name: Option<String>,
    pub branch: String,
    pub worktree_path: PathBuf,
    pub status: SessionStatus,
    // Raw state as reported by the backend; see `classify` for the UI view
    pub session_state: SessionState,
    pub ready_to_merge: bool,
    pub version_group_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            branch: format!("schaltwerk/{id}"),
            id,
            ..Self::default()
        }
    }

    pub fn spec(id: impl Into<String>) -> Self {
        Self {
            status: SessionStatus::Spec,
            session_state: SessionState::Spec,
            ..Self::new(id)
        }
    }

    pub fn reviewed(id: impl Into<String>) -> Self {
        Self {
            session_state: SessionState::Reviewed,
            ready_to_merge: true,
            ..Self::new(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_mode_round_trips_through_strings() {
        for mode in FilterMode::ALL_MODES {
            assert_eq!(mode.as_str().parse::<FilterMode>().unwrap(), mode);
        }
        assert_eq!(
            "pending".parse::<FilterMode>().unwrap_err(),
            "Invalid filter mode: pending"
        );
    }

    #[test]
    fn sort_mode_uses_kebab_case() {
        assert_eq!("last-edited".parse::<SortMode>().unwrap(), SortMode::LastEdited);
        assert!("last_edited".parse::<SortMode>().is_err());
        assert_eq!(
            serde_json::to_string(&SortMode::LastEdited).unwrap(),
            "\"last-edited\""
        );
    }

    #[test]
    fn session_deserializes_with_missing_fields() {
        let session: Session =
            serde_json::from_str(r#"{"id":"alpha","ready_to_merge":true}"#).unwrap();
        assert_eq!(session.id, "alpha");
        assert!(session.ready_to_merge);
        assert_eq!(session.status, SessionStatus::Active);
        assert_eq!(session.session_state, SessionState::Running);
        assert!(session.created_at.is_none());
    }

    #[test]
    fn constructors_set_expected_state() {
        let spec = Session::spec("draft");
        assert_eq!(spec.status, SessionStatus::Spec);
        assert_eq!(spec.session_state, SessionState::Spec);
        assert_eq!(spec.branch, "schaltwerk/draft");

        let reviewed = Session::reviewed("done");
        assert!(reviewed.ready_to_merge);
    }
}
