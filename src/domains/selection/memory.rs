use super::types::SelectionMemoryEntry;
use crate::domains::sessions::{FilterMode, Session};
use std::collections::HashMap;

/// Key used while no project is open.
pub const DEFAULT_PROJECT_KEY: &str = "__default__";

pub type MemoryMap = HashMap<FilterMode, SelectionMemoryEntry>;

/// Per-project, per-filter record of what was selected and visible. Lives in
/// memory only.
#[derive(Debug, Default)]
pub struct SelectionMemoryStore {
    projects: HashMap<String, MemoryMap>,
}

impl SelectionMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure(&mut self, project_key: &str) -> &mut MemoryMap {
        self.projects
            .entry(project_key.to_string())
            .or_insert_with(|| {
                log::debug!("Creating selection memory for project {project_key}");
                FilterMode::ALL_MODES
                    .iter()
                    .map(|mode| (*mode, SelectionMemoryEntry::default()))
                    .collect()
            })
    }

    pub fn entry(&mut self, project_key: &str, filter_mode: FilterMode) -> &mut SelectionMemoryEntry {
        self.ensure(project_key).entry(filter_mode).or_default()
    }

    /// Drops everything remembered for `project_key`; the next `ensure`
    /// starts from empty entries.
    pub fn reset(&mut self, project_key: &str) {
        if self.projects.remove(project_key).is_some() {
            log::debug!("Reset selection memory for project {project_key}");
        }
    }

    pub fn contains_project(&self, project_key: &str) -> bool {
        self.projects.contains_key(project_key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSnapshot {
    pub previous_sessions: Vec<Session>,
}

/// Hands back the list stored by the previous pass and stores `visible_sessions`
/// in its place, whatever the caller later decides.
pub fn capture_selection_snapshot(
    entry: &mut SelectionMemoryEntry,
    visible_sessions: &[Session],
) -> SelectionSnapshot {
    let previous_sessions = std::mem::replace(
        &mut entry.last_visible_sessions,
        visible_sessions.to_vec(),
    );
    SelectionSnapshot { previous_sessions }
}
