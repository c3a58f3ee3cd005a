use super::memory::{capture_selection_snapshot, SelectionMemoryStore, SelectionSnapshot};
use super::resolver::{compute_selection_candidate, SelectionCandidateInput};
use super::types::{MergeSignal, RemovalSignal, Selection, SelectionChange, SelectionMemoryEntry};
use crate::domains::sessions::{classify, is_reviewed, visible_sessions, FilterMode, Session, SortMode};
use crate::infrastructure::config::SelectionConfig;
use crate::infrastructure::events::{GitOperation, SelectionEvent};

/// Receives every selection change the controller issues.
pub trait SelectionSink {
    fn set_selection(&mut self, change: &SelectionChange);
}

impl SelectionSink for Vec<SelectionChange> {
    fn set_selection(&mut self, change: &SelectionChange) {
        self.push(change.clone());
    }
}

/// Keeps the sidebar selection valid while sessions come and go.
///
/// Events are applied synchronously in arrival order. Removal and merge
/// notifications only arm one-shot signals; the next reconciliation pass
/// consumes them.
pub struct SelectionController<S: SelectionSink> {
    project_key: String,
    filter_mode: FilterMode,
    sort_mode: SortMode,
    all_sessions: Vec<Session>,
    selection: Selection,
    memory: SelectionMemoryStore,
    removal_signal: Option<RemovalSignal>,
    merge_signal: Option<MergeSignal>,
    project_switching: bool,
    sink: S,
}

impl<S: SelectionSink> SelectionController<S> {
    pub fn new(sink: S) -> Self {
        Self::with_config(&SelectionConfig::default(), sink)
    }

    pub fn with_config(config: &SelectionConfig, sink: S) -> Self {
        let mut memory = SelectionMemoryStore::new();
        memory.ensure(&config.default_project_key);
        Self {
            project_key: config.default_project_key.clone(),
            filter_mode: config.default_filter,
            sort_mode: config.default_sort,
            all_sessions: Vec::new(),
            selection: Selection::Root,
            memory,
            removal_signal: None,
            merge_signal: None,
            project_switching: false,
            sink,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn removal_signal(&self) -> Option<&RemovalSignal> {
        self.removal_signal.as_ref()
    }

    pub fn merge_signal(&self) -> Option<&MergeSignal> {
        self.merge_signal.as_ref()
    }

    pub fn is_project_switching(&self) -> bool {
        self.project_switching
    }

    pub fn visible_sessions(&self) -> Vec<Session> {
        visible_sessions(&self.all_sessions, self.filter_mode, self.sort_mode)
    }

    pub fn memory_entry(&mut self, filter_mode: FilterMode) -> &SelectionMemoryEntry {
        self.memory.entry(&self.project_key, filter_mode)
    }

    pub fn handle_event(&mut self, event: SelectionEvent) -> Option<SelectionChange> {
        log::debug!("Selection controller handling {}", event.as_str());
        match event {
            SelectionEvent::SessionsRefreshed { sessions } => {
                self.all_sessions = sessions;
                self.reconcile()
            }
            SelectionEvent::SessionRemoved { session_id } => {
                self.arm_removal(session_id);
                None
            }
            SelectionEvent::GitOperationCompleted {
                session_id,
                operation,
            } => {
                if operation == GitOperation::Merge {
                    log::debug!("Armed merge signal for {session_id}");
                    self.merge_signal = Some(MergeSignal { session_id });
                }
                None
            }
            SelectionEvent::FilterChanged { filter } => {
                if filter == self.filter_mode {
                    return None;
                }
                self.filter_mode = filter;
                self.reconcile()
            }
            SelectionEvent::SortChanged { sort } => {
                if sort == self.sort_mode {
                    return None;
                }
                self.sort_mode = sort;
                self.reconcile()
            }
            SelectionEvent::SelectionRequested { selection } => self.select(selection),
            SelectionEvent::ProjectSwitchStarted { project_key } => {
                self.begin_project_switch(project_key);
                None
            }
            SelectionEvent::ProjectSwitchCompleted => {
                self.project_switching = false;
                self.reconcile()
            }
        }
    }

    fn arm_removal(&mut self, session_id: String) {
        let was_reviewed = self
            .all_sessions
            .iter()
            .find(|s| s.id == session_id)
            .is_some_and(is_reviewed);
        log::debug!("Armed removal signal for {session_id} (reviewed: {was_reviewed})");
        self.removal_signal = Some(RemovalSignal {
            session_id,
            was_reviewed,
        });
    }

    fn select(&mut self, selection: Selection) -> Option<SelectionChange> {
        let mut change = match selection.session_id() {
            None => SelectionChange::root(),
            Some(id) => {
                let Some(session) = self.all_sessions.iter().find(|s| s.id == id) else {
                    log::warn!("Ignoring selection of unknown session {id}");
                    return None;
                };
                SelectionChange::for_session(session, classify(session))
            }
        };
        change.is_intentional = true;
        change.remember = true;

        let visible_here = match selection.session_id() {
            None => true,
            Some(id) => self.visible_sessions().iter().any(|s| s.id == id),
        };
        if visible_here {
            self.memory
                .entry(&self.project_key, self.filter_mode)
                .last_selection = selection.session_id().map(str::to_string);
        } else {
            log::debug!(
                "Selected session is hidden by the {} filter, leaving its memory untouched",
                self.filter_mode.as_str()
            );
        }
        self.emit(change)
    }

    fn begin_project_switch(&mut self, project_key: String) {
        if project_key == self.project_key {
            log::debug!("Project {project_key} already active, ignoring switch");
            return;
        }

        log::info!("Switching selection memory from {} to {project_key}", self.project_key);
        self.memory.reset(&self.project_key);
        self.memory.reset(&project_key);
        self.memory.ensure(&project_key);
        self.project_key = project_key;
        self.all_sessions.clear();
        self.removal_signal = None;
        self.merge_signal = None;
        self.project_switching = true;
    }

    fn reconcile(&mut self) -> Option<SelectionChange> {
        if self.project_switching {
            // One pass at most; a missing completion notice must not wedge selection.
            log::debug!("Skipping selection reconciliation during project switch");
            self.project_switching = false;
            return None;
        }

        let visible = self.visible_sessions();
        let entry = self.memory.entry(&self.project_key, self.filter_mode);
        let SelectionSnapshot { previous_sessions } = capture_selection_snapshot(entry, &visible);
        let remembered = entry.last_selection.clone();

        if visible.is_empty() {
            entry.last_selection = None;
            self.removal_signal = None;
            self.merge_signal = None;
            if self.selection.is_root() {
                return None;
            }
            log::debug!("No visible sessions under {} filter", self.filter_mode.as_str());
            return self.emit(SelectionChange::root());
        }

        let removal = self.removal_signal.clone();
        let merged = self.merge_signal.clone();
        if self.selection.is_root() && removal.is_none() {
            // A merge only matters to the session it was viewed on.
            if merged.is_some() {
                log::debug!("Dropping merge signal while root is selected");
                self.merge_signal = None;
            }
            return None;
        }

        let current = self.selection.session_id().map(str::to_string);
        let merged_id = merged.as_ref().map(|m| m.session_id.as_str());
        let merged_still_reviewed = merged_id
            .and_then(|id| self.all_sessions.iter().find(|s| s.id == id))
            .is_some_and(is_reviewed);
        let merge_pending =
            merged_id.is_some() && current.as_deref() == merged_id && merged_still_reviewed;
        let should_advance_from_merged =
            merged_id.is_some() && current.as_deref() == merged_id && !merged_still_reviewed;
        let should_preserve_for_reviewed_removal = removal.as_ref().is_some_and(|r| r.was_reviewed)
            && self.filter_mode != FilterMode::Reviewed;

        if let Some(current_id) = current.as_deref() {
            if !should_advance_from_merged && visible.iter().any(|s| s.id == current_id) {
                self.memory
                    .entry(&self.project_key, self.filter_mode)
                    .last_selection = Some(current_id.to_string());
                self.consume_signals(removal.as_ref(), merge_pending);
                return None;
            }
        }

        let candidate = compute_selection_candidate(&SelectionCandidateInput {
            current_selection: current.as_deref(),
            visible_sessions: &visible,
            previous_sessions: &previous_sessions,
            remembered_selection: remembered.as_deref(),
            removal_candidate: removal.as_ref().map(|r| r.session_id.as_str()),
            merged_candidate: merged_id,
            should_advance_from_merged,
            should_preserve_for_reviewed_removal,
            all_sessions: &self.all_sessions,
        });

        self.memory
            .entry(&self.project_key, self.filter_mode)
            .last_selection = candidate.clone();
        self.consume_signals(removal.as_ref(), merge_pending);

        match candidate {
            Some(id) if current.as_deref() == Some(id.as_str()) => None,
            Some(id) => {
                let session = self
                    .all_sessions
                    .iter()
                    .find(|s| s.id == id)
                    .or_else(|| visible.iter().find(|s| s.id == id));
                match session {
                    Some(session) => {
                        let change = SelectionChange::for_session(session, classify(session));
                        self.emit(change)
                    }
                    None => {
                        log::warn!("Selection candidate {id} is not a known session, falling back to root");
                        self.fall_back_to_root()
                    }
                }
            }
            None => self.fall_back_to_root(),
        }
    }

    /// The removal signal is always spent by a pass. The merge signal stays
    /// armed only while the merged session is still selected and still
    /// reported as reviewed, unless the same session was also removed.
    fn consume_signals(&mut self, removal: Option<&RemovalSignal>, merge_pending: bool) {
        let removed_id = removal.map(|r| r.session_id.as_str());
        let merged_was_removed = self
            .merge_signal
            .as_ref()
            .is_some_and(|m| Some(m.session_id.as_str()) == removed_id);

        self.removal_signal = None;
        if !merge_pending || merged_was_removed {
            self.merge_signal = None;
        }
    }

    fn fall_back_to_root(&mut self) -> Option<SelectionChange> {
        if self.selection.is_root() {
            return None;
        }
        self.emit(SelectionChange::root())
    }

    fn emit(&mut self, change: SelectionChange) -> Option<SelectionChange> {
        log::debug!("Selection changed to {:?}", change.selection);
        self.selection = change.selection.clone();
        self.sink.set_selection(&change);
        Some(change)
    }
}
