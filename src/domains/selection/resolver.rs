//! Picks the session the sidebar should focus after its visible list changed.
//!
//! Rules are evaluated in a fixed order and the first one that yields a
//! candidate wins. Their preconditions overlap, so the order is part of the
//! contract:
//!
//! 1. a removed session is replaced by whatever now sits at its index;
//! 2. a merged reviewed session advances to the next reviewed session;
//! 3. removing a reviewed session outside the reviewed filter keeps the
//!    current selection or falls back to the root view;
//! 4. otherwise, remembered selection and positional fallbacks.
//!
//! `None` means "select the root view".

use crate::domains::sessions::{is_reviewed, Session};

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionCandidateInput<'a> {
    pub current_selection: Option<&'a str>,
    /// Sessions visible under the active filter after the change.
    pub visible_sessions: &'a [Session],
    /// Sessions visible under the active filter before the change.
    pub previous_sessions: &'a [Session],
    pub remembered_selection: Option<&'a str>,
    pub removal_candidate: Option<&'a str>,
    pub merged_candidate: Option<&'a str>,
    pub should_advance_from_merged: bool,
    pub should_preserve_for_reviewed_removal: bool,
    /// Unfiltered session list, used to find the remaining reviewed sessions.
    pub all_sessions: &'a [Session],
}

pub fn compute_selection_candidate(input: &SelectionCandidateInput<'_>) -> Option<String> {
    if let Some(replacement) = replacement_for_removed(input) {
        log::debug!("Selection moves to {replacement} after removal");
        return Some(replacement);
    }

    if input.should_advance_from_merged {
        if let Some(next) = input
            .merged_candidate
            .and_then(|merged| next_reviewed_after(merged, input))
        {
            log::debug!("Selection advances to reviewed session {next} after merge");
            return Some(next);
        }
    }

    if input.should_preserve_for_reviewed_removal {
        return input
            .current_selection
            .filter(|current| contains(input.visible_sessions, current))
            .map(str::to_string);
    }

    positional_fallback(input)
}

fn replacement_for_removed(input: &SelectionCandidateInput<'_>) -> Option<String> {
    let removed = input.removal_candidate?;
    let index = position(input.previous_sessions, removed)?;
    let ordered = ordered_visible(input);

    ordered
        .get(index)
        .or_else(|| index.checked_sub(1).and_then(|prev| ordered.get(prev)))
        .or_else(|| ordered.first())
        .map(|id| id.to_string())
}

fn next_reviewed_after(merged: &str, input: &SelectionCandidateInput<'_>) -> Option<String> {
    let previous_reviewed: Vec<&str> = input
        .previous_sessions
        .iter()
        .filter(|s| s.ready_to_merge)
        .map(|s| s.id.as_str())
        .collect();

    if let Some(index) = previous_reviewed.iter().position(|id| *id == merged) {
        if let Some(next) = previous_reviewed.get(index + 1) {
            return Some(next.to_string());
        }
    }

    input
        .all_sessions
        .iter()
        .filter(|s| is_reviewed(s) && s.id != merged)
        .map(|s| s.id.as_str())
        .min()
        .map(str::to_string)
}

fn positional_fallback(input: &SelectionCandidateInput<'_>) -> Option<String> {
    let merged = input.merged_candidate;
    let visible = input.visible_sessions;

    if let Some(current) = input.current_selection {
        if Some(current) != merged && contains(visible, current) {
            return Some(current.to_string());
        }
    }

    if let Some(remembered) = input.remembered_selection {
        if Some(remembered) != merged && contains(visible, remembered) {
            return Some(remembered.to_string());
        }
    }

    let baseline = input
        .current_selection
        .or(input.remembered_selection)
        .or(input.removal_candidate)
        .or(merged);

    if let Some(index) = baseline.and_then(|id| position(input.previous_sessions, id)) {
        let ordered = ordered_visible(input);
        if let Some(last) = ordered.len().checked_sub(1) {
            return Some(ordered[index.min(last)].to_string());
        }
    }

    if let Some(survivor) = input
        .previous_sessions
        .iter()
        .map(|s| s.id.as_str())
        .find(|id| Some(*id) != merged && contains(visible, id))
    {
        return Some(survivor.to_string());
    }

    visible
        .iter()
        .map(|s| s.id.as_str())
        .find(|id| Some(*id) != merged)
        .map(str::to_string)
}

/// Visible ids with the merged session left out; it is never a valid target
/// while its merge is still being processed.
fn ordered_visible<'a>(input: &SelectionCandidateInput<'a>) -> Vec<&'a str> {
    input
        .visible_sessions
        .iter()
        .map(|s| s.id.as_str())
        .filter(|id| Some(*id) != input.merged_candidate)
        .collect()
}

fn position(sessions: &[Session], id: &str) -> Option<usize> {
    sessions.iter().position(|s| s.id == id)
}

fn contains(sessions: &[Session], id: &str) -> bool {
    sessions.iter().any(|s| s.id == id)
}
