use super::classifier::{classify, is_reviewed};
use super::entity::{FilterMode, Session, SessionState, SortMode};
use std::cmp::Ordering;

pub fn apply_session_filter(sessions: Vec<Session>, filter_mode: FilterMode) -> Vec<Session> {
    match filter_mode {
        FilterMode::All => sessions,
        FilterMode::Spec => sessions
            .into_iter()
            .filter(|s| classify(s) == SessionState::Spec)
            .collect(),
        FilterMode::Running => sessions
            .into_iter()
            .filter(|s| classify(s) == SessionState::Running)
            .collect(),
        FilterMode::Reviewed => sessions.into_iter().filter(is_reviewed).collect(),
    }
}

/// Reviewed sessions always trail the list and are ordered by name,
/// whatever the requested mode.
pub fn apply_session_sort(sessions: Vec<Session>, sort_mode: SortMode) -> Vec<Session> {
    let (mut reviewed, mut unreviewed): (Vec<Session>, Vec<Session>) =
        sessions.into_iter().partition(is_reviewed);

    sort_sessions_by_mode(&mut unreviewed, sort_mode);
    sort_sessions_by_mode(&mut reviewed, SortMode::Name);

    unreviewed.extend(reviewed);
    unreviewed
}

pub fn sort_sessions_by_mode(sessions: &mut [Session], sort_mode: SortMode) {
    match sort_mode {
        SortMode::Name => {
            sessions.sort_by(|a, b| {
                state_priority(a)
                    .cmp(&state_priority(b))
                    .then_with(|| a.id.to_lowercase().cmp(&b.id.to_lowercase()))
            });
        }
        SortMode::Created => {
            sessions.sort_by(|a, b| newest_first(a.created_at, b.created_at, a, b));
        }
        SortMode::LastEdited => {
            sessions.sort_by(|a, b| {
                newest_first(
                    a.last_modified.or(a.created_at),
                    b.last_modified.or(b.created_at),
                    a,
                    b,
                )
            });
        }
    }
}

pub fn visible_sessions(all: &[Session], filter_mode: FilterMode, sort_mode: SortMode) -> Vec<Session> {
    let filtered = apply_session_filter(all.to_vec(), filter_mode);
    apply_session_sort(filtered, sort_mode)
}

fn state_priority(session: &Session) -> u8 {
    match classify(session) {
        SessionState::Spec => 0,
        SessionState::Running => 1,
        SessionState::Reviewed => 2,
    }
}

fn newest_first<T: Ord>(a_time: Option<T>, b_time: Option<T>, a: &Session, b: &Session) -> Ordering {
    match (a_time, b_time) {
        (Some(a_time), Some(b_time)) => b_time.cmp(&a_time),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    }
}
