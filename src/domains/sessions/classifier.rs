use super::entity::{Session, SessionState, SessionStatus};

/// Maps the backend's raw session fields onto the state the sidebar filters by.
///
/// Spec content is never considered ready, so a spec that somehow carries
/// `ready_to_merge` still classifies as `Spec`.
pub fn classify(session: &Session) -> SessionState {
    if session.session_state == SessionState::Spec || session.status == SessionStatus::Spec {
        SessionState::Spec
    } else if session.ready_to_merge {
        SessionState::Reviewed
    } else {
        SessionState::Running
    }
}

pub fn is_reviewed(session: &Session) -> bool {
    classify(session) == SessionState::Reviewed
}
