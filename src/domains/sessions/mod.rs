pub mod classifier;
pub mod entity;
pub mod visibility;

pub use classifier::{classify, is_reviewed};
pub use entity::{FilterMode, Session, SessionState, SessionStatus, SortMode};
pub use visibility::visible_sessions;
