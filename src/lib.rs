#![deny(dead_code)]

pub mod domains;
pub mod errors;
pub mod infrastructure;

pub use domains::selection::{
    compute_selection_candidate, Selection, SelectionCandidateInput, SelectionChange,
    SelectionController, SelectionSink,
};
pub use domains::sessions::{FilterMode, Session, SessionState, SortMode};
pub use errors::{Result, SelectionError};
pub use infrastructure::events::{GitOperation, SelectionEvent};
