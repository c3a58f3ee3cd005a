pub mod controller;
pub mod memory;
pub mod resolver;
pub mod types;


pub use controller::{SelectionController, SelectionSink};
pub use memory::{capture_selection_snapshot, SelectionMemoryStore, SelectionSnapshot};
pub use resolver::{compute_selection_candidate, SelectionCandidateInput};
pub use types::{MergeSignal, RemovalSignal, Selection, SelectionChange, SelectionMemoryEntry};
