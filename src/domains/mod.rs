pub mod selection;
pub mod sessions;
