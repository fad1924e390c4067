//! Orchestration services for backend selection.

mod selector;

pub use selector::BackendSelector;
