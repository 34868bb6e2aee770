//! The ranked layout dataset shared across runs

/// Rank assignment, merging and culling
pub mod ranking;
/// Persisted record shape
pub mod record;
/// Script-file loading and atomic saving
pub mod store;

pub use ranking::{cull, merge_run, rerank};
pub use record::{Record, Slot};
pub use store::{DatasetStore, ScriptFileStore};
