//! Whole-inventory snapshot persistence.
//!
//! A snapshot is the entire inventory serialized as one JSON object. Every
//! save overwrites the previous snapshot; there is no append log.

mod file;
mod in_memory;
mod r#trait;

pub use file::JsonFileSnapshotStore;
pub use in_memory::InMemorySnapshotStore;
pub use r#trait::{SnapshotError, SnapshotStore};
