//! Infrastructure layer: snapshot persistence, service orchestration, config.

pub mod config;
pub mod service;
pub mod snapshot;

pub use config::StoreConfig;
pub use service::{Receipt, ServiceError, StockService};
pub use snapshot::{InMemorySnapshotStore, JsonFileSnapshotStore, SnapshotError, SnapshotStore};
