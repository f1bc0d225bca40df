//! Configuration loading and representation.

use std::path::PathBuf;

use crate::snapshot::JsonFileSnapshotStore;

/// Environment variable naming the snapshot file.
pub const DATA_FILE_ENV: &str = "STOCKKEEPER_DATA_FILE";

/// Snapshot file used when `STOCKKEEPER_DATA_FILE` is unset or blank.
pub const DEFAULT_DATA_FILE: &str = "stock_inventory.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl StoreConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_file = lookup(DATA_FILE_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        Self { data_file }
    }

    pub fn snapshot_store(&self) -> JsonFileSnapshotStore {
        JsonFileSnapshotStore::new(&self.data_file)
    }
}
