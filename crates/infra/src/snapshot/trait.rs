use std::path::PathBuf;

use thiserror::Error;

use stockkeeper_inventory::Inventory;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Snapshot storage abstraction.
///
/// Implementations read and overwrite one snapshot; they never merge.
pub trait SnapshotStore {
    /// Read the snapshot. `Ok(None)` means no snapshot has been written yet.
    fn load(&self) -> Result<Option<Inventory>, SnapshotError>;

    /// Overwrite the snapshot with the full inventory.
    fn save(&self, inventory: &Inventory) -> Result<(), SnapshotError>;

    /// Where the snapshot lives, for diagnostics.
    fn location(&self) -> String;
}

impl<S> SnapshotStore for &S
where
    S: SnapshotStore + ?Sized,
{
    fn load(&self) -> Result<Option<Inventory>, SnapshotError> {
        (**self).load()
    }

    fn save(&self, inventory: &Inventory) -> Result<(), SnapshotError> {
        (**self).save(inventory)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
