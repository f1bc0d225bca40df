use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use stockkeeper_inventory::Inventory;

use super::{SnapshotError, SnapshotStore};

const LOCATION: &str = "<memory>";

/// In-memory snapshot store for tests/dev.
///
/// Keeps the serialized JSON so loads go through the same decoding path as
/// the file store. Writes can be made to fail on demand.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    data: RwLock<Option<String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with raw snapshot text, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            data: RwLock::new(Some(raw.into())),
            ..Self::default()
        }
    }

    /// Make subsequent saves fail (`true`) or succeed (`false`).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw snapshot text as last written.
    pub fn raw(&self) -> Option<String> {
        self.data.read().ok().and_then(|d| d.clone())
    }

    fn poisoned() -> SnapshotError {
        SnapshotError::Io {
            path: LOCATION.into(),
            source: std::io::Error::other("snapshot lock poisoned"),
        }
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> Result<Option<Inventory>, SnapshotError> {
        let data = self.data.read().map_err(|_| Self::poisoned())?;
        let Some(raw) = data.as_deref() else {
            return Ok(None);
        };

        let inventory = serde_json::from_str(raw).map_err(|source| SnapshotError::Corrupt {
            path: LOCATION.into(),
            source,
        })?;
        Ok(Some(inventory))
    }

    fn save(&self, inventory: &Inventory) -> Result<(), SnapshotError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SnapshotError::Io {
                path: LOCATION.into(),
                source: std::io::Error::other("simulated write failure"),
            });
        }

        let raw = serde_json::to_string_pretty(inventory)?;
        let mut data = self.data.write().map_err(|_| Self::poisoned())?;
        *data = Some(raw);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        LOCATION.to_string()
    }
}
