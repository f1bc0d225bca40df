use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use stockkeeper_inventory::Inventory;

use super::{SnapshotError, SnapshotStore};

/// JSON snapshot in a plain UTF-8 file.
///
/// Saves write the file in place (no temp file + rename), so a crash mid-write
/// can leave a truncated snapshot; the next load then treats it as corrupt.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SnapshotError {
        SnapshotError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn load(&self) -> Result<Option<Inventory>, SnapshotError> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };

        let inventory = serde_json::from_str(&data).map_err(|source| SnapshotError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(inventory))
    }

    fn save(&self, inventory: &Inventory) -> Result<(), SnapshotError> {
        let data = serde_json::to_string_pretty(inventory)?;
        std::fs::write(&self.path, data).map_err(|err| self.io_error(err))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockkeeper_core::ProductName;

    fn sample() -> Inventory {
        [
            (ProductName::new("Rice"), 42),
            (ProductName::new("Milk"), 0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path().join("stock_inventory.txt"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock_inventory.txt");
        let store = JsonFileSnapshotStore::new(&path);

        store.save(&sample()).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"Rice\": 42,\n  \"Milk\": 0\n}");
    }

    #[test]
    fn save_then_load_round_trips_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path().join("stock.json"));
        let original = sample();

        store.save(&original).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded, original);
        let order: Vec<_> = loaded.listing().map(|(n, q)| (n.to_string(), q)).collect();
        assert_eq!(order, vec![("Rice".to_string(), 42), ("Milk".to_string(), 0)]);
    }

    #[test]
    fn unparsable_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.json");
        std::fs::write(&path, "{ \"Rice\": 4").unwrap();

        let err = JsonFileSnapshotStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SnapshotError::Corrupt { .. }));
    }

    #[test]
    fn save_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path().join("missing").join("stock.json"));

        let err = store.save(&sample()).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }
}
