use std::{collections::BTreeMap, fs, io, path::PathBuf};

use bike_runner_system_leaderboard::{KeyValueStore, StoreError};
use tracing::warn;

/// Key-value store persisted as a single JSON object on disk.
#[derive(Clone, Debug)]
pub(crate) struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by `path`; the file is created on first write.
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(error) => return Err(error.into()),
        };
        serde_json::from_str(&text).map_err(|error| {
            StoreError::Unavailable(format!("{} is not a store file: {error}", self.path.display()))
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(StoreError::Unavailable(reason)) => {
                warn!(%reason, "overwriting unreadable store file");
                BTreeMap::new()
            }
            Err(error) => return Err(error),
        };
        let _ = values.insert(key.to_owned(), value.to_owned());
        let text = serde_json::to_string_pretty(&values)
            .map_err(|error| StoreError::Unavailable(error.to_string()))?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}
