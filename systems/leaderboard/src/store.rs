use std::collections::HashMap;

use thiserror::Error;

/// Failure reported by a key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store cannot be reached at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// Reading or writing the backing medium failed.
    #[error("store i/o failed")]
    Io(#[from] std::io::Error),
}

/// String key-value store the leaderboard persists through.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Process-local store backed by a hash map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `value` under `key`.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        let _ = store.values.insert(key.to_owned(), value.to_owned());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let _ = self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
