//! Test stores — mock `KeyValueStore` implementations for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use memory_lane_core::error::DomainError;
use memory_lane_core::store::KeyValueStore;

/// A key-value store held in memory. Records how many writes it received.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.seed(key, value);
        store
    }

    /// Writes an entry without recording it as a write.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
    }

    /// Returns the raw value stored under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Returns every `set` call in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.seed(key, value);
        self.writes
            .lock()
            .unwrap()
            .push((key.to_owned(), value.to_owned()));
        Ok(())
    }
}

/// A key-value store that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingKeyValueStore;

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, DomainError> {
        Err(DomainError::Infrastructure("storage unavailable".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("storage unavailable".into()))
    }
}
