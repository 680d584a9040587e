//! Test seed stores: recording and failing `SeedStore` implementations.

use std::collections::HashMap;
use std::sync::Mutex;

use dynamath_core::error::GenerationError;
use dynamath_core::storage::SeedStore;

/// One operation observed by a `RecordingSeedStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// `get(key)`.
    Get(String),
    /// `set(key, value)`.
    Set(String, String),
    /// `remove(key)`.
    Remove(String),
}

/// A working in-memory store that records every call, so tests can assert
/// on the exact write/consume pattern of the resolver.
#[derive(Debug, Default)]
pub struct RecordingSeedStore {
    entries: Mutex<HashMap<String, String>>,
    ops: Mutex<Vec<StoreOp>>,
}

impl RecordingSeedStore {
    /// Create an empty recording store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `key = value`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        store
    }

    /// Returns a snapshot of all recorded operations.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn ops(&self) -> Vec<StoreOp> {
        self.ops.lock().unwrap().clone()
    }

    /// Returns the current value under `key` without recording a `Get`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

impl SeedStore for RecordingSeedStore {
    fn get(&self, key: &str) -> Result<Option<String>, GenerationError> {
        self.ops.lock().unwrap().push(StoreOp::Get(key.to_owned()));
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), GenerationError> {
        self.ops
            .lock()
            .unwrap()
            .push(StoreOp::Set(key.to_owned(), value.to_owned()));
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), GenerationError> {
        self.ops.lock().unwrap().push(StoreOp::Remove(key.to_owned()));
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// A store that always returns a storage error. Useful for testing that
/// storage failures never abort a render.
#[derive(Debug)]
pub struct FailingSeedStore;

impl SeedStore for FailingSeedStore {
    fn get(&self, _key: &str) -> Result<Option<String>, GenerationError> {
        Err(GenerationError::Storage("storage unavailable".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), GenerationError> {
        Err(GenerationError::Storage("quota exceeded".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), GenerationError> {
        Err(GenerationError::Storage("storage unavailable".into()))
    }
}
