//! Key-value channel carrying review state between render passes.
//!
//! A card's front and back are rendered in separate page loads that share
//! no memory, only durable storage. The resolver writes through a
//! `SeedStore` on the front and consumes the entry on the back. Backends
//! are injected so hosts can plug in session storage, long-lived storage,
//! or the in-memory map used outside a browser.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Prefix of every persisted review key.
pub const STORAGE_KEY_PREFIX: &str = "anki.seed.";

/// Returns the storage key for a template's per-review seed.
#[must_use]
pub fn storage_key(template_id: &str) -> String {
    format!("{STORAGE_KEY_PREFIX}{template_id}")
}

/// Abstraction over a string key-value store.
pub trait SeedStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Storage` if the backend is unavailable.
    fn get(&self, key: &str) -> Result<Option<String>, GenerationError>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Storage` if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), GenerationError>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Storage` if the backend is unavailable.
    fn remove(&self, key: &str) -> Result<(), GenerationError>;
}

/// Process-local store, the last-resort tier when no durable storage exists.
#[derive(Debug, Default)]
pub struct MemorySeedStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySeedStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, GenerationError> {
        self.entries
            .lock()
            .map_err(|e| GenerationError::Storage(format!("memory store mutex poisoned: {e}")))
    }
}

impl SeedStore for MemorySeedStore {
    fn get(&self, key: &str) -> Result<Option<String>, GenerationError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), GenerationError> {
        self.lock()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), GenerationError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Durability tier a store was selected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageTier {
    /// Scoped to the current review session.
    Session,
    /// Survives across sessions.
    Persistent,
    /// Process-local fallback.
    Memory,
}

/// A store together with the tier it came from.
#[derive(Clone)]
pub struct SelectedStore {
    /// Tier the store was selected from.
    pub tier: StorageTier,
    /// The store itself.
    pub store: Arc<dyn SeedStore>,
}

impl fmt::Debug for SelectedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedStore")
            .field("tier", &self.tier)
            .finish_non_exhaustive()
    }
}

/// Selects the most durable available store: session, then persistent,
/// then a fresh in-memory map.
#[must_use]
pub fn select_store(
    session: Option<Arc<dyn SeedStore>>,
    persistent: Option<Arc<dyn SeedStore>>,
) -> SelectedStore {
    if let Some(store) = session {
        return SelectedStore {
            tier: StorageTier::Session,
            store,
        };
    }
    if let Some(store) = persistent {
        return SelectedStore {
            tier: StorageTier::Persistent,
            store,
        };
    }
    SelectedStore {
        tier: StorageTier::Memory,
        store: Arc::new(MemorySeedStore::new()),
    }
}
