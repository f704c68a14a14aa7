//! In-process storage backed by a shared map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{validate_key, Storage, StorageError};

/// A [`Storage`] that keeps its slots in memory.
///
/// Cloning a `MemoryStorage` gives another handle onto the SAME map, the
/// way two tabs of one origin see the same `localStorage`. Tests use this
/// to hand one handle to a session manager and keep another to inspect
/// what was persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots().len()
    }

    /// Returns `true` if no slot holds a value.
    pub fn is_empty(&self) -> bool {
        self.slots().is_empty()
    }

    // A panic while holding the lock can't leave the map half-written
    // (every operation is a single insert/remove), so a poisoned lock is
    // still safe to use.
    fn slots(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.slots().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.slots().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.slots().remove(key);
        Ok(())
    }
}
