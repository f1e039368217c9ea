//! In-memory preference store using DashMap

use dashmap::DashMap;

use super::PreferenceStore;
use crate::error::PreferenceError;

/// An in-memory preference store backed by a concurrent hash map.
///
/// Values are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    store: DashMap<String, String>,
}

impl MemoryPreferences {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.store.get(key).map(|entry| entry.value().clone()))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.store.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
