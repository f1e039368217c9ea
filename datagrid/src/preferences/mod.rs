//! Persisted UI preferences.
//!
//! Provides a `PreferenceStore` trait for raw string storage and a typed
//! `Preferences` wrapper serializing values as JSON. Tables use it to
//! remember the grouping toggle across sessions.

mod memory;

pub use memory::MemoryPreferences;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::PreferenceError;

/// Backend trait for preference storage.
///
/// Implementations handle raw string storage and retrieval.
/// [`Preferences`] wraps this with typed serialization.
pub trait PreferenceStore: Send + Sync {
    /// Get the raw value for a key.
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError>;

    /// Set the raw value for a key.
    fn save(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Typed preferences provider.
///
/// # Example
///
/// ```
/// use datagrid::preferences::{MemoryPreferences, Preferences};
///
/// let prefs = Preferences::new(MemoryPreferences::new());
/// prefs.set("proxy_hosts.group_by_domain", &true).unwrap();
/// assert_eq!(prefs.get::<bool>("proxy_hosts.group_by_domain").unwrap(), Some(true));
/// ```
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn PreferenceStore>,
}

impl fmt::Debug for Preferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preferences").finish_non_exhaustive()
    }
}

impl Preferences {
    /// Create a new preferences provider with the given store.
    pub fn new(store: impl PreferenceStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create a provider sharing an existing store.
    pub fn from_shared(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Get a typed value for a key.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PreferenceError> {
        match self.store.load(key)? {
            Some(raw) => Ok(Some(
                serde_json::from_str(&raw).map_err(PreferenceError::Deserialization)?,
            )),
            None => Ok(None),
        }
    }

    /// Get a typed value for a key, returning a default if not found.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, PreferenceError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Set a typed value for a key.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), PreferenceError> {
        let raw = serde_json::to_string(value).map_err(PreferenceError::Serialization)?;
        self.store.save(key, &raw)
    }
}
