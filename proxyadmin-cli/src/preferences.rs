//! Preference store backed by a JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use datagrid::PreferenceError;
use datagrid::preferences::PreferenceStore;

/// Preferences kept in a single JSON object on disk.
///
/// The file is read once when opened and rewritten on every save.
#[derive(Debug)]
pub struct JsonFilePreferences {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl JsonFilePreferences {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(PreferenceError::Deserialization)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("Opened preferences at {}", path.display());
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(values).map_err(PreferenceError::Serialization)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        self.flush(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_reopen() {
        let path = std::env::temp_dir()
            .join(format!("proxyadmin-prefs-{}", std::process::id()))
            .join("preferences.json");

        let store = JsonFilePreferences::open(&path).unwrap();
        assert_eq!(store.load("users.group").unwrap(), None);
        store.save("users.group", "true").unwrap();

        let reopened = JsonFilePreferences::open(&path).unwrap();
        assert_eq!(reopened.load("users.group").unwrap(), Some("true".to_string()));

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let path = std::env::temp_dir().join(format!("proxyadmin-corrupt-{}.json", std::process::id()));
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonFilePreferences::open(&path),
            Err(PreferenceError::Deserialization(_))
        ));
        fs::remove_file(&path).unwrap();
    }
}
