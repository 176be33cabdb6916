//! Preference storage
//!
//! The host persists preferences as a string key/value store;
//! structured values are string-serialized JSON. [`PreferenceStore`] is
//! the seam, with an in-memory implementation for tests and a
//! JSON-file implementation for standalone use.

use ally_model::Preferences;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

/// Store key holding the serialized [`Preferences`]
pub const PREFS_KEY: &str = "ally.preferences";

/// Preference storage errors
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    /// Backing file could not be read or written
    #[error("prefs io: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be serialized
    #[error("prefs encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// String key/value preference store
pub trait PreferenceStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    ///
    /// # Errors
    /// Propagates backing-store failures.
    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file-backed store
///
/// The whole map is rewritten on every `set`; preference writes are
/// rare and small.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading any existing map
    ///
    /// # Errors
    /// Fails when an existing file cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        let mut values = self.values.lock();
        values.insert(key.to_string(), value.to_string());
        let raw = serde_json::to_string_pretty(&*values)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// Load preferences, falling back to defaults on a missing or
/// unreadable entry
#[must_use]
pub fn load_preferences(store: &dyn PreferenceStore) -> Preferences {
    let Some(raw) = store.get(PREFS_KEY) else {
        return Preferences::default();
    };
    match serde_json::from_str(&raw) {
        Ok(prefs) => prefs,
        Err(err) => {
            warn!(error = %err, "stored preferences unreadable; using defaults");
            Preferences::default()
        }
    }
}

/// Persist preferences as string-serialized JSON
///
/// # Errors
/// Propagates backing-store failures.
pub fn save_preferences(
    store: &dyn PreferenceStore,
    prefs: &Preferences,
) -> Result<(), PrefsError> {
    let raw = serde_json::to_string(prefs)?;
    store.set(PREFS_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ally_model::BreakpointDef;

    #[test]
    fn memory_round_trip() {
        let store = MemoryStore::new();
        let mut prefs = Preferences::default();
        prefs.condensed_ui = true;
        prefs.custom_breakpoints.push(BreakpointDef {
            width: 480,
            label: "Phablet".to_string(),
        });
        save_preferences(&store, &prefs).unwrap();
        assert_eq!(load_preferences(&store), prefs);
    }

    #[test]
    fn corrupt_entry_falls_back_to_defaults() {
        let store = MemoryStore::new();
        store.set(PREFS_KEY, "{not json").unwrap();
        assert_eq!(load_preferences(&store), Preferences::default());
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let store = JsonFileStore::open(&path).unwrap();
        let mut prefs = Preferences::default();
        prefs.session_count = 7;
        save_preferences(&store, &prefs).unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(load_preferences(&reopened).session_count, 7);
    }
}
