//! Persisting small values across sessions.
//!
//! The search term survives restarts by being written through to a
//! [`KeyValueStorage`] on every change. [`SemiPersistentValue`] is the
//! orchestration-layer wrapper that owns that write-through discipline;
//! [`JsonFileStorage`] is the production store, a single JSON object on
//! disk. Reducers never touch either.

use listflow_core::environment::KeyValueStorage;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// A value mirrored into durable storage on every change
///
/// On construction the stored value wins over the supplied default; the
/// default is only used (and immediately persisted) when the key has never
/// been written. Every [`set`](Self::set) writes through before returning,
/// so a crash at any point finds the last accepted value on disk.
pub struct SemiPersistentValue<S> {
    storage: Arc<S>,
    key: String,
    value: String,
}

impl<S: KeyValueStorage> SemiPersistentValue<S> {
    /// Creates a value backed by `key` in `storage`
    ///
    /// Loads the stored value, falling back to `default` (which is then
    /// persisted so the next session sees the same value).
    #[must_use]
    pub fn new(storage: Arc<S>, key: impl Into<String>, default: impl Into<String>) -> Self {
        let key = key.into();
        let value = match storage.load(&key) {
            Some(stored) => stored,
            None => {
                let default = default.into();
                storage.save(&key, &default);
                default
            },
        };

        Self {
            storage,
            key,
            value,
        }
    }

    /// The current value
    #[must_use]
    pub fn get(&self) -> &str {
        &self.value
    }

    /// Replaces the value and writes it through to storage
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.storage.save(&self.key, &self.value);
    }
}

impl<S> std::fmt::Debug for SemiPersistentValue<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemiPersistentValue")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// Key-value storage persisted as one JSON object on disk
///
/// The whole map is held in memory and rewritten on every save; the files
/// involved hold a handful of short strings, so simplicity wins over
/// incremental writes. I/O failures degrade to warnings per the
/// [`KeyValueStorage`] contract: a session that cannot persist still runs,
/// it just starts fresh next time.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStorage {
    /// Opens (or initializes) storage at `path`
    ///
    /// A missing file starts empty; an unreadable or corrupt file is logged
    /// and treated as empty rather than failing the session.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "Ignoring corrupt storage file");
                    HashMap::new()
                },
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Could not read storage file");
                HashMap::new()
            },
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let json = match serde_json::to_string_pretty(entries) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(%error, "Could not encode storage contents");
                return;
            },
        };

        if let Err(error) = std::fs::write(&self.path, json) {
            tracing::warn!(path = %self.path.display(), %error, "Could not write storage file");
        }
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn save(&self, key: &str, value: &str) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries);
    }
}
