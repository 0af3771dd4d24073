// ── Durable key-value storage ──
//
// The session survives restarts by living under a single key in a small
// string-to-string store. Access is synchronous and local: a JSON file on
// disk for real use, a map in memory for tests and throwaway catalogs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{trace, warn};

use crate::error::CoreError;

/// Synchronous string key-value store.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

// ── MemoryStorage ───────────────────────────────────────────────────

/// Process-local storage. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A panic mid-insert cannot leave a BTreeMap half-written.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.entries().remove(key);
        Ok(())
    }
}

// ── FileStorage ─────────────────────────────────────────────────────

/// A flat JSON object on disk: `{ "key": "value", ... }`.
///
/// Every write rewrites the whole file through a sibling temp file and a
/// rename, so a crash never leaves a truncated store behind. A missing
/// file reads as empty. Reads of an unparsable file fail, but the next
/// write replaces it with a fresh store.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw(&self) -> Result<Option<String>, CoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(None),
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn parse(&self, raw: &str) -> Result<BTreeMap<String, String>, CoreError> {
        serde_json::from_str(raw).map_err(|e| CoreError::Storage {
            message: format!("{} is not a valid store: {e}", self.path.display()),
        })
    }

    fn load(&self) -> Result<BTreeMap<String, String>, CoreError> {
        match self.read_raw()? {
            Some(raw) => self.parse(&raw),
            None => Ok(BTreeMap::new()),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let body = serde_json::to_string_pretty(entries)?;
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        trace!(path = %self.path.display(), "storage flushed");
        Ok(())
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), CoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (mut entries, reset) = match self.read_raw()? {
            None => (BTreeMap::new(), false),
            Some(raw) => match self.parse(&raw) {
                Ok(entries) => (entries, false),
                Err(e) => {
                    warn!(error = %e, "replacing unreadable storage file");
                    (BTreeMap::new(), true)
                }
            },
        };
        if apply(&mut entries) || reset {
            self.save(&entries)?;
        }
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.update(|entries| entries.remove(key).is_some())
    }
}
