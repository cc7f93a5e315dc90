//! JSON-file store backend
//!
//! All keys live in one JSON object persisted to disk on every write.
//! Suited to the small documents this system stores (presets, settings,
//! sharded custom-transform items).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::debug;

use quillkey_common::{load_json_or_default, save_json};

use crate::error::StorageError;
use crate::store::{KeyValueStore, StoreChange};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Key-value store persisted as a single JSON document.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, Value>>,
    changes: broadcast::Sender<StoreChange>,
}

impl FileStore {
    /// Open (or create) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries: HashMap<String, Value> = load_json_or_default(&path)?;
        debug!(path = %path.display(), keys = entries.len(), "file store opened");

        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Ok(FileStore {
            path,
            entries: Mutex::new(entries),
            changes,
        })
    }

    fn persist(&self, entries: &HashMap<String, Value>) -> Result<(), StorageError> {
        save_json(&self.path, entries)?;
        Ok(())
    }

    fn notify(&self, key: &str) {
        let _ = self.changes.send(StoreChange {
            key: key.to_string(),
        });
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value);
        self.persist(&entries)?;
        drop(entries);
        self.notify(key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        let removed = entries.remove(key).is_some();
        if removed {
            self.persist(&entries)?;
        }
        drop(entries);
        if removed {
            self.notify(key);
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}
