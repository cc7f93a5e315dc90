//! In-memory store backend

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::trace;

use crate::error::StorageError;
use crate::store::{KeyValueStore, StoreChange};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Key-value store backed by a process-local map.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
    changes: broadcast::Sender<StoreChange>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        MemoryStore {
            entries: RwLock::new(HashMap::new()),
            changes,
        }
    }

    fn notify(&self, key: &str) {
        // Send fails only when nobody is subscribed, which is fine
        let _ = self.changes.send(StoreChange {
            key: key.to_string(),
        });
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        trace!(key, "memory store set");
        self.entries.write().insert(key.to_string(), value);
        self.notify(key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let removed = self.entries.write().remove(key).is_some();
        if removed {
            self.notify(key);
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}
