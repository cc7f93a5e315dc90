//! Key-value store contract

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;

use crate::error::StorageError;

/// Notification emitted after every successful write or removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    /// The key that changed
    pub key: String,
}

/// Contract for the settings/preset persistence collaborator.
///
/// Implementations must emit a [`StoreChange`] on every successful `set`
/// and `remove` so subscribers can react to external edits.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw JSON document stored under `key`, if present
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Write a raw JSON document under `key`
    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Remove the document under `key`; removing an absent key is a no-op
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Subscribe to change notifications
    fn subscribe(&self) -> broadcast::Receiver<StoreChange>;

    /// Read and deserialize a typed document
    fn get_doc<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        Self: Sized,
    {
        match self.get(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Serialize and write a typed document
    fn set_doc<T: Serialize>(&self, key: &str, doc: &T) -> Result<(), StorageError>
    where
        Self: Sized,
    {
        self.set(key, serde_json::to_value(doc)?)
    }
}

/// Typed-document helpers usable through `dyn KeyValueStore`
pub fn get_doc<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serialize and write a typed document through `dyn KeyValueStore`
pub fn set_doc<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    doc: &T,
) -> Result<(), StorageError> {
    store.set(key, serde_json::to_value(doc)?)
}
