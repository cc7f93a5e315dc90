//! Settings and preset persistence
//!
//! A small key-value store abstraction over the host's settings storage.
//! Documents are JSON values addressed by string keys; every write emits a
//! change notification so the engine can rebuild its preset registry.
//!
//! Two backends:
//! - [`MemoryStore`] — in-process map, used in embedding hosts that bring
//!   their own persistence and in tests
//! - [`FileStore`] — a single JSON document on disk

pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{get_doc, set_doc, KeyValueStore, StoreChange};
