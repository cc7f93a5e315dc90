//! Shared utilities for quillkey crates
//!
//! Provides:
//! - Logging bootstrap built on tracing
//! - JSON load/save helpers used by the storage backends

pub mod json_store;
pub mod logging;

pub use json_store::{load_json, load_json_or_default, save_json, JsonStoreError};
pub use logging::init_logging;
