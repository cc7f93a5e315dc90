//! Preset management
//!
//! A preset binds a keyboard shortcut to one processing strategy:
//! translation, a built-in static transform, a user-defined char map, or a
//! templated LLM prompt. This crate owns the preset data model, CRUD with
//! validation (shortcut uniqueness, modifier-only rejection, at-least-one),
//! the immutable shortcut-key registry, the onboarding defaults, and the
//! sharded storage of custom char-map transforms.

pub mod custom;
pub mod defaults;
pub mod error;
pub mod manager;
pub mod models;
pub mod registry;

pub use custom::{CustomTransform, CustomTransformService, MAX_CUSTOM_TRANSFORMS};
pub use defaults::onboarding_presets;
pub use error::PresetError;
pub use manager::PresetManager;
pub use models::{Preset, PresetKind, PresetsSettings, ProviderOverride};
pub use registry::PresetRegistry;
