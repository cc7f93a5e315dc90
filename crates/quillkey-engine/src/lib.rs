//! Shortcut orchestration
//!
//! The engine crate ties the lower layers together: key events feed the
//! sequence detector, matched chords resolve to presets, the router runs
//! the preset's processing backend, and the verified insertion cascade
//! writes the result back into the focused surface.

pub mod engine;
pub mod error;
pub mod router;
pub mod settings;

pub use engine::{
    EnginePhase, KeyOutcome, ShortcutEngine, TracingNotifier, TriggerResponse, UserNotifier,
};
pub use error::EngineError;
pub use router::ProcessingRouter;
pub use settings::{
    LlmProviderSettings, ProviderSettings, TranslationSettings, PROVIDER_SETTINGS_KEY,
};
