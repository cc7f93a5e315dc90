//! Keyboard chord normalization and sequence detection
//!
//! This crate turns raw keyboard input into canonical shortcut strings:
//! - `KeyEvent` models a platform key event (key, physical code, modifiers)
//! - `normalize_shortcut` canonicalizes a user-entered chord string
//! - `SequenceDetector` recognizes up-to-two-key sequences under a held
//!   modifier chord with a timeout-based reset
//!
//! Canonical form is always `Ctrl+Alt+Shift+Meta` (only the held ones, in
//! that order) followed by the non-modifier keys sorted lexicographically,
//! `+`-joined. Sorting makes `Alt+T+1` and `Alt+1+T` resolve identically.

pub mod error;
pub mod event;
pub mod normalizer;
pub mod sequence;

pub use error::ShortcutError;
pub use event::{chord_from_event, normalized_key, KeyEvent, Modifier};
pub use normalizer::normalize_shortcut;
pub use sequence::SequenceDetector;
