//! Shortcut-key registry
//!
//! Immutable map from normalized shortcut key to preset, rebuilt wholesale
//! whenever the preset collection changes so in-flight lookups never observe
//! a partially-updated registry.

use std::collections::HashMap;

use tracing::{debug, warn};

use quillkey_shortcuts::normalizer::normalize_preset_shortcut;

use crate::error::PresetError;
use crate::models::Preset;

/// Immutable lookup table from normalized shortcut key to preset
#[derive(Debug, Default)]
pub struct PresetRegistry {
    by_shortcut: HashMap<String, Preset>,
}

impl PresetRegistry {
    /// Build a registry from a preset collection.
    ///
    /// Presets with an empty shortcut are skipped (they are only reachable
    /// through the pinned-preset trigger). Presets whose shortcut fails
    /// normalization are skipped with a warning rather than poisoning the
    /// whole rebuild; colliding normalized shortcuts are an error.
    pub fn build(presets: &[Preset]) -> Result<Self, PresetError> {
        let mut by_shortcut: HashMap<String, Preset> = HashMap::new();

        for preset in presets {
            if preset.shortcut.trim().is_empty() {
                continue;
            }
            let key = match normalize_preset_shortcut(&preset.shortcut) {
                Ok(key) => key,
                Err(e) => {
                    warn!(preset = %preset.display_name, error = %e, "skipping preset with invalid shortcut");
                    continue;
                }
            };
            if let Some(existing) = by_shortcut.get(&key) {
                return Err(PresetError::DuplicateShortcut {
                    shortcut: key,
                    existing: existing.display_name.clone(),
                });
            }
            by_shortcut.insert(key, preset.clone());
        }

        debug!(entries = by_shortcut.len(), "preset registry built");
        Ok(PresetRegistry { by_shortcut })
    }

    /// Look up a preset by an already-normalized shortcut key
    pub fn lookup(&self, normalized_key: &str) -> Option<&Preset> {
        self.by_shortcut.get(normalized_key)
    }

    pub fn len(&self) -> usize {
        self.by_shortcut.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_shortcut.is_empty()
    }
}
