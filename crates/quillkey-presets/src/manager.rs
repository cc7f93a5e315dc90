//! Preset CRUD with validation
//!
//! The manager is the only writer of the preset document. Every mutation is
//! validated (shortcut normalizes, at least one key, unique across presets)
//! before it is persisted; the registry is rebuilt from the stored document
//! by whoever subscribes to store changes.

use std::sync::Arc;

use tracing::{debug, info};

use quillkey_shortcuts::normalizer::normalize_preset_shortcut;
use quillkey_storage::{get_doc, set_doc, KeyValueStore};

use crate::defaults::onboarding_presets;
use crate::error::PresetError;
use crate::models::{Preset, PresetsSettings};

/// Storage key for the preset collection document
pub const PRESETS_KEY: &str = "presets_settings";

/// Manages the persisted preset collection
pub struct PresetManager {
    store: Arc<dyn KeyValueStore>,
}

impl PresetManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        PresetManager { store }
    }

    /// Load the preset collection; seeds the onboarding defaults when the
    /// store is empty so at least one preset always exists.
    pub fn load(&self) -> Result<PresetsSettings, PresetError> {
        match get_doc::<PresetsSettings>(self.store.as_ref(), PRESETS_KEY)? {
            Some(settings) if !settings.presets.is_empty() => Ok(settings),
            _ => {
                info!("no presets stored, seeding onboarding defaults");
                let settings = onboarding_presets();
                self.save(&settings)?;
                Ok(settings)
            }
        }
    }

    /// Persist the whole collection
    pub fn save(&self, settings: &PresetsSettings) -> Result<(), PresetError> {
        set_doc(self.store.as_ref(), PRESETS_KEY, settings)?;
        Ok(())
    }

    /// Add a preset after validating its shortcut.
    ///
    /// The new preset becomes pinned, matching the behavior that a freshly
    /// created preset is the one the user wants to invoke next.
    pub fn add_preset(&self, preset: Preset) -> Result<PresetsSettings, PresetError> {
        let mut settings = self.load()?;
        self.validate_shortcut(&preset, &settings)?;

        debug!(preset = %preset.display_name, "adding preset");
        settings.pinned_preset_id = Some(preset.id.clone());
        settings.presets.push(preset);
        self.save(&settings)?;
        Ok(settings)
    }

    /// Replace an existing preset by id
    pub fn update_preset(&self, preset: Preset) -> Result<PresetsSettings, PresetError> {
        let mut settings = self.load()?;
        let index = settings
            .presets
            .iter()
            .position(|p| p.id == preset.id)
            .ok_or_else(|| PresetError::NotFound(preset.id.clone()))?;

        self.validate_shortcut(&preset, &settings)?;
        settings.presets[index] = preset;
        self.save(&settings)?;
        Ok(settings)
    }

    /// Delete a preset.
    ///
    /// Deleting the only remaining preset is refused; deleting the pinned
    /// preset reassigns "pinned" to the first remaining one.
    pub fn delete_preset(&self, id: &str) -> Result<PresetsSettings, PresetError> {
        let mut settings = self.load()?;
        if settings.presets.len() <= 1 {
            return Err(PresetError::LastPreset);
        }

        let index = settings
            .presets
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| PresetError::NotFound(id.to_string()))?;
        settings.presets.remove(index);

        if settings.pinned_preset_id.as_deref() == Some(id) {
            settings.pinned_preset_id = settings.presets.first().map(|p| p.id.clone());
        }

        self.save(&settings)?;
        Ok(settings)
    }

    /// Pin a preset for out-of-band invocation
    pub fn pin_preset(&self, id: &str) -> Result<PresetsSettings, PresetError> {
        let mut settings = self.load()?;
        if settings.preset_by_id(id).is_none() {
            return Err(PresetError::NotFound(id.to_string()));
        }
        settings.pinned_preset_id = Some(id.to_string());
        self.save(&settings)?;
        Ok(settings)
    }

    /// Shortcut validation: unbound is allowed; bound shortcuts must
    /// normalize (at least one modifier, one or two keys) and be unique
    /// among the other presets.
    fn validate_shortcut(&self, preset: &Preset, settings: &PresetsSettings) -> Result<(), PresetError> {
        if preset.shortcut.trim().is_empty() {
            return Ok(());
        }
        let key = normalize_preset_shortcut(&preset.shortcut)?;

        for other in &settings.presets {
            if other.id == preset.id || other.shortcut.trim().is_empty() {
                continue;
            }
            if let Ok(other_key) = normalize_preset_shortcut(&other.shortcut) {
                if other_key == key {
                    return Err(PresetError::DuplicateShortcut {
                        shortcut: key,
                        existing: other.display_name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
