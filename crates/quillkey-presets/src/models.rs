//! Preset data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quillkey_transforms::StyleId;

/// A per-preset translation provider override.
///
/// When present, the call is served by a transient provider scoped to that
/// single invocation; there is no fallback to the globally configured one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOverride {
    /// Provider identifier (e.g. "openai-compatible", "deepl")
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// The processing strategy a preset resolves to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PresetKind {
    /// Remote translation between two languages
    Translation {
        /// ISO code or "auto"
        source_language: String,
        target_language: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        provider_override: Option<ProviderOverride>,
    },
    /// Built-in reversible character mapping
    StaticTransform { style: StyleId },
    /// Reference to an externally stored char-substitution map
    CustomTransform { transform_id: String },
    /// Templated LLM prompt with one `{{input}}` placeholder.
    /// `model` is always a resolved model name, never a sentinel.
    LlmPrompt {
        prompt: String,
        provider: String,
        model: String,
    },
}

/// A shortcut-bound text rewrite preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub display_name: String,
    /// Raw chord/sequence string as entered; normalized at registry build
    pub shortcut: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: PresetKind,
}

impl Preset {
    pub fn new(display_name: impl Into<String>, shortcut: impl Into<String>, kind: PresetKind) -> Self {
        Preset {
            id: uuid::Uuid::new_v4().to_string(),
            display_name: display_name.into(),
            shortcut: shortcut.into(),
            created_at: Utc::now(),
            kind,
        }
    }
}

/// The persisted preset collection.
///
/// Exactly one preset may be pinned for out-of-band invocation; a stale
/// pinned id falls back to the first preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresetsSettings {
    pub presets: Vec<Preset>,
    #[serde(default)]
    pub pinned_preset_id: Option<String>,
}

impl PresetsSettings {
    /// The preset invoked by the out-of-band trigger.
    ///
    /// Falls back to the first preset when the pinned id is stale or unset.
    pub fn pinned_preset(&self) -> Option<&Preset> {
        if let Some(id) = &self.pinned_preset_id {
            if let Some(preset) = self.presets.iter().find(|p| &p.id == id) {
                return Some(preset);
            }
        }
        self.presets.first()
    }

    pub fn preset_by_id(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }
}
