//! Onboarding preset defaults
//!
//! Seeded on first run so the engine always has at least one preset. Each
//! default showcases one processing strategy.

use quillkey_transforms::StyleId;

use crate::models::{Preset, PresetKind, PresetsSettings};

/// Default shortcut for a preset by 1-based position: the first preset gets
/// Ctrl+Alt+T, positions 2-9 get Ctrl+Alt+<position>, later ones start
/// unbound.
pub fn default_shortcut(position: usize) -> String {
    match position {
        1 => "Ctrl+Alt+T".to_string(),
        2..=9 => format!("Ctrl+Alt+{}", position),
        _ => String::new(),
    }
}

const REWRITE_PROMPT: &str = "Rewrite the following text so it is clear, concise, and \
professional. Keep the original language and meaning.\n\n{{input}}";

/// Build the onboarding preset collection
pub fn onboarding_presets() -> PresetsSettings {
    let translate = Preset::new(
        "Translate to English",
        default_shortcut(1),
        PresetKind::Translation {
            source_language: "auto".to_string(),
            target_language: "en".to_string(),
            provider_override: None,
        },
    );

    let upside_down = Preset::new(
        "Upside Down Text",
        default_shortcut(2),
        PresetKind::StaticTransform {
            style: StyleId::UpsideDown,
        },
    );

    let rewrite = Preset::new(
        "Professional Rewrite",
        default_shortcut(3),
        PresetKind::LlmPrompt {
            prompt: REWRITE_PROMPT.to_string(),
            provider: "openai-compatible".to_string(),
            model: "gpt-4o-mini".to_string(),
        },
    );

    let pinned = translate.id.clone();
    PresetsSettings {
        presets: vec![translate, upside_down, rewrite],
        pinned_preset_id: Some(pinned),
    }
}
