//! Property tests for shortcut normalization and registry matching.

use proptest::prelude::*;

use quillkey_presets::{Preset, PresetKind, PresetRegistry};
use quillkey_shortcuts::normalize_shortcut;
use quillkey_shortcuts::{KeyEvent, SequenceDetector};
use quillkey_transforms::StyleId;

fn modifier_subset() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(vec!["Ctrl", "Alt", "Shift", "Meta"], 1..=4)
}

fn key_pair() -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(
        vec!["A", "B", "T", "1", "2", "9"],
        1..=2,
    )
    .prop_map(|keys| keys.into_iter().map(String::from).collect())
}

fn preset_with(shortcut: &str) -> Preset {
    Preset::new(
        "Prop",
        shortcut,
        PresetKind::StaticTransform {
            style: StyleId::Rot13,
        },
    )
}

proptest! {
    /// Any permutation of the same parts normalizes to the same key.
    #[test]
    fn shuffled_shortcut_parts_normalize_identically(
        modifiers in modifier_subset(),
        keys in key_pair(),
        seed in any::<u64>(),
    ) {
        let mut parts: Vec<String> = modifiers
            .iter()
            .map(|m| m.to_string())
            .chain(keys.iter().cloned())
            .collect();
        let canonical = normalize_shortcut(&parts.join("+")).unwrap();

        // Deterministic shuffle from the seed
        let len = parts.len();
        for i in 0..len {
            let j = (seed as usize).wrapping_add(i * 7) % len;
            parts.swap(i, j);
        }
        let shuffled = normalize_shortcut(&parts.join("+")).unwrap();
        prop_assert_eq!(canonical, shuffled);
    }

    /// A registry built from any spelling of a shortcut matches the chord
    /// the detector emits for the equivalent key events.
    #[test]
    fn registry_matches_detector_candidates(
        keys in key_pair(),
    ) {
        let spelling = format!("Ctrl+Alt+{}", keys.join("+"));
        let registry = PresetRegistry::build(&[preset_with(&spelling)]).unwrap();

        let mut detector = SequenceDetector::new();
        let mut last_candidate = None;
        for key in &keys {
            let event = KeyEvent::new(key.to_lowercase(), format!("Key{}", key))
                .with_modifiers(true, true, false, false);
            last_candidate = detector.process_key_down(&event);
        }

        let candidate = last_candidate.expect("keys with modifiers emit a candidate");
        prop_assert!(registry.lookup(&candidate).is_some());
    }

    /// Normalization is idempotent.
    #[test]
    fn normalization_is_idempotent(
        modifiers in modifier_subset(),
        keys in key_pair(),
    ) {
        let parts: Vec<String> = modifiers
            .iter()
            .map(|m| m.to_string())
            .chain(keys.iter().cloned())
            .collect();
        let once = normalize_shortcut(&parts.join("+")).unwrap();
        let twice = normalize_shortcut(&once).unwrap();
        prop_assert_eq!(once, twice);
    }
}
