//! Static text transformations
//!
//! Pure, synchronous character transformations: built-in Unicode styles
//! identified by [`StyleId`] and user-defined char-substitution maps.
//! Unmapped characters always pass through unchanged.

pub mod maps;
pub mod style;

pub use style::StyleId;

use std::collections::HashMap;

/// Transform text with a built-in style.
pub fn transform(text: &str, style: StyleId) -> String {
    if text.is_empty() {
        return String::new();
    }

    match style {
        StyleId::Bold => maps::map_chars(text, &maps::BOLD),
        StyleId::Italic => maps::map_chars(text, &maps::ITALIC),
        StyleId::BoldItalic => maps::map_chars(text, &maps::BOLD_ITALIC),
        StyleId::Monospace => maps::map_chars(text, &maps::MONOSPACE),
        StyleId::DoubleStruck => maps::map_chars(text, &maps::DOUBLE_STRUCK),
        StyleId::Fullwidth => maps::map_chars(text, &maps::FULLWIDTH),
        StyleId::Circled => maps::map_chars(text, &maps::CIRCLED),
        StyleId::SmallCaps => maps::map_chars(text, &maps::SMALL_CAPS),
        StyleId::Leet => maps::map_chars(text, &maps::LEET),
        StyleId::Rot13 => maps::rot13(text),
        StyleId::Strikethrough => maps::strikethrough(text),
        StyleId::UpsideDown => maps::map_chars_reversed(text, &maps::UPSIDE_DOWN),
        StyleId::Mirror => maps::map_chars_reversed(text, &maps::MIRROR),
    }
}

/// Apply a user-defined char-to-string substitution map.
///
/// Characters absent from the map pass through unchanged; an empty map is
/// the identity function.
pub fn apply_char_map(text: &str, char_map: &HashMap<char, String>) -> String {
    text.chars()
        .map(|c| match char_map.get(&c) {
            Some(replacement) => replacement.clone(),
            None => c.to_string(),
        })
        .collect()
}
