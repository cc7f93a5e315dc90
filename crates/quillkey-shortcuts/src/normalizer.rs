//! Shortcut string normalization
//!
//! Canonicalizes user-entered chord strings so permutations of the same
//! chord always produce the same registry key.

use std::str::FromStr;

use crate::error::ShortcutError;
use crate::event::Modifier;

/// Maximum non-modifier keys in a shortcut
pub const MAX_KEYS: usize = 2;

/// Normalize a raw chord string to canonical form.
///
/// - Tokens are `+`-separated and trimmed; modifier aliases (ctrl/control,
///   meta/cmd/command/super, ...) map to their canonical names
/// - Single-character keys are upper-cased, longer key names pass through
/// - Keys are sorted lexicographically so `alt+t+1` and `alt+1+t` both
///   normalize to `Alt+1+T`
/// - Output order is fixed: Ctrl, Alt, Shift, Meta, then sorted keys
///
/// Rejected forms:
/// - empty input
/// - at least one key but no modifier (would shadow host-page typing)
/// - more than [`MAX_KEYS`] non-modifier keys
pub fn normalize_shortcut(raw: &str) -> Result<String, ShortcutError> {
    let tokens: Vec<&str> = raw
        .split('+')
        .map(|token| token.trim())
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(ShortcutError::Empty);
    }

    let mut modifiers: Vec<Modifier> = Vec::new();
    let mut keys: Vec<String> = Vec::new();

    for token in tokens {
        match Modifier::from_str(token) {
            Ok(modifier) => {
                if !modifiers.contains(&modifier) {
                    modifiers.push(modifier);
                }
            }
            Err(_) => {
                let key = if token.chars().count() == 1 {
                    token.to_uppercase()
                } else {
                    token.to_string()
                };
                keys.push(key);
            }
        }
    }

    if modifiers.is_empty() && !keys.is_empty() {
        return Err(ShortcutError::KeyWithoutModifier(raw.to_string()));
    }
    if keys.len() > MAX_KEYS {
        return Err(ShortcutError::TooManyKeys(raw.to_string()));
    }

    keys.sort();

    let mut parts: Vec<String> = Modifier::CANONICAL_ORDER
        .iter()
        .filter(|m| modifiers.contains(m))
        .map(|m| m.to_string())
        .collect();
    parts.extend(keys);

    Ok(parts.join("+"))
}

/// Normalize a preset shortcut: same rules as [`normalize_shortcut`] plus a
/// modifier-only chord is rejected, since preset lookup needs at least one
/// non-modifier key to avoid shadowing platform shortcuts.
pub fn normalize_preset_shortcut(raw: &str) -> Result<String, ShortcutError> {
    let normalized = normalize_shortcut(raw)?;
    let has_key = normalized
        .split('+')
        .any(|part| Modifier::from_str(part).is_err());
    if !has_key {
        return Err(ShortcutError::ModifierOnly(raw.to_string()));
    }
    Ok(normalized)
}
