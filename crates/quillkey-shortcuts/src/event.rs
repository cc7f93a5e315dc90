//! Platform key-event model and event-level key normalization
//!
//! Numpad handling matters on Windows: with NumLock on, `Shift+Numpad1`
//! reports key `End` while the physical code stays `Numpad1`. The physical
//! code is therefore authoritative for digit keys, main row and numpad alike.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ShortcutError;

/// A keyboard modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
    Meta,
}

impl Modifier {
    /// All modifiers in canonical output order
    pub const CANONICAL_ORDER: [Modifier; 4] =
        [Modifier::Ctrl, Modifier::Alt, Modifier::Shift, Modifier::Meta];
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Ctrl => write!(f, "Ctrl"),
            Modifier::Alt => write!(f, "Alt"),
            Modifier::Shift => write!(f, "Shift"),
            Modifier::Meta => write!(f, "Meta"),
        }
    }
}

impl FromStr for Modifier {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ctrl" | "control" => Ok(Modifier::Ctrl),
            "alt" => Ok(Modifier::Alt),
            "shift" => Ok(Modifier::Shift),
            "meta" | "cmd" | "command" | "super" => Ok(Modifier::Meta),
            _ => Err(ShortcutError::Empty),
        }
    }
}

/// A raw keyboard event as delivered by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Logical key value (e.g. "t", "End", "Control")
    pub key: String,
    /// Physical key code (e.g. "KeyT", "Digit1", "Numpad1")
    pub code: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, code: impl Into<String>) -> Self {
        KeyEvent {
            key: key.into(),
            code: code.into(),
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
        }
    }

    pub fn with_modifiers(mut self, ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        self.ctrl = ctrl;
        self.alt = alt;
        self.shift = shift;
        self.meta = meta;
        self
    }

    /// Modifiers held during this event, in canonical order
    pub fn held_modifiers(&self) -> Vec<Modifier> {
        let mut held = Vec::new();
        if self.ctrl {
            held.push(Modifier::Ctrl);
        }
        if self.alt {
            held.push(Modifier::Alt);
        }
        if self.shift {
            held.push(Modifier::Shift);
        }
        if self.meta {
            held.push(Modifier::Meta);
        }
        held
    }

    pub fn has_modifier(&self) -> bool {
        self.ctrl || self.alt || self.shift || self.meta
    }
}

/// Normalize the non-modifier key of an event, if any.
///
/// - `Digit0`-`Digit9` and `Numpad0`-`Numpad9` codes yield the digit itself,
///   regardless of what the logical key reports (NumLock/Shift quirks)
/// - Modifier keys yield `None`
/// - Single characters are upper-cased; longer key names pass through
pub fn normalized_key(event: &KeyEvent) -> Option<String> {
    if let Some(digit) = event.code.strip_prefix("Digit") {
        if !digit.is_empty() {
            return Some(digit.to_string());
        }
    }
    if let Some(digit) = event.code.strip_prefix("Numpad") {
        if !digit.is_empty() {
            return Some(digit.to_string());
        }
    }

    match event.key.as_str() {
        "Control" | "Alt" | "Shift" | "Meta" => None,
        key if key.chars().count() == 1 => Some(key.to_uppercase()),
        "" => None,
        key => Some(key.to_string()),
    }
}

/// Build a canonical chord string from a single key event.
///
/// Modifier-only chords (e.g. "Alt") are valid; a key with no modifier is
/// rejected so host-page typing is never shadowed.
pub fn chord_from_event(event: &KeyEvent) -> Option<String> {
    let held = event.held_modifiers();
    let key = normalized_key(event);

    match key {
        Some(key) => {
            if held.is_empty() {
                return None;
            }
            let mut parts: Vec<String> = held.iter().map(|m| m.to_string()).collect();
            parts.push(key);
            Some(parts.join("+"))
        }
        None => {
            if held.is_empty() {
                return None;
            }
            Some(
                held.iter()
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join("+"),
            )
        }
    }
}
