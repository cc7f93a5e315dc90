//! Built-in style identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error for unknown style names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown transformation style: {0}")]
pub struct UnknownStyle(pub String);

/// Identifier of a built-in character transformation style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleId {
    Bold,
    Italic,
    BoldItalic,
    Monospace,
    DoubleStruck,
    Fullwidth,
    Circled,
    SmallCaps,
    Leet,
    Rot13,
    Strikethrough,
    UpsideDown,
    Mirror,
}

impl StyleId {
    /// All built-in styles, in display order
    pub fn all() -> &'static [StyleId] {
        &[
            StyleId::Bold,
            StyleId::Italic,
            StyleId::BoldItalic,
            StyleId::Monospace,
            StyleId::DoubleStruck,
            StyleId::Fullwidth,
            StyleId::Circled,
            StyleId::SmallCaps,
            StyleId::Leet,
            StyleId::Rot13,
            StyleId::Strikethrough,
            StyleId::UpsideDown,
            StyleId::Mirror,
        ]
    }

    /// Human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            StyleId::Bold => "Bold",
            StyleId::Italic => "Italic",
            StyleId::BoldItalic => "Bold Italic",
            StyleId::Monospace => "Monospace",
            StyleId::DoubleStruck => "Double-Struck",
            StyleId::Fullwidth => "Fullwidth",
            StyleId::Circled => "Circled",
            StyleId::SmallCaps => "Small Caps",
            StyleId::Leet => "Leet Speak",
            StyleId::Rot13 => "ROT13",
            StyleId::Strikethrough => "Strikethrough",
            StyleId::UpsideDown => "Upside Down",
            StyleId::Mirror => "Mirror (Reversed)",
        }
    }

    /// Whether applying the style twice restores the original text
    pub fn is_self_inverse(&self) -> bool {
        matches!(self, StyleId::Rot13 | StyleId::Mirror)
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StyleId::Bold => "bold",
            StyleId::Italic => "italic",
            StyleId::BoldItalic => "bold-italic",
            StyleId::Monospace => "monospace",
            StyleId::DoubleStruck => "double-struck",
            StyleId::Fullwidth => "fullwidth",
            StyleId::Circled => "circled",
            StyleId::SmallCaps => "small-caps",
            StyleId::Leet => "leet",
            StyleId::Rot13 => "rot13",
            StyleId::Strikethrough => "strikethrough",
            StyleId::UpsideDown => "upside-down",
            StyleId::Mirror => "mirror",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for StyleId {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bold" => Ok(StyleId::Bold),
            "italic" => Ok(StyleId::Italic),
            "bold-italic" => Ok(StyleId::BoldItalic),
            "monospace" => Ok(StyleId::Monospace),
            "double-struck" => Ok(StyleId::DoubleStruck),
            "fullwidth" => Ok(StyleId::Fullwidth),
            "circled" => Ok(StyleId::Circled),
            "small-caps" | "smallcaps" => Ok(StyleId::SmallCaps),
            "leet" => Ok(StyleId::Leet),
            "rot13" => Ok(StyleId::Rot13),
            "strikethrough" => Ok(StyleId::Strikethrough),
            "upside-down" => Ok(StyleId::UpsideDown),
            "mirror" => Ok(StyleId::Mirror),
            _ => Err(UnknownStyle(s.to_string())),
        }
    }
}
