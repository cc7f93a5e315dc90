//! Capability probe
//!
//! Classifies a host element into the closed [`SurfaceKind`] set. Anything
//! that doesn't probe to a kind is not a valid surface.

use crate::kind::SurfaceKind;

/// Input types that carry editable text
const TEXT_INPUT_TYPES: [&str; 6] = ["text", "search", "url", "tel", "email", "password"];

/// Observable properties of a host element, as reported by the embedder
#[derive(Debug, Clone, Default)]
pub struct ElementInfo {
    /// Lower-case tag name (e.g. "input", "textarea", "div")
    pub tag: String,
    /// The `type` attribute for input elements
    pub input_type: Option<String>,
    /// Whether the element carries the is-editable content flag
    pub content_editable: bool,
    pub disabled: bool,
    pub read_only: bool,
}

impl ElementInfo {
    pub fn text_input() -> Self {
        ElementInfo {
            tag: "input".to_string(),
            input_type: Some("text".to_string()),
            ..Default::default()
        }
    }

    pub fn textarea() -> Self {
        ElementInfo {
            tag: "textarea".to_string(),
            ..Default::default()
        }
    }

    pub fn rich_region(tag: &str) -> Self {
        ElementInfo {
            tag: tag.to_string(),
            content_editable: true,
            ..Default::default()
        }
    }
}

/// Probe an element's capabilities and classify it.
///
/// Returns `None` for anything that is not an editable surface: disabled or
/// read-only fields, non-text input types, and plain elements without the
/// editable flag.
pub fn probe(info: &ElementInfo) -> Option<SurfaceKind> {
    match info.tag.as_str() {
        "input" => {
            if info.disabled || info.read_only {
                return None;
            }
            let input_type = info.input_type.as_deref().unwrap_or("text").to_lowercase();
            if TEXT_INPUT_TYPES.contains(&input_type.as_str()) {
                Some(SurfaceKind::SingleLine)
            } else {
                None
            }
        }
        "textarea" => {
            if info.disabled || info.read_only {
                None
            } else {
                Some(SurfaceKind::MultiLine)
            }
        }
        _ => {
            if info.content_editable {
                Some(SurfaceKind::RichText)
            } else {
                None
            }
        }
    }
}
