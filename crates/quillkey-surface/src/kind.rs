//! Surface classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of editable surface kinds.
///
/// Consumers match exhaustively on this tag instead of duck-typing the
/// underlying element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    /// Single-line form field with a value and selection-range API
    SingleLine,
    /// Multi-line form field with a value and selection-range API
    MultiLine,
    /// Rich editable region (content-editable flag)
    RichText,
}

impl SurfaceKind {
    /// Form-field-like surfaces expose value/selection-range properties
    pub fn is_form_field(&self) -> bool {
        matches!(self, SurfaceKind::SingleLine | SurfaceKind::MultiLine)
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceKind::SingleLine => write!(f, "single_line"),
            SurfaceKind::MultiLine => write!(f, "multi_line"),
            SurfaceKind::RichText => write!(f, "rich_text"),
        }
    }
}
