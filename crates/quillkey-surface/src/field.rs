//! Form-field surface
//!
//! Models the value/selection-range behavior of a plain text input or
//! textarea: the native insert command always works, and synthetic events
//! pass through without effect because nothing listens for them.

use crate::events::{DispatchOutcome, SurfaceEvent};
use crate::kind::SurfaceKind;
use crate::surface::EditableSurface;

/// Splice `insert` over the char range `[start, end)`, returning the new
/// string and the caret position after the inserted text.
pub(crate) fn splice_chars(text: &str, start: usize, end: usize, insert: &str) -> (String, usize) {
    let chars: Vec<char> = text.chars().collect();
    let start = start.min(chars.len());
    let end = end.clamp(start, chars.len());

    let mut result: String = chars[..start].iter().collect();
    result.push_str(insert);
    result.extend(&chars[end..]);

    (result, start + insert.chars().count())
}

/// A single- or multi-line form field
#[derive(Debug, Clone)]
pub struct TextField {
    kind: SurfaceKind,
    value: String,
    selection: (usize, usize),
    focused: bool,
}

impl TextField {
    pub fn single_line(value: impl Into<String>) -> Self {
        Self::with_kind(SurfaceKind::SingleLine, value)
    }

    pub fn multi_line(value: impl Into<String>) -> Self {
        Self::with_kind(SurfaceKind::MultiLine, value)
    }

    fn with_kind(kind: SurfaceKind, value: impl Into<String>) -> Self {
        let value = value.into();
        let end = value.chars().count();
        TextField {
            kind,
            value,
            // Caret starts collapsed at the end, like a freshly focused field
            selection: (end, end),
            focused: false,
        }
    }

    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.value.chars().count();
        self.selection = (start.min(len), end.min(len));
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

impl EditableSurface for TextField {
    fn kind(&self) -> SurfaceKind {
        self.kind
    }

    fn text(&self) -> String {
        self.value.clone()
    }

    fn selection_range(&self) -> Option<(usize, usize)> {
        Some(self.selection)
    }

    fn select_all(&mut self) {
        self.selection = (0, self.value.chars().count());
    }

    fn collapse_selection_to_end(&mut self) {
        let end = self.value.chars().count();
        self.selection = (end, end);
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn dispatch(&mut self, _event: SurfaceEvent) -> DispatchOutcome {
        // Plain fields have no listeners; events fall through untouched
        DispatchOutcome::passed()
    }

    fn exec_insert_text(&mut self, text: &str) -> bool {
        let (start, end) = self.selection;
        let (value, caret) = splice_chars(&self.value, start, end, text);
        self.value = value;
        self.selection = (caret, caret);
        true
    }
}
