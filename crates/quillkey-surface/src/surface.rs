//! The editable surface contract

use std::sync::Arc;

use parking_lot::Mutex;

use crate::events::{DispatchOutcome, SurfaceEvent};
use crate::kind::SurfaceKind;

/// Uniform contract over any focusable region holding editable text.
///
/// Reading and selection are direct; writing goes through the low-level
/// primitives (`dispatch`, `exec_insert_text`) driven by the insertion
/// strategy cascade — implementations never get asked to "just set" text.
pub trait EditableSurface: Send {
    fn kind(&self) -> SurfaceKind;

    /// Full plain text of the surface
    fn text(&self) -> String;

    /// Current selection as char offsets (start, end); `None` when the
    /// surface has no selection concept active
    fn selection_range(&self) -> Option<(usize, usize)>;

    fn has_selection(&self) -> bool {
        matches!(self.selection_range(), Some((start, end)) if start != end)
    }

    /// Text inside the current selection
    fn selected_text(&self) -> String {
        match self.selection_range() {
            Some((start, end)) if start != end => {
                self.text().chars().skip(start).take(end - start).collect()
            }
            _ => String::new(),
        }
    }

    /// Select the full value (field) or subtree (rich region)
    fn select_all(&mut self);

    /// Collapse the selection to a caret at the end of the content
    fn collapse_selection_to_end(&mut self);

    fn focus(&mut self);
    fn blur(&mut self);

    /// Dispatch a surface event to the host editor's listeners
    fn dispatch(&mut self, event: SurfaceEvent) -> DispatchOutcome;

    /// Perform the platform's native text-insertion command, replacing the
    /// current selection. Returns false when the surface rejects it.
    fn exec_insert_text(&mut self, text: &str) -> bool;
}

/// Shared, lockable surface reference
pub type SharedSurface = Arc<Mutex<dyn EditableSurface + Send>>;

/// An opaque reference to a detected editable target plus its classification
#[derive(Clone)]
pub struct SurfaceHandle {
    pub kind: SurfaceKind,
    pub surface: SharedSurface,
}

impl SurfaceHandle {
    pub fn new(kind: SurfaceKind, surface: SharedSurface) -> Self {
        SurfaceHandle { kind, surface }
    }

    pub fn text(&self) -> String {
        self.surface.lock().text()
    }

    pub fn has_selection(&self) -> bool {
        self.surface.lock().has_selection()
    }

    pub fn selected_text(&self) -> String {
        self.surface.lock().selected_text()
    }

    pub fn select_all(&self) {
        self.surface.lock().select_all()
    }
}

/// Contract for locating the focused surface and the page selection.
///
/// Implementations must resolve the deepest actually-focused element,
/// descending through nested shadow-host boundaries.
pub trait SurfaceLocator: Send + Sync {
    /// The currently focused editable surface, if any
    fn focused_surface(&self) -> Option<SurfaceHandle>;

    /// The page-level (non-surface) text selection, if any
    fn page_selection(&self) -> Option<SurfaceHandle>;
}
