//! In-memory page model
//!
//! A host page is a flat list of elements, some of which host an isolated
//! sub-document with its own active element (shadow hosts). The locator
//! walks the active chain to the deepest focused element and classifies it
//! with the capability probe; the naive "active element" query would stop
//! at the host boundary.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::editor::RichEditor;
use crate::events::{DispatchOutcome, SurfaceEvent};
use crate::field::{splice_chars, TextField};
use crate::kind::SurfaceKind;
use crate::probe::{probe, ElementInfo};
use crate::surface::{EditableSurface, SharedSurface, SurfaceHandle, SurfaceLocator};

/// A page-level text selection outside any editable surface.
///
/// Behaves like a writable range: the native insert command replaces the
/// selected content directly, mirroring range splicing in a document.
#[derive(Debug, Clone)]
pub struct SelectionRegion {
    text: String,
    selection: (usize, usize),
}

impl SelectionRegion {
    /// A region whose full text is selected
    pub fn selected(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.chars().count();
        SelectionRegion {
            text,
            selection: (0, end),
        }
    }
}

impl EditableSurface for SelectionRegion {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::RichText
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn selection_range(&self) -> Option<(usize, usize)> {
        Some(self.selection)
    }

    fn select_all(&mut self) {
        self.selection = (0, self.text.chars().count());
    }

    fn collapse_selection_to_end(&mut self) {
        let end = self.text.chars().count();
        self.selection = (end, end);
    }

    fn focus(&mut self) {}
    fn blur(&mut self) {}

    fn dispatch(&mut self, _event: SurfaceEvent) -> DispatchOutcome {
        DispatchOutcome::passed()
    }

    fn exec_insert_text(&mut self, text: &str) -> bool {
        let (start, end) = self.selection;
        let (new_text, caret) = splice_chars(&self.text, start, end, text);
        self.text = new_text;
        self.selection = (caret, caret);
        true
    }
}

/// One element of the page
pub struct PageNode {
    info: ElementInfo,
    surface: Option<SharedSurface>,
    shadow: Option<Page>,
}

impl PageNode {
    /// A single-line text input
    pub fn text_input(field: TextField) -> (Self, Arc<Mutex<TextField>>) {
        let shared = Arc::new(Mutex::new(field));
        let node = PageNode {
            info: ElementInfo::text_input(),
            surface: Some(shared.clone() as SharedSurface),
            shadow: None,
        };
        (node, shared)
    }

    /// A multi-line textarea
    pub fn textarea(field: TextField) -> (Self, Arc<Mutex<TextField>>) {
        let shared = Arc::new(Mutex::new(field));
        let node = PageNode {
            info: ElementInfo::textarea(),
            surface: Some(shared.clone() as SharedSurface),
            shadow: None,
        };
        (node, shared)
    }

    /// A rich editable region
    pub fn rich_editor(editor: RichEditor) -> (Self, Arc<Mutex<RichEditor>>) {
        let shared = Arc::new(Mutex::new(editor));
        let node = PageNode {
            info: ElementInfo::rich_region("div"),
            surface: Some(shared.clone() as SharedSurface),
            shadow: None,
        };
        (node, shared)
    }

    /// A host element encapsulating its own sub-document
    pub fn shadow_host(inner: Page) -> Self {
        PageNode {
            info: ElementInfo {
                tag: "div".to_string(),
                ..Default::default()
            },
            surface: None,
            shadow: Some(inner),
        }
    }

    /// A non-editable element
    pub fn inert(tag: &str) -> Self {
        PageNode {
            info: ElementInfo {
                tag: tag.to_string(),
                ..Default::default()
            },
            surface: None,
            shadow: None,
        }
    }
}

/// An in-memory host page implementing [`SurfaceLocator`]
pub struct Page {
    nodes: Vec<PageNode>,
    active: Mutex<Option<usize>>,
    selection: Mutex<Option<SharedSurface>>,
}

impl Default for Page {
    fn default() -> Self {
        Page::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Page {
            nodes: Vec::new(),
            active: Mutex::new(None),
            selection: Mutex::new(None),
        }
    }

    /// Add a node, returning its index for later focusing
    pub fn add_node(&mut self, node: PageNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Focus the node at `index`; focusing a shadow host reaches whatever
    /// its inner document has active
    pub fn focus(&self, index: usize) {
        *self.active.lock() = Some(index);
        if let Some(node) = self.nodes.get(index) {
            if let Some(surface) = &node.surface {
                surface.lock().focus();
            }
        }
    }

    pub fn clear_focus(&self) {
        *self.active.lock() = None;
    }

    /// Install a page-level selection (outside any surface)
    pub fn set_page_selection(&self, region: SelectionRegion) -> SharedSurface {
        let shared: SharedSurface = Arc::new(Mutex::new(region));
        *self.selection.lock() = Some(shared.clone());
        shared
    }

    pub fn clear_page_selection(&self) {
        *self.selection.lock() = None;
    }

    /// Walk the active chain to the deepest focused node, descending into
    /// any host whose inner document has its own active element
    fn deepest_active(&self) -> Option<&PageNode> {
        let index = (*self.active.lock())?;
        let node = self.nodes.get(index)?;
        match &node.shadow {
            Some(inner) => inner.deepest_active(),
            None => Some(node),
        }
    }
}

impl SurfaceLocator for Page {
    fn focused_surface(&self) -> Option<SurfaceHandle> {
        let node = self.deepest_active()?;
        let kind = probe(&node.info)?;
        let surface = node.surface.clone()?;
        trace!(%kind, "focused surface resolved");
        Some(SurfaceHandle::new(kind, surface))
    }

    fn page_selection(&self) -> Option<SurfaceHandle> {
        let surface = self.selection.lock().clone()?;
        if !surface.lock().has_selection() {
            return None;
        }
        Some(SurfaceHandle::new(SurfaceKind::RichText, surface))
    }
}
