//! Rich editable region
//!
//! Models the observable behaviors of content-editable editors in the wild.
//! Which write paths actually take effect is configurable, because third
//! party editors differ in exactly this way: some honor the native insert
//! command, some cancel the pre-insertion event and handle it themselves,
//! some only react to paste events, and some resynchronize purely off input
//! notifications.

use crate::events::{DispatchOutcome, SurfaceEvent};
use crate::field::splice_chars;
use crate::kind::SurfaceKind;
use crate::surface::EditableSurface;

/// Which write paths a rich editor honors
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorBehavior {
    /// Cancels the pre-insertion event and performs the insertion itself
    pub cancels_before_input: bool,
    /// Honors the native insert-text command
    pub supports_edit_command: bool,
    /// A paste listener consumes the payload into the content
    pub consumes_paste: bool,
    /// Resynchronizes content from input notifications carrying data
    pub applies_input_events: bool,
    /// Collapses consecutive line breaks on every write (some editors
    /// rebuild paragraphs), which defeats substring verification
    pub normalizes_line_breaks: bool,
}

impl EditorBehavior {
    /// A straightforward editor where the native command works
    pub fn native() -> Self {
        EditorBehavior {
            supports_edit_command: true,
            ..Default::default()
        }
    }

    /// A framework editor that cancels the pre-insertion event and applies
    /// the insertion through its own model
    pub fn framework() -> Self {
        EditorBehavior {
            cancels_before_input: true,
            ..Default::default()
        }
    }

    /// An editor that ignores commands but listens for paste
    pub fn paste_listener() -> Self {
        EditorBehavior {
            consumes_paste: true,
            ..Default::default()
        }
    }

    /// An editor that only syncs off input notifications
    pub fn input_synced() -> Self {
        EditorBehavior {
            applies_input_events: true,
            ..Default::default()
        }
    }

    /// An editor that silently rejects every programmatic write path
    pub fn inert() -> Self {
        EditorBehavior::default()
    }
}

/// A content-editable region with configurable write behavior
#[derive(Debug, Clone)]
pub struct RichEditor {
    text: String,
    selection: Option<(usize, usize)>,
    focused: bool,
    behavior: EditorBehavior,
    focus_transitions: usize,
}

impl RichEditor {
    pub fn new(text: impl Into<String>, behavior: EditorBehavior) -> Self {
        RichEditor {
            text: text.into(),
            selection: None,
            focused: false,
            behavior,
            focus_transitions: 0,
        }
    }

    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.text.chars().count();
        self.selection = Some((start.min(len), end.min(len)));
    }

    /// Number of focus/blur transitions observed; rich editors that need a
    /// blur/focus cycle to resync make this observable in tests
    pub fn focus_transitions(&self) -> usize {
        self.focus_transitions
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn write(&mut self, insert: &str) {
        let (start, end) = match self.selection {
            Some((start, end)) if start != end => (start, end),
            // No active selection: the write lands at the caret (content end)
            _ => {
                let len = self.text.chars().count();
                (len, len)
            }
        };

        let (mut text, caret) = splice_chars(&self.text, start, end, insert);
        if self.behavior.normalizes_line_breaks {
            while text.contains("\n\n") {
                text = text.replace("\n\n", "\n");
            }
        }
        self.text = text;
        let caret = caret.min(self.text.chars().count());
        self.selection = Some((caret, caret));
    }
}

impl EditableSurface for RichEditor {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::RichText
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn selection_range(&self) -> Option<(usize, usize)> {
        self.selection
    }

    fn select_all(&mut self) {
        self.selection = Some((0, self.text.chars().count()));
    }

    fn collapse_selection_to_end(&mut self) {
        let end = self.text.chars().count();
        self.selection = Some((end, end));
    }

    fn focus(&mut self) {
        if !self.focused {
            self.focus_transitions += 1;
        }
        self.focused = true;
    }

    fn blur(&mut self) {
        if self.focused {
            self.focus_transitions += 1;
        }
        self.focused = false;
    }

    fn dispatch(&mut self, event: SurfaceEvent) -> DispatchOutcome {
        match event {
            SurfaceEvent::BeforeInput { data } => {
                if self.behavior.cancels_before_input {
                    self.write(&data);
                    DispatchOutcome::canceled()
                } else {
                    DispatchOutcome::passed()
                }
            }
            SurfaceEvent::Paste { payload } => {
                if self.behavior.consumes_paste {
                    self.write(&payload);
                }
                DispatchOutcome::passed()
            }
            SurfaceEvent::Input { data } => {
                if self.behavior.applies_input_events {
                    if let Some(data) = data {
                        self.write(&data);
                    }
                }
                DispatchOutcome::passed()
            }
        }
    }

    fn exec_insert_text(&mut self, text: &str) -> bool {
        if !self.behavior.supports_edit_command {
            return false;
        }
        self.write(text);
        true
    }
}
