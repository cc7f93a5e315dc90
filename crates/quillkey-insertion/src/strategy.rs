//! The three insertion strategies

use quillkey_surface::{EditableSurface, SurfaceEvent, SurfaceKind};

/// One technique for writing text into a surface.
///
/// `attempt` returns whether the strategy believes it took effect; the
/// cascade verifies that claim against the surface content afterwards.
pub trait InsertionStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn attempt(&self, surface: &mut dyn EditableSurface, text: &str) -> bool;
}

/// Strategy 1: the native insert command.
///
/// A cancelable pre-insertion event goes out first; if a listener cancels
/// it the host editor handled the insertion itself and the attempt counts
/// as done. Otherwise the native command performs the write, followed by a
/// change notification, and for rich regions the caret is re-positioned at
/// the end of the inserted text.
pub struct EditCommandStrategy;

impl InsertionStrategy for EditCommandStrategy {
    fn name(&self) -> &'static str {
        "edit_command"
    }

    fn attempt(&self, surface: &mut dyn EditableSurface, text: &str) -> bool {
        let outcome = surface.dispatch(SurfaceEvent::BeforeInput {
            data: text.to_string(),
        });
        if outcome.canceled {
            return true;
        }

        let inserted = surface.exec_insert_text(text);
        if inserted {
            surface.dispatch(SurfaceEvent::Input { data: None });
            if surface.kind() == SurfaceKind::RichText {
                surface.collapse_selection_to_end();
            }
        }
        inserted
    }
}

/// Strategy 2: a synthetic paste event with an in-memory payload.
///
/// Catches editors that intercept paste; needs no clipboard permission.
pub struct SyntheticPasteStrategy;

impl InsertionStrategy for SyntheticPasteStrategy {
    fn name(&self) -> &'static str {
        "synthetic_paste"
    }

    fn attempt(&self, surface: &mut dyn EditableSurface, text: &str) -> bool {
        surface.dispatch(SurfaceEvent::Paste {
            payload: text.to_string(),
        });
        true
    }
}

/// Strategy 3: input events only, for frameworks that synchronize purely
/// off input notifications.
pub struct InputEventStrategy;

impl InsertionStrategy for InputEventStrategy {
    fn name(&self) -> &'static str {
        "input_events"
    }

    fn attempt(&self, surface: &mut dyn EditableSurface, text: &str) -> bool {
        let outcome = surface.dispatch(SurfaceEvent::BeforeInput {
            data: text.to_string(),
        });
        if outcome.canceled {
            return true;
        }

        surface.dispatch(SurfaceEvent::Input {
            data: Some(text.to_string()),
        });
        true
    }
}
