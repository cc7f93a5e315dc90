//! Surface-level events used by the insertion strategies

/// Events dispatched at a surface by the insertion strategies.
///
/// These mirror the notifications host editors actually listen to: a
/// cancelable "about to insert", an uncancelable "changed", and a synthetic
/// paste carrying an in-memory payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Cancelable pre-insertion notification; a canceling listener is
    /// assumed to perform the insertion itself
    BeforeInput { data: String },
    /// Post-change notification, optionally carrying the inserted text
    Input { data: Option<String> },
    /// Synthetic paste with an in-memory payload; needs no clipboard grant
    Paste { payload: String },
}

/// Result of dispatching a [`SurfaceEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// True when a listener canceled the event's default behavior
    pub canceled: bool,
}

impl DispatchOutcome {
    pub fn passed() -> Self {
        DispatchOutcome { canceled: false }
    }

    pub fn canceled() -> Self {
        DispatchOutcome { canceled: true }
    }
}
