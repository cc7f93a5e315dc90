//! The verified cascade

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use quillkey_surface::{SurfaceHandle, SurfaceKind};

use crate::error::InsertionError;
use crate::strategy::{
    EditCommandStrategy, InputEventStrategy, InsertionStrategy, SyntheticPasteStrategy,
};

/// Fixed waits that let asynchronous editor-internal handlers run between
/// an attempt and its verification, and between fallback attempts.
#[derive(Debug, Clone, Copy)]
pub struct CascadeDelays {
    /// Before the first attempt, after focus/selection changes
    pub pre_insert: Duration,
    /// Between an attempt and its verification
    pub settle: Duration,
    /// Between fallback attempts
    pub between: Duration,
    /// Inside the blur/refocus resync cycle for rich regions
    pub refocus: Duration,
}

impl CascadeDelays {
    pub fn standard() -> Self {
        CascadeDelays {
            pre_insert: Duration::from_millis(50),
            settle: Duration::from_millis(100),
            between: Duration::from_millis(100),
            refocus: Duration::from_millis(50),
        }
    }

    /// Zero delays, for tests
    pub fn none() -> Self {
        CascadeDelays {
            pre_insert: Duration::ZERO,
            settle: Duration::ZERO,
            between: Duration::ZERO,
            refocus: Duration::ZERO,
        }
    }
}

/// Writes text into a surface via escalating strategies, each verified
/// before success is accepted.
pub struct InsertionCascade {
    strategies: Vec<Box<dyn InsertionStrategy>>,
    delays: CascadeDelays,
}

impl Default for InsertionCascade {
    fn default() -> Self {
        InsertionCascade::new(CascadeDelays::standard())
    }
}

impl InsertionCascade {
    /// The standard three-strategy cascade
    pub fn new(delays: CascadeDelays) -> Self {
        InsertionCascade {
            strategies: vec![
                Box::new(EditCommandStrategy),
                Box::new(SyntheticPasteStrategy),
                Box::new(InputEventStrategy),
            ],
            delays,
        }
    }

    /// A cascade with custom strategies, tried in order
    pub fn with_strategies(
        strategies: Vec<Box<dyn InsertionStrategy>>,
        delays: CascadeDelays,
    ) -> Self {
        InsertionCascade { strategies, delays }
    }

    /// Replace the current selection of the surface with `text`
    pub async fn replace_selection(
        &self,
        handle: &SurfaceHandle,
        text: &str,
    ) -> Result<(), InsertionError> {
        handle.surface.lock().focus();
        sleep(self.delays.pre_insert).await;
        self.insert(handle, text).await
    }

    /// Replace the entire content of the surface with `text`
    pub async fn replace_all(
        &self,
        handle: &SurfaceHandle,
        text: &str,
    ) -> Result<(), InsertionError> {
        {
            let mut surface = handle.surface.lock();
            surface.focus();
        }
        sleep(self.delays.pre_insert).await;
        handle.surface.lock().select_all();
        sleep(self.delays.pre_insert).await;
        self.insert(handle, text).await
    }

    /// Try each strategy in order until one is verified to have taken
    /// effect. Partial mutations from a failed attempt are not rolled back;
    /// the last attempted strategy's native behavior governs what remains.
    pub async fn insert(&self, handle: &SurfaceHandle, text: &str) -> Result<(), InsertionError> {
        // Snapshot once, before any attempt. Rich editors may normalize
        // content (collapse line breaks) so substring checks can produce
        // false negatives; a length change against this snapshot is still
        // proof that the replacement happened.
        let snapshot_len = handle.text().chars().count();

        for (index, strategy) in self.strategies.iter().enumerate() {
            if index > 0 {
                sleep(self.delays.between).await;
            }

            let claimed = {
                let mut surface = handle.surface.lock();
                strategy.attempt(&mut *surface, text)
            };
            if !claimed {
                debug!(strategy = strategy.name(), "insertion strategy rejected");
                continue;
            }

            sleep(self.delays.settle).await;
            if self.verify(handle, text, snapshot_len) {
                debug!(strategy = strategy.name(), "insertion verified");
                if handle.kind == SurfaceKind::RichText {
                    self.resync_rich_surface(handle).await;
                }
                return Ok(());
            }
            debug!(strategy = strategy.name(), "insertion failed verification");
        }

        warn!("all insertion strategies failed verification");
        Err(InsertionError::VerificationFailed)
    }

    fn verify(&self, handle: &SurfaceHandle, text: &str, snapshot_len: usize) -> bool {
        let current = handle.text();
        if current.contains(text) {
            return true;
        }
        current.chars().count() != snapshot_len
    }

    /// Some rich editors only resynchronize their internal state on a
    /// focus transition.
    async fn resync_rich_surface(&self, handle: &SurfaceHandle) {
        handle.surface.lock().blur();
        sleep(self.delays.refocus).await;
        handle.surface.lock().focus();
    }
}
