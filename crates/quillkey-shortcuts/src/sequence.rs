//! Multi-key sequence detection
//!
//! Recognizes sequences like "hold Alt, tap T, tap 1" scoped to one
//! continuous modifier hold. Each key-down emits the current candidate
//! chord so callers can attempt a registry lookup after every keystroke.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::event::{normalized_key, KeyEvent};
use crate::normalizer::MAX_KEYS;

/// Default inter-key timeout before collected state resets
pub const DEFAULT_SEQUENCE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Stateful recognizer for up-to-two-key sequences under a modifier hold
#[derive(Debug)]
pub struct SequenceDetector {
    sequence: Vec<String>,
    last_key_at: Option<Instant>,
    timeout: Duration,
}

impl Default for SequenceDetector {
    fn default() -> Self {
        SequenceDetector::new()
    }
}

impl SequenceDetector {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_SEQUENCE_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        SequenceDetector {
            sequence: Vec::new(),
            last_key_at: None,
            timeout,
        }
    }

    /// Process a key-down event and return the current candidate chord.
    ///
    /// Returns `None` when the event produces no lookup candidate: a bare
    /// key with state already full, or a modifier event arriving mid-sequence.
    pub fn process_key_down(&mut self, event: &KeyEvent) -> Option<String> {
        self.process_key_down_at(event, Instant::now())
    }

    /// Same as [`process_key_down`](Self::process_key_down) with an explicit
    /// clock, so timeout behavior is testable.
    pub fn process_key_down_at(&mut self, event: &KeyEvent, now: Instant) -> Option<String> {
        if let Some(last) = self.last_key_at {
            if now.duration_since(last) > self.timeout {
                trace!("sequence timeout exceeded, resetting");
                self.reset();
            }
        }
        self.last_key_at = Some(now);

        // Held modifiers are refreshed from every event, never accumulated
        let modifiers: Vec<String> = event
            .held_modifiers()
            .iter()
            .map(|m| m.to_string())
            .collect();

        let key = match normalized_key(event) {
            Some(key) => key,
            None => {
                // Modifier-only chord is a candidate only before any key landed
                if !modifiers.is_empty() && self.sequence.is_empty() {
                    return Some(modifiers.join("+"));
                }
                return None;
            }
        };

        // Auto-repeat of an already-collected key does not extend the sequence
        if !self.sequence.contains(&key) {
            if self.sequence.len() >= MAX_KEYS {
                return None;
            }
            self.sequence.push(key);
        }

        let mut sorted = self.sequence.clone();
        sorted.sort();

        let mut parts = modifiers;
        parts.extend(sorted);
        Some(parts.join("+"))
    }

    /// Process a key-up event; releasing the last modifier resets the state.
    pub fn process_key_up(&mut self, event: &KeyEvent) {
        if !event.ctrl && !event.alt && !event.shift && !event.meta {
            self.reset();
        }
    }

    /// Clear all collected state
    pub fn reset(&mut self) {
        self.sequence.clear();
        self.last_key_at = None;
    }

    pub fn sequence_len(&self) -> usize {
        self.sequence.len()
    }
}
