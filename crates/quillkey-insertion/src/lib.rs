//! Insertion-strategy cascade
//!
//! Many third-party editors intercept or ignore direct programmatic writes,
//! so text is written through an ordered list of strategies, each verified
//! before being accepted. The cascade is heuristic by necessity — the target
//! editors were not designed for this system — so strategies are plain
//! objects behind one trait and new ones can be appended without touching
//! the orchestrator.

pub mod cascade;
pub mod error;
pub mod strategy;

pub use cascade::{CascadeDelays, InsertionCascade};
pub use error::InsertionError;
pub use strategy::{
    EditCommandStrategy, InputEventStrategy, InsertionStrategy, SyntheticPasteStrategy,
};
