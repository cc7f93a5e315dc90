//! Editable surface abstraction
//!
//! The engine never touches a host editor directly; it works against the
//! [`EditableSurface`] contract. This crate provides:
//! - the closed [`SurfaceKind`] classification and its capability probe
//! - the surface contract (read, selection, focus, low-level event and
//!   command primitives used by the insertion strategies)
//! - the [`SurfaceLocator`] contract for resolving the deepest focused
//!   surface through nested shadow hosts
//! - an in-memory page/editor model implementing both, used by embedding
//!   hosts that bridge a real document and throughout the test suites

pub mod editor;
pub mod events;
pub mod field;
pub mod kind;
pub mod page;
pub mod probe;
pub mod surface;

pub use editor::{EditorBehavior, RichEditor};
pub use events::{DispatchOutcome, SurfaceEvent};
pub use field::TextField;
pub use kind::SurfaceKind;
pub use page::{Page, PageNode, SelectionRegion};
pub use probe::{probe, ElementInfo};
pub use surface::{EditableSurface, SharedSurface, SurfaceHandle, SurfaceLocator};
