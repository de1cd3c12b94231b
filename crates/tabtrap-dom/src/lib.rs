#![forbid(unsafe_code)]

//! Headless document model for the tabtrap focus utilities.
//!
//! This crate owns everything below the accessibility layer: an element
//! arena ([`Document`]) with parent/child links, focus-relevant attributes
//! and captured layout rects, the input event vocabulary
//! ([`Event`](event::Event), [`KeyEvent`](event::KeyEvent),
//! [`PointerEvent`](event::PointerEvent)), a document-scoped listener
//! registry, bubbling cancelable [`Notification`](document::Notification)s,
//! and ancestor-path resolution ([`path`]).
//!
//! There is no rendering and no global state. A `Document` is an owned value
//! that callers pass explicitly; tests instantiate as many as they need.

pub mod document;
pub mod event;
pub mod geometry;
pub mod path;

pub use document::{Document, Element, ListenerId, ListenerKind, Node, NodeId, Notification, Tag};
pub use event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerButton, PointerEvent,
    PointerEventKind,
};
pub use geometry::Rect;
pub use path::{ancestor_path, path_contains};
