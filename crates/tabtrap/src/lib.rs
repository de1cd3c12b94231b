#![forbid(unsafe_code)]

//! Public facade for the tabtrap workspace.
//!
//! Re-exports the document model ([`dom`]) and the accessibility layer
//! ([`a11y`]), plus a [`prelude`] with the handful of names most hosts
//! need.
//!
//! ```
//! use tabtrap::prelude::*;
//!
//! let mut doc = Document::new();
//! let open = doc.append(doc.root(), Element::new(Tag::Button).rendered(10));
//! let panel = doc.append(doc.root(), Element::new(Tag::Div).rendered(40));
//! doc.append(panel, Element::new(Tag::Input).rendered(20));
//!
//! let mut trap = FocusTrap::new();
//! trap.activate(&mut doc, panel, Some(open)).unwrap();
//! ```

pub use tabtrap_a11y as a11y;
pub use tabtrap_dom as dom;

/// The names most hosts need, in one import.
pub mod prelude {
    pub use tabtrap_a11y::{EXIT_FOCUS_TRAP, FocusTrap, TrapAction, TrapError, focusable_items};
    pub use tabtrap_dom::{
        Document, Element, Event, KeyCode, KeyEvent, Modifiers, NodeId, PointerEvent, Rect, Tag,
    };
}
