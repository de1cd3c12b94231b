#![forbid(unsafe_code)]

//! Pointer focus guard.
//!
//! Links and buttons that are clicked and then navigate away (or hand focus
//! elsewhere) should not be left wearing a focus ring. The guard suppresses
//! the default press-moves-focus behavior for pointer presses on those
//! elements; keyboard focus still reaches them through Tab navigation.

use tabtrap_dom::{Document, PointerEvent, PointerEventKind, Tag};

/// Whether the default press-focus behavior should be suppressed for this
/// pointer event.
///
/// True only for a [`PointerEventKind::Down`] whose target is an anchor or
/// button; every other element keeps the default.
pub fn should_suppress_press_focus(doc: &Document, event: &PointerEvent) -> bool {
    event.kind == PointerEventKind::Down
        && matches!(doc.node(event.target).tag(), Tag::Anchor | Tag::Button)
}

/// Apply a pointer press to the document with the guard consulted.
pub fn apply_guarded_press(doc: &mut Document, event: &PointerEvent) {
    let suppress = should_suppress_press_focus(doc, event);
    doc.apply_press_focus(event, suppress);
}
