#![forbid(unsafe_code)]

//! The focusable query: which descendants of a container are keyboard
//! focusable and currently rendered.
//!
//! Candidate criteria match the standard interactive-element selector:
//!
//! - anchors and areas carrying an `href`
//! - enabled form controls (`input` excluding `type="hidden"`, `select`,
//!   `textarea`, `button`)
//! - any element with an explicit `tabindex` of zero
//!
//! Candidates are then filtered to elements with non-zero rendered width.
//! Width is a cheap visibility proxy: it excludes `display:none` and
//! zero-size subtrees without a full style computation, while elements
//! merely scrolled out of the viewport keep their size and stay in.

use tabtrap_dom::{Document, NodeId, Tag};

/// Focusable, rendered descendants of `container`, in document order.
pub fn focusable_items(doc: &Document, container: NodeId) -> Vec<NodeId> {
    doc.descendants(container)
        .into_iter()
        .filter(|&id| {
            let node = doc.node(id);
            is_candidate(doc, id) && node.rect().has_rendered_width()
        })
        .collect()
}

fn is_candidate(doc: &Document, id: NodeId) -> bool {
    let node = doc.node(id);
    // The criteria form a union: an explicit zero tabindex qualifies any
    // element, whatever its tag-specific criterion would say.
    if node.tab_index() == Some(0) {
        return true;
    }
    match node.tag() {
        Tag::Anchor | Tag::Area => node.href().is_some(),
        Tag::Input => !node.is_disabled() && !node.is_hidden_input(),
        Tag::Select | Tag::TextArea | Tag::Button => !node.is_disabled(),
        _ => false,
    }
}
