#![forbid(unsafe_code)]

//! Ancestor-path resolution.
//!
//! Pure containment queries over the element tree: the ordered chain of
//! elements from the document root down to a node, and the "is this element
//! inside that subtree" test built on it. The focus trap uses these to
//! decide whether a pointer event landed inside its container.

use crate::document::{Document, NodeId};

/// The ordered chain of elements from the document root down to (and
/// including) `node`.
pub fn ancestor_path(doc: &Document, node: NodeId) -> Vec<NodeId> {
    let mut path = vec![node];
    let mut current = node;
    while let Some(parent) = doc.node(current).parent() {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

/// Whether `ancestor` appears on the root-to-`node` chain.
///
/// True when `ancestor == node` (an element contains itself, matching the
/// DOM `Node.contains` convention).
pub fn path_contains(doc: &Document, node: NodeId, ancestor: NodeId) -> bool {
    let mut current = node;
    loop {
        if current == ancestor {
            return true;
        }
        match doc.node(current).parent() {
            Some(parent) => current = parent,
            None => return false,
        }
    }
}
