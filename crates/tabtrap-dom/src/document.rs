#![forbid(unsafe_code)]

//! Element arena, focus owner, listener registry, and notifications.
//!
//! A [`Document`] owns a tree of elements (arena-allocated, addressed by
//! [`NodeId`]), the single global keyboard-focus owner, a registry of
//! document-scoped input listeners, and a queue of bubbling
//! [`Notification`]s emitted by components for their ancestors to observe.
//!
//! # Invariants
//!
//! 1. `NodeId`s are only valid against the document that produced them.
//! 2. The tree is append-only: elements are never removed, so every stored
//!    id stays valid for the document's lifetime.
//! 3. At most one element holds keyboard focus (`focused()` is an `Option`).
//! 4. Listener registration is symmetric: every `add_listener` returns an id
//!    that exactly one `remove_listener` consumes.
//!
//! # Failure Modes
//!
//! - Accessing a node with an id minted by a different document panics on
//!   out-of-range ids and silently aliases on in-range ids. Keep one
//!   document per input loop.
//! - `remove_listener` with a stale id returns `false` (no panic).

use std::collections::VecDeque;

use ahash::AHashMap;

use crate::event::PointerEvent;
use crate::geometry::Rect;
use crate::path::ancestor_path;

/// Index of an element in a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw arena index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Element kind, reduced to the tags the focus utilities distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `<body>`, the implicit document root.
    Body,
    /// `<a>`.
    Anchor,
    /// `<area>` inside an image map.
    Area,
    /// `<button>`.
    Button,
    /// `<input>`.
    Input,
    /// `<select>`.
    Select,
    /// `<textarea>`.
    TextArea,
    /// `<div>` and other non-interactive containers.
    Div,
    /// `<span>` and other non-interactive inline elements.
    Span,
}

impl Tag {
    /// Whether this tag is a form control (`input`, `select`, `textarea`,
    /// `button`).
    pub const fn is_form_control(self) -> bool {
        matches!(self, Tag::Button | Tag::Input | Tag::Select | Tag::TextArea)
    }
}

/// Builder for a new element, consumed by [`Document::append`].
#[derive(Debug, Clone)]
pub struct Element {
    tag: Tag,
    rect: Rect,
    href: Option<String>,
    disabled: bool,
    hidden_input: bool,
    tab_index: Option<i32>,
}

impl Element {
    /// Start building an element of the given tag. The rect defaults to
    /// [`Rect::ZERO`] (not rendered) until layout assigns one.
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            rect: Rect::ZERO,
            href: None,
            disabled: false,
            hidden_input: false,
            tab_index: None,
        }
    }

    /// Set the captured layout rect.
    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    /// Give the element a rendered rect of the given width (height 1).
    /// Convenience for tests and hosts that only care about visibility.
    pub fn rendered(self, width: u16) -> Self {
        self.rect(Rect::new(0, 0, width, 1))
    }

    /// Set an `href` (anchors and areas).
    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Mark a form control as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Mark an input as `type="hidden"`.
    pub fn hidden_input(mut self) -> Self {
        self.hidden_input = true;
        self
    }

    /// Set an explicit `tabindex`.
    pub fn tab_index(mut self, index: i32) -> Self {
        self.tab_index = Some(index);
        self
    }
}

/// A materialized element in the arena.
#[derive(Debug, Clone)]
pub struct Node {
    tag: Tag,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    rect: Rect,
    href: Option<String>,
    disabled: bool,
    hidden_input: bool,
    tab_index: Option<i32>,
}

impl Node {
    /// Element tag.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Parent element, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Captured layout rect.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// `href` attribute, if any.
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Whether the element carries the `disabled` attribute.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the element is an `<input type="hidden">`.
    pub fn is_hidden_input(&self) -> bool {
        self.hidden_input
    }

    /// Explicit `tabindex`, if one was set.
    pub fn tab_index(&self) -> Option<i32> {
        self.tab_index
    }
}

/// What a document-scoped listener wants to observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Capture-phase pointer events (sees clicks before any target handler).
    PointerCapture,
    /// Key-down events.
    KeyDown,
}

/// Handle for a registered document-scoped listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

/// A named notification emitted from an element, observable along its
/// ancestor chain.
///
/// The headless analogue of `dispatchEvent(new CustomEvent(name,
/// {bubbles, cancelable}))`: hosts drain the document's queue and react to
/// notifications whose bubble `path` includes an element they own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Semantic name, e.g. `"exit-focus-trap"`.
    pub name: String,
    /// The element the notification was emitted from.
    pub target: NodeId,
    /// Root-first ancestor chain the notification bubbles along. A single
    /// element (the target) when `bubbles` is false.
    pub path: Vec<NodeId>,
    /// Whether ancestors of the target observe the notification.
    pub bubbles: bool,
    /// Whether an observer may veto the default reaction.
    pub cancelable: bool,
}

/// An element tree plus the input-routing state scoped to it.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    focused: Option<NodeId>,
    listeners: AHashMap<ListenerId, ListenerKind>,
    next_listener: u32,
    notifications: VecDeque<Notification>,
}

impl Document {
    /// Create a document holding only the `<body>` root.
    pub fn new() -> Self {
        let root = Node {
            tag: Tag::Body,
            parent: None,
            children: Vec::new(),
            rect: Rect::ZERO,
            href: None,
            disabled: false,
            hidden_input: false,
            tab_index: None,
        };
        Self {
            nodes: vec![root],
            root: NodeId::from_raw(0),
            focused: None,
            listeners: AHashMap::new(),
            next_listener: 0,
            notifications: VecDeque::new(),
        }
    }

    /// The `<body>` root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a new element as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(Node {
            tag: element.tag,
            parent: Some(parent),
            children: Vec::new(),
            rect: element.rect,
            href: element.href,
            disabled: element.disabled,
            hidden_input: element.hidden_input,
            tab_index: element.tab_index,
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Borrow an element.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Re-assign an element's layout rect (layout pass updating geometry).
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        self.nodes[id.index()].rect = rect;
    }

    /// All descendants of `container` in document order (pre-order,
    /// excluding `container` itself).
    pub fn descendants(&self, container: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[container.index()]
            .children
            .iter()
            .rev()
            .copied()
            .collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.index()].children.iter().rev().copied());
        }
        out
    }

    /// The current keyboard-focus owner.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move keyboard focus to `id`.
    pub fn focus(&mut self, id: NodeId) {
        #[cfg(feature = "tracing")]
        tracing::trace!(node = id.raw(), "focus moved");
        self.focused = Some(id);
    }

    /// Drop keyboard focus entirely.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Route a pointer press through the document's default focus behavior:
    /// pressing an element gives it keyboard focus unless the caller
    /// suppresses it (see the pointer focus guard in the a11y layer).
    pub fn apply_press_focus(&mut self, event: &PointerEvent, suppress: bool) {
        if !suppress {
            self.focus(event.target);
        }
    }

    // -----------------------------------------------------------------------
    // Document-scoped listeners
    // -----------------------------------------------------------------------

    /// Register a document-scoped listener and return its handle.
    pub fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, kind);
        id
    }

    /// Remove a previously registered listener. Returns `false` for stale
    /// or foreign ids.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Whether any listener of the given kind is registered.
    pub fn has_listener(&self, kind: ListenerKind) -> bool {
        self.listeners.values().any(|&k| k == kind)
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    /// Emit a named notification from `target`.
    ///
    /// The bubble path is computed eagerly (root-first, ending at `target`)
    /// so observers can test ancestor containment without re-walking the
    /// tree.
    pub fn emit(
        &mut self,
        name: impl Into<String>,
        target: NodeId,
        bubbles: bool,
        cancelable: bool,
    ) {
        let name = name.into();
        #[cfg(feature = "tracing")]
        tracing::debug!(%name, target = target.raw(), "notification emitted");
        let path = if bubbles {
            ancestor_path(self, target)
        } else {
            vec![target]
        };
        self.notifications.push_back(Notification {
            name,
            target,
            path,
            bubbles,
            cancelable,
        });
    }

    /// Drain all pending notifications in emission order.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
