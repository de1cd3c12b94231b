#![forbid(unsafe_code)]

//! The focus trap: modal keyboard containment with focus restoration.
//!
//! A [`FocusTrap`] confines keyboard navigation to the subtree of a
//! container element while a modal-like surface (dialog, offcanvas panel)
//! is open. While active it is the sole focus authority: Tab and Shift+Tab
//! cycle through the container's focusable descendants with wraparound at
//! both ends, Escape releases the trap, and a pointer click outside the
//! container releases it too. On release, focus returns to the element that
//! opened the trap and an [`EXIT_FOCUS_TRAP`] notification bubbles from the
//! container so the owning surface can finish closing.
//!
//! The trap is an explicit service object, not a global: hosts construct
//! one per input loop and route events through [`FocusTrap::handle_event`].
//! Everything the handlers need lives on the instance.
//!
//! # Invariants
//!
//! 1. At most one activation is live per trap; a second `activate` fails
//!    with [`TrapError::AlreadyActive`] without touching the live state.
//! 2. `items` is captured once at activation (document order, rendered
//!    width > 0) and never re-queried while active. Content inserted into
//!    the container afterwards is not cycled to.
//! 3. Listener registration is symmetric: `activate` installs exactly two
//!    document-scoped listeners (capture-phase pointer + keydown) and
//!    release removes exactly those two.
//! 4. While active, Tab never moves focus outside `items`: the trap
//!    computes the next target itself and the host must treat a returned
//!    [`TrapAction::FocusMoved`] as having consumed the key (default
//!    traversal suppressed).
//!
//! # Failure Modes
//!
//! - `activate` on a container with no focusable, rendered descendants
//!   fails fast with [`TrapError::NoFocusableItems`]; there is no trap with
//!   an undefined initial focus target.
//! - `deactivate` while inactive is caller misuse and fails with
//!   [`TrapError::NotActive`] rather than silently succeeding.
//! - If focus sits on an element that is not one of the captured `items`
//!   (focus moved programmatically, or onto content inserted after
//!   activation), the cycle index falls back to 0 and wrap arithmetic
//!   proceeds from there.
//!
//! # Example
//!
//! ```
//! use tabtrap_a11y::{FocusTrap, TrapAction};
//! use tabtrap_dom::{Document, Element, Event, KeyCode, KeyEvent, Tag};
//!
//! let mut doc = Document::new();
//! let open = doc.append(doc.root(), Element::new(Tag::Button).rendered(10));
//! let panel = doc.append(doc.root(), Element::new(Tag::Div).rendered(60));
//! let input = doc.append(panel, Element::new(Tag::Input).rendered(20));
//! let close = doc.append(panel, Element::new(Tag::Button).rendered(10));
//!
//! let mut trap = FocusTrap::new();
//! trap.activate(&mut doc, panel, Some(open)).unwrap();
//! assert_eq!(doc.focused(), Some(input));
//!
//! let tab = Event::Key(KeyEvent::press(KeyCode::Tab));
//! assert_eq!(trap.handle_event(&mut doc, &tab), Some(TrapAction::FocusMoved(close)));
//!
//! let escape = Event::Key(KeyEvent::press(KeyCode::Escape));
//! assert_eq!(trap.handle_event(&mut doc, &escape), Some(TrapAction::Released));
//! assert_eq!(doc.focused(), Some(open));
//! ```

use thiserror::Error;

use tabtrap_dom::{
    Document, Event, KeyCode, ListenerId, ListenerKind, Modifiers, NodeId, PointerEventKind,
    path_contains,
};

use crate::focusable::focusable_items;

/// Name of the notification emitted from the container on release.
pub const EXIT_FOCUS_TRAP: &str = "exit-focus-trap";

/// Why an activation or deactivation was refused.
///
/// All variants are caller errors; none is transient and none should be
/// retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrapError {
    /// `activate` while a trap is already live (nested traps are rejected).
    #[error("focus trap is already active")]
    AlreadyActive,
    /// `deactivate` while no trap is live.
    #[error("cannot deactivate an inactive focus trap")]
    NotActive,
    /// The container has nothing to confine focus to.
    #[error("container has no focusable, rendered descendants")]
    NoFocusableItems,
}

/// What the trap did in response to a routed event.
///
/// `None` from [`FocusTrap::handle_event`] means the event was not for the
/// trap and default handling should proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapAction {
    /// A Tab cycle moved focus to this element; the key is consumed.
    FocusMoved(NodeId),
    /// The trap released (Escape or outside click).
    Released,
}

#[derive(Debug)]
struct ActiveTrap {
    container: NodeId,
    trigger: Option<NodeId>,
    items: Vec<NodeId>,
    pointer_listener: ListenerId,
    key_listener: ListenerId,
}

/// Focus containment service. See the module docs for the protocol.
#[derive(Debug, Default)]
pub struct FocusTrap {
    active: Option<ActiveTrap>,
}

impl FocusTrap {
    /// Create an inactive trap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an activation is live.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The live container, if active.
    pub fn container(&self) -> Option<NodeId> {
        self.active.as_ref().map(|state| state.container)
    }

    /// The element focus returns to on release, if one was supplied.
    pub fn trigger(&self) -> Option<NodeId> {
        self.active.as_ref().and_then(|state| state.trigger)
    }

    /// The captured focus cycle. Empty while inactive.
    pub fn items(&self) -> &[NodeId] {
        self.active
            .as_ref()
            .map(|state| state.items.as_slice())
            .unwrap_or(&[])
    }

    /// Confine focus to `container`, remembering `trigger` as the element
    /// to restore focus to on release.
    ///
    /// Captures the focusable cycle, moves focus to its first element, and
    /// installs the two document-scoped listeners. Fails without side
    /// effects if a trap is already live or the container has no focusable
    /// rendered descendants.
    pub fn activate(
        &mut self,
        doc: &mut Document,
        container: NodeId,
        trigger: Option<NodeId>,
    ) -> Result<(), TrapError> {
        if self.active.is_some() {
            return Err(TrapError::AlreadyActive);
        }
        let items = focusable_items(doc, container);
        let Some(&first) = items.first() else {
            return Err(TrapError::NoFocusableItems);
        };

        doc.focus(first);
        let pointer_listener = doc.add_listener(ListenerKind::PointerCapture);
        let key_listener = doc.add_listener(ListenerKind::KeyDown);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            container = container.raw(),
            items = items.len(),
            "focus trap activated"
        );

        self.active = Some(ActiveTrap {
            container,
            trigger,
            items,
            pointer_listener,
            key_listener,
        });
        Ok(())
    }

    /// Release the trap: restore focus to the trigger, emit
    /// [`EXIT_FOCUS_TRAP`] from the container, clear all captured state,
    /// and remove both listeners.
    pub fn deactivate(&mut self, doc: &mut Document) -> Result<(), TrapError> {
        let state = self.active.take().ok_or(TrapError::NotActive)?;
        Self::release(doc, state);
        Ok(())
    }

    /// Route a document input event through the trap.
    ///
    /// Inactive traps ignore everything. Active traps consume Tab
    /// (cycling), Escape (release), and pointer clicks outside the
    /// container (release); everything else passes through untouched.
    pub fn handle_event(&mut self, doc: &mut Document, event: &Event) -> Option<TrapAction> {
        self.active.as_ref()?;
        match event {
            Event::Pointer(pointer) => self.on_pointer(doc, pointer.kind, pointer.target),
            Event::Key(key) if key.is_press() => self.on_key(doc, key.code, key.modifiers),
            Event::Key(_) => None,
        }
    }

    /// Capture-phase pointer handling: a click whose ancestor path does not
    /// include the container releases the trap. Blur events are not used
    /// for this on purpose — not every focusable element reliably emits
    /// them on all platforms.
    fn on_pointer(
        &mut self,
        doc: &mut Document,
        kind: PointerEventKind,
        target: NodeId,
    ) -> Option<TrapAction> {
        if kind != PointerEventKind::Click {
            return None;
        }
        let container = self.active.as_ref()?.container;
        if path_contains(doc, target, container) {
            return None;
        }
        if let Some(state) = self.active.take() {
            Self::release(doc, state);
        }
        Some(TrapAction::Released)
    }

    fn on_key(
        &mut self,
        doc: &mut Document,
        code: KeyCode,
        modifiers: Modifiers,
    ) -> Option<TrapAction> {
        match code {
            KeyCode::Tab => {
                let state = self.active.as_ref()?;
                let next = cycle_target(
                    &state.items,
                    doc.focused(),
                    modifiers.contains(Modifiers::SHIFT),
                );
                doc.focus(next);
                Some(TrapAction::FocusMoved(next))
            }
            KeyCode::Escape => {
                if let Some(state) = self.active.take() {
                    Self::release(doc, state);
                }
                Some(TrapAction::Released)
            }
            _ => None,
        }
    }

    fn release(doc: &mut Document, state: ActiveTrap) {
        if let Some(trigger) = state.trigger {
            doc.focus(trigger);
        }
        doc.emit(EXIT_FOCUS_TRAP, state.container, true, true);
        doc.remove_listener(state.pointer_listener);
        doc.remove_listener(state.key_listener);

        #[cfg(feature = "tracing")]
        tracing::debug!(container = state.container.raw(), "focus trap released");
    }
}

/// Next element in the cycle. An unknown (or absent) focus owner counts as
/// index 0 before the step is applied.
fn cycle_target(items: &[NodeId], focused: Option<NodeId>, backward: bool) -> NodeId {
    let current = focused
        .and_then(|id| items.iter().position(|&item| item == id))
        .unwrap_or(0);
    let next = if backward {
        if current == 0 {
            items.len() - 1
        } else {
            current - 1
        }
    } else {
        (current + 1) % items.len()
    };
    items[next]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabtrap_dom::{Element, KeyEvent, KeyEventKind, PointerEvent, Tag};

    struct Fixture {
        doc: Document,
        trigger: NodeId,
        container: NodeId,
        items: [NodeId; 3],
        outside: NodeId,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new();
        let trigger = doc.append(doc.root(), Element::new(Tag::Button).rendered(14));
        let outside = doc.append(doc.root(), Element::new(Tag::Div).rendered(80));
        let container = doc.append(doc.root(), Element::new(Tag::Div).rendered(60));
        let link = doc.append(container, Element::new(Tag::Anchor).href("#a").rendered(10));
        let input = doc.append(container, Element::new(Tag::Input).rendered(20));
        let button = doc.append(container, Element::new(Tag::Button).rendered(10));
        Fixture {
            doc,
            trigger,
            container,
            items: [link, input, button],
            outside,
        }
    }

    fn tab() -> Event {
        Event::Key(KeyEvent::press(KeyCode::Tab))
    }

    fn shift_tab() -> Event {
        Event::Key(KeyEvent::press(KeyCode::Tab).with_modifiers(Modifiers::SHIFT))
    }

    fn escape() -> Event {
        Event::Key(KeyEvent::press(KeyCode::Escape))
    }

    #[test]
    fn activate_focuses_first_item_and_installs_listeners() {
        let mut f = fixture();
        let mut trap = FocusTrap::new();
        trap.activate(&mut f.doc, f.container, Some(f.trigger)).unwrap();

        assert!(trap.is_active());
        assert_eq!(f.doc.focused(), Some(f.items[0]));
        assert_eq!(trap.items(), &f.items);
        assert_eq!(f.doc.listener_count(), 2);
        assert!(f.doc.has_listener(ListenerKind::PointerCapture));
        assert!(f.doc.has_listener(ListenerKind::KeyDown));
    }

    #[test]
    fn second_activation_is_rejected_without_clobbering_state() {
        let mut f = fixture();
        let mut trap = FocusTrap::new();
        trap.activate(&mut f.doc, f.container, Some(f.trigger)).unwrap();

        let err = trap.activate(&mut f.doc, f.outside, None);
        assert_eq!(err, Err(TrapError::AlreadyActive));
        assert_eq!(trap.container(), Some(f.container));
        assert_eq!(trap.trigger(), Some(f.trigger));
        assert_eq!(f.doc.focused(), Some(f.items[0]));
        assert_eq!(f.doc.listener_count(), 2);
    }

    #[test]
    fn empty_container_fails_fast_without_side_effects() {
        let mut f = fixture();
        let empty = f.doc.append(f.doc.root(), Element::new(Tag::Div).rendered(40));
        let mut trap = FocusTrap::new();

        assert_eq!(
            trap.activate(&mut f.doc, empty, None),
            Err(TrapError::NoFocusableItems)
        );
        assert!(!trap.is_active());
        assert_eq!(f.doc.focused(), None);
        assert_eq!(f.doc.listener_count(), 0);
    }

    #[test]
    fn tab_cycles_forward_with_wrap() {
        let mut f = fixture();
        let mut trap = FocusTrap::new();
        trap.activate(&mut f.doc, f.container, None).unwrap();

        assert_eq!(
            trap.handle_event(&mut f.doc, &tab()),
            Some(TrapAction::FocusMoved(f.items[1]))
        );
        assert_eq!(
            trap.handle_event(&mut f.doc, &tab()),
            Some(TrapAction::FocusMoved(f.items[2]))
        );
        // Last wraps to first.
        assert_eq!(
            trap.handle_event(&mut f.doc, &tab()),
            Some(TrapAction::FocusMoved(f.items[0]))
        );
    }

    #[test]
    fn shift_tab_from_first_wraps_to_last() {
        let mut f = fixture();
        let mut trap = FocusTrap::new();
        trap.activate(&mut f.doc, f.container, None).unwrap();

        assert_eq!(
            trap.handle_event(&mut f.doc, &shift_tab()),
            Some(TrapAction::FocusMoved(f.items[2]))
        );
        assert_eq!(
            trap.handle_event(&mut f.doc, &shift_tab()),
            Some(TrapAction::FocusMoved(f.items[1]))
        );
    }

    #[test]
    fn unknown_focus_owner_counts_as_index_zero() {
        let mut f = fixture();
        let mut trap = FocusTrap::new();
        trap.activate(&mut f.doc, f.container, None).unwrap();

        // Focus an element that was never captured in the cycle.
        f.doc.focus(f.outside);
        assert_eq!(
            trap.handle_event(&mut f.doc, &tab()),
            Some(TrapAction::FocusMoved(f.items[1]))
        );

        f.doc.blur();
        assert_eq!(
            trap.handle_event(&mut f.doc, &shift_tab()),
            Some(TrapAction::FocusMoved(f.items[2]))
        );
    }

    #[test]
    fn escape_releases_and_restores_trigger_focus() {
        let mut f = fixture();
        let mut trap = FocusTrap::new();
        trap.activate(&mut f.doc, f.container, Some(f.trigger)).unwrap();
        trap.handle_event(&mut f.doc, &tab());

        assert_eq!(
            trap.handle_event(&mut f.doc, &escape()),
            Some(TrapAction::Released)
        );
        assert!(!trap.is_active());
        assert_eq!(f.doc.focused(), Some(f.trigger));
        assert_eq!(f.doc.listener_count(), 0);
    }

    #[test]
    fn release_without_trigger_leaves_focus_alone() {
        let mut f = fixture();
        let mut trap = FocusTrap::new();
        trap.activate(&mut f.doc, f.container, None).unwrap();

        trap.handle_event(&mut f.doc, &escape());
        assert_eq!(f.doc.focused(), Some(f.items[0]));
    }

    #[test]
    fn inside_click_keeps_trap_active() {
        let mut f = fixture();
        let mut trap = FocusTrap::new();
        trap.activate(&mut f.doc, f.container, Some(f.trigger)).unwrap();

        let click = Event::Pointer(PointerEvent::click(f.items[1]));
        assert_eq!(trap.handle_event(&mut f.doc, &click), None);
        assert!(trap.is_active());

        // Clicking the container itself is also inside.
        let click = Event::Pointer(PointerEvent::click(f.container));
        assert_eq!(trap.handle_event(&mut f.doc, &click), None);
        assert!(trap.is_active());
    }

    #[test]
    fn outside_click_releases() {
        let mut f = fixture();
        let mut trap = FocusTrap::new();
        trap.activate(&mut f.doc, f.container, Some(f.trigger)).unwrap();

        let click = Event::Pointer(PointerEvent::click(f.outside));
        assert_eq!(
            trap.handle_event(&mut f.doc, &click),
            Some(TrapAction::Released)
        );
        assert!(!trap.is_active());
        assert_eq!(f.doc.focused(), Some(f.trigger));
    }

    #[test]
    fn pointer_down_is_not_an_outside_exit() {
        let mut f = fixture();
        let mut trap = FocusTrap::new();
        trap.activate(&mut f.doc, f.container, None).unwrap();

        let down = Event::Pointer(PointerEvent::down(f.outside));
        assert_eq!(trap.handle_event(&mut f.doc, &down), None);
        assert!(trap.is_active());
    }

    #[test]
    fn release_emits_bubbling_cancelable_exit_notification() {
        let mut f = fixture();
        let mut trap = FocusTrap::new();
        trap.activate(&mut f.doc, f.container, Some(f.trigger)).unwrap();
        trap.deactivate(&mut f.doc).unwrap();

        let notifications = f.doc.drain_notifications();
        assert_eq!(notifications.len(), 1);
        let exit = &notifications[0];
        assert_eq!(exit.name, EXIT_FOCUS_TRAP);
        assert_eq!(exit.target, f.container);
        assert!(exit.bubbles);
        assert!(exit.cancelable);
        assert!(exit.path.contains(&f.doc.root()));
    }

    #[test]
    fn deactivate_clears_all_captured_state() {
        let mut f = fixture();
        let mut trap = FocusTrap::new();
        trap.activate(&mut f.doc, f.container, Some(f.trigger)).unwrap();
        trap.deactivate(&mut f.doc).unwrap();

        assert!(!trap.is_active());
        assert_eq!(trap.container(), None);
        assert_eq!(trap.trigger(), None);
        assert!(trap.items().is_empty());
        assert_eq!(f.doc.listener_count(), 0);
    }

    #[test]
    fn deactivate_while_inactive_is_misuse() {
        let mut f = fixture();
        let mut trap = FocusTrap::new();
        assert_eq!(trap.deactivate(&mut f.doc), Err(TrapError::NotActive));
    }

    #[test]
    fn trap_is_reusable_across_cycles() {
        let mut f = fixture();
        let mut trap = FocusTrap::new();

        trap.activate(&mut f.doc, f.container, Some(f.trigger)).unwrap();
        trap.deactivate(&mut f.doc).unwrap();
        trap.activate(&mut f.doc, f.container, None).unwrap();

        assert!(trap.is_active());
        assert_eq!(f.doc.focused(), Some(f.items[0]));
        assert_eq!(f.doc.listener_count(), 2);
    }

    #[test]
    fn inactive_trap_ignores_all_events() {
        let mut f = fixture();
        let mut trap = FocusTrap::new();
        assert_eq!(trap.handle_event(&mut f.doc, &tab()), None);
        assert_eq!(trap.handle_event(&mut f.doc, &escape()), None);
        let click = Event::Pointer(PointerEvent::click(f.outside));
        assert_eq!(trap.handle_event(&mut f.doc, &click), None);
    }

    #[test]
    fn non_tab_keys_and_releases_pass_through() {
        let mut f = fixture();
        let mut trap = FocusTrap::new();
        trap.activate(&mut f.doc, f.container, None).unwrap();

        let enter = Event::Key(KeyEvent::press(KeyCode::Enter));
        assert_eq!(trap.handle_event(&mut f.doc, &enter), None);

        let released_tab = Event::Key(KeyEvent {
            code: KeyCode::Tab,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Release,
        });
        assert_eq!(trap.handle_event(&mut f.doc, &released_tab), None);
        assert_eq!(f.doc.focused(), Some(f.items[0]));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Any run of Tab presses stays inside the captured cycle and
            // lands at the modular position; an equal run of Shift+Tab
            // walks it back to the start.
            #[test]
            fn tab_runs_stay_in_cycle(presses in 1usize..24) {
                let mut f = fixture();
                let mut trap = FocusTrap::new();
                trap.activate(&mut f.doc, f.container, None).unwrap();

                for _ in 0..presses {
                    let moved = trap.handle_event(&mut f.doc, &tab());
                    let Some(TrapAction::FocusMoved(target)) = moved else {
                        return Err(TestCaseError::fail("tab press not consumed"));
                    };
                    prop_assert!(f.items.contains(&target));
                }
                prop_assert_eq!(f.doc.focused(), Some(f.items[presses % f.items.len()]));

                for _ in 0..presses {
                    trap.handle_event(&mut f.doc, &shift_tab());
                }
                prop_assert_eq!(f.doc.focused(), Some(f.items[0]));
            }
        }
    }
}
