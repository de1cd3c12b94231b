#![forbid(unsafe_code)]

//! Input event vocabulary.
//!
//! Mirrors the subset of browser input the focus utilities react to:
//! keyboard presses (Tab, Escape, printable characters) and pointer
//! interactions with a known target element. Events are plain values; the
//! host's input loop constructs them and routes them to whoever holds
//! listener registrations on the [`Document`](crate::Document).
//!
//! # Invariants
//!
//! - Events never carry document references, only [`NodeId`]s. Resolving an
//!   id against the wrong document is a caller bug the type system does not
//!   prevent; keep one document per input loop.
//! - A `KeyEvent` with `kind == Release` is delivered but ignored by every
//!   consumer in this workspace. It exists so hosts can forward raw input
//!   without filtering.

use bitflags::bitflags;

use crate::document::NodeId;

bitflags! {
    /// Keyboard modifier state at the time of the event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const CTRL  = 0b0000_0010;
        const ALT   = 0b0000_0100;
    }
}

/// Logical key identity, independent of layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Tab,
    Enter,
    Escape,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Char(char),
}

/// Press or release edge of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    Press,
    Release,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A press of `code` with no modifiers.
    pub const fn press(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Press,
        }
    }

    /// Attach modifiers.
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether this is a press (not a release).
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press)
    }
}

/// Which pointer button produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button went down on the target.
    Down,
    /// Button released on the target.
    Up,
    /// Full press-and-release on the same target.
    Click,
}

/// A pointer event aimed at a document element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub button: PointerButton,
    /// The innermost element under the pointer.
    pub target: NodeId,
}

impl PointerEvent {
    /// A primary-button click on `target`.
    pub const fn click(target: NodeId) -> Self {
        Self {
            kind: PointerEventKind::Click,
            button: PointerButton::Primary,
            target,
        }
    }

    /// A primary-button press on `target`.
    pub const fn down(target: NodeId) -> Self {
        Self {
            kind: PointerEventKind::Down,
            button: PointerButton::Primary,
            target,
        }
    }
}

/// Any input event the document can route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Key(KeyEvent),
    Pointer(PointerEvent),
}

impl Event {
    /// The key event, if this is a key press.
    pub fn as_key_press(&self) -> Option<&KeyEvent> {
        match self {
            Event::Key(key) if key.is_press() => Some(key),
            _ => None,
        }
    }

    /// The pointer event, if any.
    pub fn as_pointer(&self) -> Option<&PointerEvent> {
        match self {
            Event::Pointer(pointer) => Some(pointer),
            Event::Key(_) => None,
        }
    }
}

impl From<KeyEvent> for Event {
    fn from(key: KeyEvent) -> Self {
        Event::Key(key)
    }
}

impl From<PointerEvent> for Event {
    fn from(pointer: PointerEvent) -> Self {
        Event::Pointer(pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_constructor_has_no_modifiers() {
        let event = KeyEvent::press(KeyCode::Tab);
        assert!(event.modifiers.is_empty());
        assert!(event.is_press());
    }

    #[test]
    fn with_modifiers_sets_shift() {
        let event = KeyEvent::press(KeyCode::Tab).with_modifiers(Modifiers::SHIFT);
        assert!(event.modifiers.contains(Modifiers::SHIFT));
    }

    #[test]
    fn release_is_not_a_key_press() {
        let event = Event::Key(KeyEvent {
            code: KeyCode::Escape,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Release,
        });
        assert!(event.as_key_press().is_none());
    }

    #[test]
    fn pointer_accessor_roundtrips() {
        let target = NodeId::from_raw(3);
        let event: Event = PointerEvent::click(target).into();
        assert_eq!(event.as_pointer().map(|p| p.target), Some(target));
        assert!(event.as_key_press().is_none());
    }
}
