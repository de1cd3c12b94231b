#![forbid(unsafe_code)]

//! Captured layout geometry.
//!
//! Elements carry the rect the layout engine last assigned to them. The
//! focus utilities only ever ask one question of it — "does this element
//! render with non-zero width?" — so the type stays deliberately small.

/// An axis-aligned rectangle in layout coordinates.
///
/// `width == 0` is the visibility proxy used by the focusable query: an
/// element collapsed by `display:none` (or a zero-size ancestor) reports a
/// zero-width rect, while an element merely scrolled out of the viewport
/// keeps its rendered size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A zero-sized rect at the origin (the "not rendered" rect).
    pub const ZERO: Rect = Rect::new(0, 0, 0, 0);

    /// Whether the rect covers no area.
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the element this rect belongs to is rendered at all.
    ///
    /// Only width participates; a zero-height element (e.g. a collapsed
    /// details row mid-animation) still counts as rendered.
    pub const fn has_rendered_width(self) -> bool {
        self.width > 0
    }
}
