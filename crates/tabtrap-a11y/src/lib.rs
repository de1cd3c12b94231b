#![forbid(unsafe_code)]

//! Keyboard accessibility layer for tabtrap.
//!
//! Three pieces, smallest first:
//!
//! - [`focusable`] — which descendants of a container can take keyboard
//!   focus right now (the focusable query).
//! - [`pointer_guard`] — keeps pointer presses on links and buttons from
//!   stealing keyboard focus.
//! - [`trap`] — the [`FocusTrap`]: confines Tab navigation to a container
//!   subtree while a modal-like surface is open, and restores focus to the
//!   triggering element on exit.
//!
//! The layer is headless: it operates on a [`tabtrap_dom::Document`] the
//! host owns and routes input into. Nothing here touches global state, so
//! tests instantiate documents and traps freely.

pub mod focusable;
pub mod pointer_guard;
pub mod trap;

pub use focusable::focusable_items;
pub use pointer_guard::should_suppress_press_focus;
pub use trap::{EXIT_FOCUS_TRAP, FocusTrap, TrapAction, TrapError};
