//! Presentation layer
//!
//! - `grid.rs` - header, filter bar, card grid and footer
//! - `lightbox.rs` - full-window image overlay
//! - `keyboard.rs` - key presses to lightbox intents
//!
//! Views only read the gallery state and emit messages.

pub mod grid;
pub mod keyboard;
pub mod lightbox;

/// Side effect the shell applies when the lightbox opens or closes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Lightbox opened: freeze the grid and remember its scroll offset
    LockScroll,
    /// Lightbox closed: restore the grid's scroll offset
    UnlockScroll,
}

/// Effect for a lightbox transition, if the open state changed
pub fn lightbox_effect(was_open: bool, is_open: bool) -> Option<Effect> {
    match (was_open, is_open) {
        (false, true) => Some(Effect::LockScroll),
        (true, false) => Some(Effect::UnlockScroll),
        _ => None,
    }
}
