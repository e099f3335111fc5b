//! Renderer - view tree to terminal.
//!
//! [`layout`] flattens a [`Frame`] into styled lines; [`DiffRenderer`]
//! writes those lines to the terminal, skipping unchanged rows.

mod diff;
mod layout;

pub use diff::DiffRenderer;
pub use layout::{layout, Frame, Screen};

/// Lay out `frame` and return its text without attributes.
pub fn render_plain(frame: &Frame) -> String {
    layout(frame).plain()
}
