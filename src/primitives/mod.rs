//! Primitives - View building blocks.
//!
//! This module provides the widgets views are composed from:
//! - [`text`] / [`heading`] - static display
//! - [`row`] / [`column`] - layout containers
//! - [`editable`] - inline editable text with commit-on-blur
//! - [`switch`] - boolean toggle
//!
//! # Architecture
//!
//! Views are plain functions returning a [`Node`] tree. Focusable widgets
//! carry their callbacks in the tree and are identified by [`WidgetId`],
//! which is derived from the binding path they write through. The editor
//! collects them with [`Node::focusables`] after each render.

mod editable;
mod switch;
mod text;
mod types;

pub use editable::{EditBuffer, EditSession, commit_on_blur, editable};
pub use switch::{is_activation_key, switch, toggle};
pub use text::{column, heading, row, text};
pub use types::*;
