//! Focus System - Keyboard navigation and focus state
//!
//! A [`FocusRing`] tracks which focusable widget has focus:
//! - `focused` signal (index into the current focus order, -1 if none)
//! - Focus cycling (Tab/Shift+Tab) with wrap-around
//! - Focus kept on the same widget across re-renders, by [`WidgetId`]
//!
//! Moves return a [`FocusChange`] so the caller can run blur handling for
//! the widget that lost focus before anything else happens.
//!
//! # Example
//!
//! ```ignore
//! let ring = FocusRing::new();
//! ring.set_order(tree.focusables().iter().map(|f| f.id().clone()).collect());
//! if let Some(change) = ring.focus_next() {
//!     // commit whatever `change.from` was editing
//! }
//! ```

use std::cell::RefCell;

use spark_signals::{Signal, signal};
use tracing::trace;

use crate::primitives::WidgetId;

/// Focus moved from one widget to another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusChange {
    pub from: Option<WidgetId>,
    pub to: Option<WidgetId>,
}

/// Focus state for one editor.
pub struct FocusRing {
    focused: Signal<i32>,
    order: RefCell<Vec<WidgetId>>,
}

impl Default for FocusRing {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusRing {
    pub fn new() -> Self {
        Self {
            focused: signal(-1),
            order: RefCell::new(Vec::new()),
        }
    }

    /// The focused-index signal, for reactive tracking.
    pub fn signal(&self) -> Signal<i32> {
        self.focused.clone()
    }

    /// Get the currently focused index (-1 if none)
    pub fn get_focused_index(&self) -> i32 {
        self.focused.get()
    }

    /// Check if any widget is focused
    pub fn has_focus(&self) -> bool {
        self.get_focused_index() >= 0
    }

    pub fn focused_id(&self) -> Option<WidgetId> {
        let index = self.get_focused_index();
        if index < 0 {
            return None;
        }
        self.order.borrow().get(index as usize).cloned()
    }

    pub fn is_focused(&self, id: &WidgetId) -> bool {
        self.focused_id().as_ref() == Some(id)
    }

    pub fn len(&self) -> usize {
        self.order.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.borrow().is_empty()
    }

    /// Replace the focus order after a render.
    ///
    /// The focused widget keeps focus if it is still present. If it vanished,
    /// focus stays at the same position (clamped), or clears if the order is
    /// empty.
    pub fn set_order(&self, ids: Vec<WidgetId>) {
        let current = self.focused_id();
        let old_index = self.get_focused_index();
        let len = ids.len() as i32;

        let next = match current {
            Some(id) => match ids.iter().position(|other| *other == id) {
                Some(index) => index as i32,
                None if len == 0 => -1,
                None => old_index.min(len - 1),
            },
            None => -1,
        };

        *self.order.borrow_mut() = ids;
        self.set_index(next);
    }

    /// Focus a specific widget. Returns the change, or None if `id` is
    /// unknown or already focused.
    pub fn focus(&self, id: &WidgetId) -> Option<FocusChange> {
        let index = self.order.borrow().iter().position(|other| other == id)?;
        self.move_to(index as i32)
    }

    /// Focus next widget (wraps around)
    pub fn focus_next(&self) -> Option<FocusChange> {
        let len = self.len() as i32;
        if len == 0 {
            return None;
        }
        let current = self.get_focused_index();
        let next = if current < 0 { 0 } else { (current + 1) % len };
        self.move_to(next)
    }

    /// Focus previous widget (wraps around)
    pub fn focus_previous(&self) -> Option<FocusChange> {
        let len = self.len() as i32;
        if len == 0 {
            return None;
        }
        let current = self.get_focused_index();
        let previous = if current <= 0 { len - 1 } else { current - 1 };
        self.move_to(previous)
    }

    pub fn focus_first(&self) -> Option<FocusChange> {
        if self.is_empty() {
            return None;
        }
        self.move_to(0)
    }

    pub fn focus_last(&self) -> Option<FocusChange> {
        let len = self.len() as i32;
        if len == 0 {
            return None;
        }
        self.move_to(len - 1)
    }

    /// Clear focus.
    pub fn blur(&self) -> Option<FocusChange> {
        self.move_to(-1)
    }

    fn move_to(&self, index: i32) -> Option<FocusChange> {
        if index == self.get_focused_index() {
            return None;
        }
        let from = self.focused_id();
        self.set_index(index);
        let to = self.focused_id();
        trace!(?from, ?to, "focus moved");
        Some(FocusChange { from, to })
    }

    fn set_index(&self, index: i32) {
        // No change, no notification
        if self.focused.get() != index {
            self.focused.set(index);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<WidgetId> {
        names.iter().map(|n| WidgetId::new(*n)).collect()
    }

    #[test]
    fn test_initial_state() {
        let ring = FocusRing::new();
        assert_eq!(ring.get_focused_index(), -1);
        assert!(!ring.has_focus());
        assert!(ring.focus_next().is_none());
    }

    #[test]
    fn test_focus_next_previous_wrap() {
        let ring = FocusRing::new();
        ring.set_order(ids(&["a", "b", "c"]));

        let change = ring.focus_next().unwrap();
        assert_eq!(change.from, None);
        assert_eq!(change.to, Some(WidgetId::new("a")));

        ring.focus_next();
        ring.focus_next();
        assert_eq!(ring.focused_id(), Some(WidgetId::new("c")));

        // Wrap around
        let change = ring.focus_next().unwrap();
        assert_eq!(change.from, Some(WidgetId::new("c")));
        assert_eq!(change.to, Some(WidgetId::new("a")));

        ring.focus_previous();
        assert_eq!(ring.focused_id(), Some(WidgetId::new("c")));
    }

    #[test]
    fn test_focus_follows_widget_across_reorder() {
        let ring = FocusRing::new();
        ring.set_order(ids(&["a", "b", "c"]));
        ring.focus(&WidgetId::new("b"));

        ring.set_order(ids(&["b", "c", "a"]));
        assert_eq!(ring.get_focused_index(), 0);
        assert!(ring.is_focused(&WidgetId::new("b")));
    }

    #[test]
    fn test_vanished_widget_clamps() {
        let ring = FocusRing::new();
        ring.set_order(ids(&["a", "b", "c"]));
        ring.focus_last();

        ring.set_order(ids(&["a", "b"]));
        assert_eq!(ring.focused_id(), Some(WidgetId::new("b")));

        ring.set_order(Vec::new());
        assert!(!ring.has_focus());
    }

    #[test]
    fn test_refocus_same_widget_is_noop() {
        let ring = FocusRing::new();
        ring.set_order(ids(&["a"]));
        assert!(ring.focus(&WidgetId::new("a")).is_some());
        assert!(ring.focus(&WidgetId::new("a")).is_none());
        assert!(ring.focus(&WidgetId::new("zzz")).is_none());
    }

    #[test]
    fn test_blur() {
        let ring = FocusRing::new();
        ring.set_order(ids(&["a"]));
        ring.focus_first();
        let change = ring.blur().unwrap();
        assert_eq!(change.from, Some(WidgetId::new("a")));
        assert_eq!(change.to, None);
    }
}
