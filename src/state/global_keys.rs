//! Global Keys Module - Editor-wide keyboard shortcuts
//!
//! Keys that mean the same thing whatever widget has focus:
//! - Ctrl+C: quit
//! - Tab / ArrowDown: focus next widget
//! - Shift+Tab / ArrowUp: focus previous widget
//!
//! Everything else is routed to the focused widget.

use super::keyboard::KeyboardEvent;

/// What a global shortcut asks the editor to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    FocusNext,
    FocusPrevious,
}

/// Classify `event` as a global shortcut, if it is one.
pub fn global_action(event: &KeyboardEvent) -> Option<GlobalAction> {
    let mods = event.modifiers;
    match event.key.as_str() {
        "c" if mods.ctrl => Some(GlobalAction::Quit),
        // Shift+Tab must be checked before plain Tab
        "Tab" if mods.shift => Some(GlobalAction::FocusPrevious),
        "Tab" => Some(GlobalAction::FocusNext),
        "ArrowDown" => Some(GlobalAction::FocusNext),
        "ArrowUp" => Some(GlobalAction::FocusPrevious),
        _ => None,
    }
}
