//! Switch Primitive - Boolean toggle.
//!
//! Rendered as `[x]` / `[ ]`. Space or Enter while focused flips it.

use std::rc::Rc;

use super::types::{Node, SwitchProps, WidgetId};

/// Create a switch node.
pub fn switch(id: WidgetId, checked: bool, on_toggle: impl Fn(bool) + 'static) -> Node {
    Node::Switch(SwitchProps {
        id,
        checked,
        on_toggle: Rc::new(on_toggle),
    })
}

/// Flip the switch: calls `on_toggle` with the negated state.
pub fn toggle(props: &SwitchProps) {
    (props.on_toggle)(!props.checked);
}

/// True for the keys that activate a switch.
pub fn is_activation_key(key: &str) -> bool {
    key == " " || key == "Enter"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_toggle_negates() {
        let seen = Rc::new(Cell::new(None));
        let seen_clone = seen.clone();
        let node = switch(WidgetId::new("s"), false, move |v| seen_clone.set(Some(v)));
        let Node::Switch(props) = node else {
            unreachable!()
        };

        toggle(&props);
        assert_eq!(seen.get(), Some(true));
    }

    #[test]
    fn test_activation_keys() {
        assert!(is_activation_key(" "));
        assert!(is_activation_key("Enter"));
        assert!(!is_activation_key("x"));
    }
}
