//! Primitive types - the view tree and widget callbacks.
//!
//! Views build a [`Node`] tree. Widgets carry their callbacks inside the
//! tree; the editor pulls them back out by [`WidgetId`] when a key arrives.

use std::fmt;
use std::rc::Rc;

// =============================================================================
// Callback Types
// =============================================================================

/// Editable text commit callback (called on blur with the new text).
pub type ChangeCallback = Rc<dyn Fn(String)>;

/// Switch toggle callback (called with the new checked state).
pub type ToggleCallback = Rc<dyn Fn(bool)>;

// =============================================================================
// Widget Identity
// =============================================================================

/// Stable identity of a focusable widget across renders.
///
/// Derived from the binding path the widget writes through, so it survives
/// re-renders and list reordering.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Widget Props
// =============================================================================

#[derive(Clone)]
pub struct EditableProps {
    pub id: WidgetId,
    /// Last known bound value.
    pub value: String,
    pub on_change: ChangeCallback,
}

#[derive(Clone)]
pub struct SwitchProps {
    pub id: WidgetId,
    pub checked: bool,
    pub on_toggle: ToggleCallback,
}

impl fmt::Debug for EditableProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditableProps")
            .field("id", &self.id)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for SwitchProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchProps")
            .field("id", &self.id)
            .field("checked", &self.checked)
            .finish_non_exhaustive()
    }
}

/// A focusable widget pulled out of a node tree.
#[derive(Clone, Debug)]
pub enum Focusable {
    Editable(EditableProps),
    Switch(SwitchProps),
}

impl Focusable {
    pub fn id(&self) -> &WidgetId {
        match self {
            Focusable::Editable(props) => &props.id,
            Focusable::Switch(props) => &props.id,
        }
    }
}

// =============================================================================
// Node
// =============================================================================

/// The view tree.
#[derive(Clone, Debug)]
pub enum Node {
    Empty,
    Heading { level: u8, text: String },
    Text(String),
    Editable(EditableProps),
    Switch(SwitchProps),
    /// Children laid out on one line.
    Row(Vec<Node>),
    /// Children stacked vertically.
    Column(Vec<Node>),
    /// A list child with its list key.
    Keyed { key: String, child: Box<Node> },
}

impl Node {
    pub fn keyed(key: impl Into<String>, child: Node) -> Self {
        Node::Keyed {
            key: key.into(),
            child: Box::new(child),
        }
    }

    /// Focusable widgets in document order.
    pub fn focusables(&self) -> Vec<Focusable> {
        let mut out = Vec::new();
        self.collect_focusables(&mut out);
        out
    }

    fn collect_focusables(&self, out: &mut Vec<Focusable>) {
        match self {
            Node::Editable(props) => out.push(Focusable::Editable(props.clone())),
            Node::Switch(props) => out.push(Focusable::Switch(props.clone())),
            Node::Row(children) | Node::Column(children) => {
                for child in children {
                    child.collect_focusables(out);
                }
            }
            Node::Keyed { child, .. } => child.collect_focusables(out),
            Node::Empty | Node::Heading { .. } | Node::Text(_) => {}
        }
    }

    /// Keys of direct keyed children, in order.
    pub fn child_keys(&self) -> Vec<&str> {
        match self {
            Node::Row(children) | Node::Column(children) => children
                .iter()
                .filter_map(|child| match child {
                    Node::Keyed { key, .. } => Some(key.as_str()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focusables_in_document_order() {
        let tree = Node::Column(vec![
            Node::Text("Name".into()),
            Node::Editable(EditableProps {
                id: WidgetId::new("a"),
                value: "1".into(),
                on_change: Rc::new(|_: String| {}),
            }),
            Node::keyed(
                "k",
                Node::Row(vec![Node::Switch(SwitchProps {
                    id: WidgetId::new("b"),
                    checked: false,
                    on_toggle: Rc::new(|_: bool| {}),
                })]),
            ),
        ]);

        let ids: Vec<String> = tree.focusables().iter().map(|f| f.id().to_string()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(tree.child_keys(), vec!["k"]);
    }
}
