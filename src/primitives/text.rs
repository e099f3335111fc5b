//! Text Primitives - Static text, headings and layout containers.
//!
//! Pure display nodes. They carry no callbacks and are never focusable.

use super::types::Node;

/// Plain text.
pub fn text(content: impl Into<String>) -> Node {
    Node::Text(content.into())
}

/// Heading. Level 1 is the page title, 2 a section, 3 a subsection.
pub fn heading(level: u8, content: impl Into<String>) -> Node {
    Node::Heading {
        level: level.clamp(1, 3),
        text: content.into(),
    }
}

/// Children laid out on one line.
pub fn row(children: Vec<Node>) -> Node {
    Node::Row(children)
}

/// Children stacked vertically.
pub fn column(children: Vec<Node>) -> Node {
    Node::Column(children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_clamped() {
        match heading(7, "x") {
            Node::Heading { level, text } => {
                assert_eq!(level, 3);
                assert_eq!(text, "x");
            }
            other => panic!("unexpected node {other:?}"),
        }
    }
}
