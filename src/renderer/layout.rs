//! Layout - turns a view tree into styled terminal lines.
//!
//! Columns stack their children; rows run their children together on one
//! line. Level 1-2 headings get a blank line above them. The focused widget
//! is drawn inverse, and an editable with a live draft shows the draft and
//! reports where the terminal cursor belongs.

use crate::primitives::{EditSession, EditableProps, Node, SwitchProps, WidgetId};
use crate::types::{Attr, Line, Span};

/// Everything needed to draw one frame.
#[derive(Clone, Debug)]
pub struct Frame {
    pub root: Node,
    pub focused: Option<WidgetId>,
    pub session: Option<EditSession>,
}

impl Frame {
    pub fn new(root: Node) -> Self {
        Self {
            root,
            focused: None,
            session: None,
        }
    }
}

/// Laid-out frame: lines plus the cursor cell (column, row) if editing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Screen {
    pub lines: Vec<Line>,
    pub cursor: Option<(u16, u16)>,
}

impl Screen {
    /// Text without attributes, one line per row.
    pub fn plain(&self) -> String {
        self.lines
            .iter()
            .map(Line::plain)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Lay out `frame`.
pub fn layout(frame: &Frame) -> Screen {
    let mut layouter = Layouter {
        frame,
        lines: Vec::new(),
        current: None,
        cursor: None,
    };
    layouter.block(&frame.root);
    layouter.finish_line();
    Screen {
        lines: layouter.lines,
        cursor: layouter.cursor,
    }
}

struct Layouter<'a> {
    frame: &'a Frame,
    lines: Vec<Line>,
    current: Option<Line>,
    cursor: Option<(u16, u16)>,
}

impl Layouter<'_> {
    fn finish_line(&mut self) {
        if let Some(line) = self.current.take() {
            self.lines.push(line);
        }
    }

    fn line(&mut self) -> &mut Line {
        self.current.get_or_insert_with(Line::new)
    }

    fn block(&mut self, node: &Node) {
        match node {
            Node::Empty => {}
            Node::Column(children) => {
                for child in children {
                    self.block(child);
                }
            }
            Node::Keyed { child, .. } => self.block(child),
            Node::Heading { level, text } => {
                self.finish_line();
                if *level <= 2 && !self.lines.is_empty() {
                    self.lines.push(Line::new());
                }
                let attr = match level {
                    1 => Attr::BOLD | Attr::UNDERLINE,
                    2 => Attr::BOLD,
                    _ => Attr::BOLD | Attr::DIM,
                };
                self.line().push(Span::styled(text.clone(), attr));
                self.finish_line();
            }
            Node::Row(_) | Node::Text(_) | Node::Editable(_) | Node::Switch(_) => {
                self.finish_line();
                self.inline(node);
                self.finish_line();
            }
        }
    }

    fn inline(&mut self, node: &Node) {
        match node {
            Node::Empty => {}
            Node::Text(text) => self.line().push(Span::plain(text.clone())),
            Node::Heading { text, .. } => self.line().push(Span::styled(text.clone(), Attr::BOLD)),
            Node::Editable(props) => self.editable(props),
            Node::Switch(props) => self.switch(props),
            Node::Row(children) | Node::Column(children) => {
                for child in children {
                    self.inline(child);
                }
            }
            Node::Keyed { child, .. } => self.inline(child),
        }
    }

    fn is_focused(&self, id: &WidgetId) -> bool {
        self.frame.focused.as_ref() == Some(id)
    }

    fn editable(&mut self, props: &EditableProps) {
        let focused = self.is_focused(&props.id);
        let session = self
            .frame
            .session
            .as_ref()
            .filter(|session| session.id == props.id);
        let (content, cursor) = match session {
            Some(session) => (session.buffer.text(), Some(session.buffer.cursor())),
            None => (props.value.clone(), None),
        };
        let attr = if focused { Attr::INVERSE } else { Attr::UNDERLINE };

        self.line().push(Span::plain("["));
        let start = self.line().width();
        let row = self.lines.len();
        // Keep an empty focused field visible
        let shown = if content.is_empty() && focused { " ".to_string() } else { content };
        self.line().push(Span::styled(shown, attr));
        self.line().push(Span::plain("]"));

        if let Some(offset) = cursor.filter(|_| focused) {
            self.cursor = Some(((start + offset) as u16, row as u16));
        }
    }

    fn switch(&mut self, props: &SwitchProps) {
        let mark = if props.checked { "[x]" } else { "[ ]" };
        let attr = if self.is_focused(&props.id) { Attr::INVERSE } else { Attr::NONE };
        self.line().push(Span::styled(mark, attr));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{column, editable, heading, row, switch, text};

    fn form() -> Node {
        column(vec![
            heading(1, "Title"),
            heading(2, "Section"),
            row(vec![
                text("Weight: "),
                editable(WidgetId::new("w"), "10", |_| {}),
                text(" lbs"),
            ]),
            row(vec![text("tip "), switch(WidgetId::new("s"), true, |_| {})]),
        ])
    }

    #[test]
    fn test_layout_plain_text() {
        let screen = layout(&Frame::new(form()));
        assert_eq!(
            screen.plain(),
            "Title\n\nSection\nWeight: [10] lbs\ntip [x]"
        );
        assert_eq!(screen.cursor, None);
    }

    #[test]
    fn test_focused_switch_is_inverse() {
        let frame = Frame {
            focused: Some(WidgetId::new("s")),
            ..Frame::new(form())
        };
        let screen = layout(&frame);
        let last = screen.lines.last().unwrap();
        assert!(last.spans.iter().any(|s| s.text == "[x]" && s.attr == Attr::INVERSE));
    }

    #[test]
    fn test_session_draft_and_cursor() {
        let mut session = EditSession::begin(WidgetId::new("w"), "10");
        session.buffer.backspace();
        let frame = Frame {
            focused: Some(WidgetId::new("w")),
            session: Some(session),
            ..Frame::new(form())
        };
        let screen = layout(&frame);
        assert_eq!(screen.lines[3].plain(), "Weight: [1] lbs");
        // "Weight: [" is 9 columns, cursor after the single char
        assert_eq!(screen.cursor, Some((10, 3)));
    }

    #[test]
    fn test_empty_focused_editable_stays_visible() {
        let frame = Frame {
            focused: Some(WidgetId::new("w")),
            session: Some(EditSession::begin(WidgetId::new("w"), "")),
            ..Frame::new(form())
        };
        let screen = layout(&frame);
        assert_eq!(screen.lines[3].plain(), "Weight: [ ] lbs");
    }
}
