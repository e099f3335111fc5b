//! Core render types - text attributes, spans and lines.
//!
//! The renderer deals in lines of styled spans. Nothing more complex.

// =============================================================================
// Text Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for cheap storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::UNDERLINE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERSE = 1 << 4;
    }
}

// =============================================================================
// Span / Line
// =============================================================================

/// A run of text sharing one set of attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub text: String,
    pub attr: Attr,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attr: Attr::NONE,
        }
    }

    pub fn styled(text: impl Into<String>, attr: Attr) -> Self {
        Self {
            text: text.into(),
            attr,
        }
    }

    /// Width in terminal columns (one column per char).
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// One terminal row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, span: Span) {
        if span.text.is_empty() {
            return;
        }
        // Merge with the previous span when attributes match
        if let Some(last) = self.spans.last_mut() {
            if last.attr == span.attr {
                last.text.push_str(&span.text);
                return;
            }
        }
        self.spans.push(span);
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Text without attributes.
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_combination() {
        let attr = Attr::BOLD | Attr::UNDERLINE;
        assert!(attr.contains(Attr::BOLD));
        assert!(!attr.contains(Attr::INVERSE));
    }

    #[test]
    fn test_line_merges_matching_spans() {
        let mut line = Line::new();
        line.push(Span::plain("Weight: "));
        line.push(Span::plain("["));
        line.push(Span::styled("10", Attr::INVERSE));
        line.push(Span::plain(""));
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.plain(), "Weight: [10");
        assert_eq!(line.width(), 11);
    }
}
