//! Editable Primitive - Inline text that the user edits in place.
//!
//! While focused, keystrokes edit a draft buffer owned by the widget, never
//! the bound value. On blur the draft is compared with the last known value
//! and `on_change` fires only if they differ. An emptied draft is a real
//! edit: `on_change("")` fires and the empty text stays.
//!
//! # Keys
//!
//! - Printable chars insert at the cursor
//! - Backspace / Delete remove around the cursor (Ctrl+Backspace: word)
//! - ArrowLeft / ArrowRight move (Ctrl: by word), Home / End jump
//!
//! # Example
//!
//! ```ignore
//! use makeshift_vet::primitives::{editable, commit_on_blur, WidgetId};
//!
//! let node = editable(WidgetId::new("info.weight"), "10", |text| println!("{text}"));
//! ```

use std::rc::Rc;

use tracing::trace;

use super::types::{EditableProps, Node, WidgetId};
use crate::state::KeyboardEvent;

// =============================================================================
// Editable Component
// =============================================================================

/// Create an editable text node.
pub fn editable(
    id: WidgetId,
    value: impl Into<String>,
    on_change: impl Fn(String) + 'static,
) -> Node {
    Node::Editable(EditableProps {
        id,
        value: value.into(),
        on_change: Rc::new(on_change),
    })
}

/// Blur handling: hand `text` to `on_change` if it differs from the last
/// known value. Returns whether the callback fired.
pub fn commit_on_blur(props: &EditableProps, text: &str) -> bool {
    if props.value == text {
        trace!(id = %props.id, "blur without change");
        return false;
    }
    (props.on_change)(text.to_string());
    true
}

// =============================================================================
// Word Boundary Helpers
// =============================================================================

/// Start of the word before `pos` (a word is a run of alphanumerics).
fn find_word_start(chars: &[char], pos: usize) -> usize {
    let mut i = pos.min(chars.len());

    // Skip whitespace/punctuation going backward
    while i > 0 && !chars[i - 1].is_alphanumeric() {
        i -= 1;
    }
    while i > 0 && chars[i - 1].is_alphanumeric() {
        i -= 1;
    }
    i
}

/// End of the word after `pos`.
fn find_word_end(chars: &[char], pos: usize) -> usize {
    let len = chars.len();
    let mut i = pos.min(len);

    while i < len && !chars[i].is_alphanumeric() {
        i += 1;
    }
    while i < len && chars[i].is_alphanumeric() {
        i += 1;
    }
    i
}

// =============================================================================
// Edit Buffer
// =============================================================================

/// Draft text plus cursor (in chars).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EditBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl EditBuffer {
    /// Buffer holding `text` with the cursor at the end.
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let cursor = chars.len();
        Self { chars, cursor }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn insert(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    pub fn delete_word_back(&mut self) {
        let start = find_word_start(&self.chars, self.cursor);
        self.chars.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn word_left(&mut self) {
        self.cursor = find_word_start(&self.chars, self.cursor);
    }

    pub fn word_right(&mut self) {
        self.cursor = find_word_end(&self.chars, self.cursor);
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.chars.len();
    }

    /// Apply an editing key. Returns true if the key was consumed.
    pub fn apply_key(&mut self, event: &KeyboardEvent) -> bool {
        let ctrl = event.modifiers.ctrl;
        match event.key.as_str() {
            "Backspace" if ctrl => self.delete_word_back(),
            "Backspace" => self.backspace(),
            "Delete" => self.delete(),
            "ArrowLeft" if ctrl => self.word_left(),
            "ArrowLeft" => self.left(),
            "ArrowRight" if ctrl => self.word_right(),
            "ArrowRight" => self.right(),
            "Home" => self.home(),
            "End" => self.end(),
            key if !ctrl && !event.modifiers.alt => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => self.insert(c),
                    _ => return false,
                }
            }
            _ => return false,
        }
        true
    }
}

// =============================================================================
// Edit Session
// =============================================================================

/// An in-progress edit of one editable widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSession {
    pub id: WidgetId,
    pub buffer: EditBuffer,
}

impl EditSession {
    pub fn begin(id: WidgetId, value: &str) -> Self {
        Self {
            id,
            buffer: EditBuffer::new(value),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
