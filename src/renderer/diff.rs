//! Differential line renderer.
//!
//! The DiffRenderer compares the laid-out screen with the previous one and
//! rewrites only the rows that changed. Editing the weight touches a single
//! row, so a keystroke costs one line of terminal output.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized update block
//! 2. For each row: skip it if equal to the previous frame's row,
//!    otherwise move there, clear it and print its spans
//! 3. Clear rows the previous frame had beyond the new frame's end
//! 4. Place (or hide) the cursor, flush once
//! 5. Store the screen as previous for the next comparison

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate};
use crossterm::queue;

use super::layout::Screen;
use crate::types::{Attr, Line};

/// Differential renderer over any writer.
///
/// `origin` is the terminal row the screen's first line is drawn on: 0 in
/// fullscreen mode, the reserved area's top in inline mode.
pub struct DiffRenderer<W: Write> {
    out: W,
    origin: u16,
    previous: Option<Screen>,
}

impl<W: Write> DiffRenderer<W> {
    pub fn new(out: W) -> Self {
        Self::with_origin(out, 0)
    }

    pub fn with_origin(out: W, origin: u16) -> Self {
        Self {
            out,
            origin,
            previous: None,
        }
    }

    /// Render a screen, writing only changed rows.
    ///
    /// Returns the number of rows rewritten.
    pub fn render(&mut self, screen: &Screen) -> io::Result<usize> {
        queue!(self.out, BeginSynchronizedUpdate, Hide)?;

        let mut changed = 0;
        for (y, line) in screen.lines.iter().enumerate() {
            let same = self
                .previous
                .as_ref()
                .and_then(|prev| prev.lines.get(y))
                .is_some_and(|prev| prev == line);
            if !same {
                self.write_line(y, line)?;
                changed += 1;
            }
        }

        // Rows the old frame had and the new one doesn't
        let stale = self
            .previous
            .as_ref()
            .map_or(0, |prev| prev.lines.len().saturating_sub(screen.lines.len()));
        for y in screen.lines.len()..screen.lines.len() + stale {
            let row = self.row(y);
            queue!(self.out, MoveTo(0, row), Clear(ClearType::UntilNewLine))?;
            changed += 1;
        }

        if let Some((x, y)) = screen.cursor {
            let row = self.row(y as usize);
            queue!(self.out, MoveTo(x, row), Show)?;
        }

        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;

        self.previous = Some(screen.clone());
        Ok(changed)
    }

    /// Force a full redraw (no diffing).
    ///
    /// Use this after a terminal resize or when the screen is corrupted.
    pub fn render_full(&mut self, screen: &Screen) -> io::Result<usize> {
        self.invalidate();
        self.render(screen)
    }

    /// Invalidate the previous frame. Next render redraws every row.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn set_origin(&mut self, origin: u16) {
        if origin != self.origin {
            self.origin = origin;
            self.invalidate();
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    fn row(&self, y: usize) -> u16 {
        self.origin.saturating_add(y as u16)
    }

    fn write_line(&mut self, y: usize, line: &Line) -> io::Result<()> {
        let row = self.row(y);
        queue!(self.out, MoveTo(0, row), Clear(ClearType::UntilNewLine))?;
        for span in &line.spans {
            if span.attr.is_empty() {
                queue!(self.out, Print(&span.text))?;
            } else {
                set_attr(&mut self.out, span.attr)?;
                queue!(self.out, Print(&span.text), SetAttribute(Attribute::Reset))?;
            }
        }
        Ok(())
    }
}

fn set_attr(out: &mut impl Write, attr: Attr) -> io::Result<()> {
    if attr.contains(Attr::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if attr.contains(Attr::DIM) {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if attr.contains(Attr::ITALIC) {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if attr.contains(Attr::UNDERLINE) {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if attr.contains(Attr::INVERSE) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
