//! Terminal setup - raw mode, alternate screen and render modes.

use std::io::{self, Write};

use clap::ValueEnum;
use crossterm::cursor::{self, Hide, MoveTo, Show};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use tracing::debug;

/// Fallback when the terminal cannot report its size.
pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

/// How the editor occupies the terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RenderMode {
    /// Alternate screen, restored on exit.
    #[default]
    Fullscreen,
    /// Draw below the prompt and leave the final frame in scrollback.
    Inline,
}

/// Current terminal size as (columns, rows).
pub fn terminal_size() -> (u16, u16) {
    terminal::size().unwrap_or(DEFAULT_SIZE)
}

/// Puts the terminal into raw mode (plus the alternate screen in fullscreen
/// mode) and undoes it on drop.
#[derive(Debug)]
pub struct TerminalGuard {
    mode: RenderMode,
    active: bool,
}

impl TerminalGuard {
    pub fn enter(mode: RenderMode) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if mode == RenderMode::Fullscreen {
            execute!(io::stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        }
        debug!(?mode, "terminal entered");
        Ok(Self { mode, active: true })
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let mut out = io::stdout();
        if self.mode == RenderMode::Fullscreen {
            execute!(out, Show, LeaveAlternateScreen)?;
        } else {
            execute!(out, Show)?;
        }
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Make room for `rows` lines below the cursor, scrolling if needed.
///
/// Returns the terminal row where the reserved area starts.
pub fn reserve_rows(out: &mut impl Write, rows: u16) -> io::Result<u16> {
    for _ in 0..rows {
        queue!(out, Print("\r\n"))?;
    }
    out.flush()?;
    let (_, row) = cursor::position()?;
    Ok(row.saturating_sub(rows))
}

/// Leave the cursor on the line after an inline frame.
pub fn park_cursor(out: &mut impl Write, row: u16) -> io::Result<()> {
    execute!(out, MoveTo(0, row), Print("\r\n"))
}
