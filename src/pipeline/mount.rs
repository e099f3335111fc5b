//! Mount API - Editor lifecycle and render effect.
//!
//! Sets up the one render effect that watches the editor's signals and
//! draws to the terminal, plus the blocking event loop that feeds keys to
//! the editor.
//!
//! # Example
//!
//! ```ignore
//! use makeshift_vet::pipeline::{mount, CatEditor, RenderMode};
//!
//! let editor = Rc::new(CatEditor::new(default_cat(), LogReporter));
//! let handle = mount::mount(editor.clone(), RenderMode::Fullscreen)?;
//! mount::run(&editor, &handle)?;  // Blocks until Ctrl+C, Esc or `q`
//! handle.unmount();
//! ```

use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use spark_signals::{Signal, effect, signal};
use tracing::{debug, warn};

use super::editor::{CatEditor, EditorAction};
use super::terminal::{self, RenderMode, TerminalGuard};
use crate::renderer::{DiffRenderer, Screen, layout, render_plain};
use crate::state::{InputEvent, poll_event};
use crate::types::{Attr, Line, Span};

const HELP: &str = "Tab/Shift+Tab move  Space toggle  Enter commit  Esc revert or quit  Ctrl+C quit";

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by mount() that allows unmounting.
///
/// Holds the render effect stop function, the running flag and the
/// terminal guard. Dropping it restores the terminal.
pub struct MountHandle {
    stop_effect: Option<Box<dyn FnOnce()>>,
    running: Rc<Cell<bool>>,
    size: Signal<(u16, u16)>,
    bottom: Rc<Cell<u16>>,
    guard: Option<TerminalGuard>,
}

impl MountHandle {
    /// Stop the render effect and restore the terminal.
    pub fn unmount(mut self) {
        self.shutdown();
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Ask the event loop to stop.
    pub fn stop(&self) {
        self.running.set(false);
    }

    /// Record a terminal resize; the render effect redraws everything.
    pub fn resize(&self, width: u16, height: u16) {
        self.size.set((width, height));
    }

    fn shutdown(&mut self) {
        self.running.set(false);

        if let Some(stop) = self.stop_effect.take() {
            stop();
        }

        if let Some(mut guard) = self.guard.take() {
            if guard.mode() == RenderMode::Inline {
                let _ = terminal::park_cursor(&mut io::stdout(), self.bottom.get());
            }
            if let Err(err) = guard.restore() {
                warn!(%err, "terminal restore failed");
            }
        }
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Lay out the editor's current frame plus the key help line.
pub fn screen(editor: &CatEditor) -> Screen {
    let mut screen = layout(&editor.render());
    let mut help = Line::new();
    help.push(Span::styled(HELP, Attr::DIM));
    screen.lines.push(Line::new());
    screen.lines.push(help);
    screen
}

/// Mount the editor on the terminal.
///
/// This sets up:
/// 1. Raw mode (and the alternate screen in fullscreen mode)
/// 2. The render effect, tracking the store revision, focus, draft and
///    terminal size signals
///
/// Returns a MountHandle for cleanup.
pub fn mount(editor: Rc<CatEditor>, mode: RenderMode) -> io::Result<MountHandle> {
    let guard = TerminalGuard::enter(mode)?;

    let origin = match mode {
        RenderMode::Fullscreen => 0,
        RenderMode::Inline => {
            let rows = screen(&editor).lines.len() as u16;
            terminal::reserve_rows(&mut io::stdout(), rows)?
        }
    };

    let running = Rc::new(Cell::new(true));
    let running_clone = running.clone();
    let size = signal(terminal::terminal_size());
    let size_clone = size.clone();
    let bottom = Rc::new(Cell::new(origin));
    let bottom_clone = bottom.clone();
    let revision = editor.revision_signal();

    let mut renderer = DiffRenderer::with_origin(io::stdout(), origin);
    let mut last_size = size.get();

    // The ONE render effect
    let stop_fn = effect(move || {
        if !running_clone.get() {
            return;
        }

        // Reads create the dependencies
        let _ = revision.get();
        let current_size = size_clone.get();
        if current_size != last_size {
            debug!(?current_size, "terminal resized");
            renderer.invalidate();
            last_size = current_size;
        }

        let screen = screen(&editor);
        bottom_clone.set(origin.saturating_add(screen.lines.len() as u16));
        if let Err(err) = renderer.render(&screen) {
            warn!(%err, "render failed");
        }
    });

    Ok(MountHandle {
        stop_effect: Some(Box::new(stop_fn)),
        running,
        size,
        bottom,
        guard: Some(guard),
    })
}

/// Unmount and clean up.
pub fn unmount(handle: MountHandle) {
    handle.unmount();
}

// =============================================================================
// Event Loop
// =============================================================================

/// Process at most one input event.
///
/// Returns `Ok(false)` once the editor asked to quit.
pub fn tick(editor: &CatEditor, handle: &MountHandle) -> io::Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    // Poll with short timeout (~60fps)
    match poll_event(Duration::from_millis(16))? {
        Some(InputEvent::Key(event)) => {
            if editor.handle_key(&event) == EditorAction::Quit {
                handle.stop();
            }
        }
        Some(InputEvent::Resize(width, height)) => handle.resize(width, height),
        Some(InputEvent::None) | None => {}
    }

    Ok(handle.is_running())
}

/// Run the event loop (blocking until the editor quits).
pub fn run(editor: &CatEditor, handle: &MountHandle) -> io::Result<()> {
    while tick(editor, handle)? {}
    Ok(())
}

/// Render the editor once as plain text.
pub fn print_once(editor: &CatEditor, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", render_plain(&editor.render()))?;
    out.flush()
}

// =============================================================================
// Tests
// =============================================================================
