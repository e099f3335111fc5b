//! Editor Pipeline
//!
//! Connects the record store and views to the terminal.
//!
//! # Pipeline Architecture
//!
//! ```text
//! key -> CatEditor::handle_key -> Binding write -> Store notify
//!     -> revision signal -> render effect -> layout -> DiffRenderer
//!                        -> Reporter
//! ```
//!
//! ## Key Design Principles
//!
//! - **Writes only in key handlers**: the render effect never writes state
//! - **Side Effects in Effect**: terminal I/O happens in the render effect
//! - **Reporting by subscription**: one report per settled store change

pub mod editor;
pub mod mount;
pub mod report;
pub mod terminal;

pub use editor::{CatEditor, EditorAction};
pub use mount::{MountHandle, mount, print_once, run, tick, unmount};
pub use report::{JsonLinesReporter, LogReporter, MemoryReporter, Reporter};
pub use terminal::{RenderMode, TerminalGuard, terminal_size};
