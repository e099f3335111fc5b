//! # makeshift-vet
//!
//! Terminal form editor for a cat's injury record.
//!
//! The record lives in one [`Store`]. Views read and write it through
//! [`Binding`]s, each a store plus an [`Optic`] that projects a slice of the
//! record. Writes rebuild only the path from the root down to the slice, so
//! every untouched sibling keeps its identity and its view is not re-rendered.
//!
//! ## Architecture
//!
//! ```text
//! Store<Rc<Cat>> -> Binding (owner | info | parts) -> Splitter -> views
//!                -> CatEditor -> Frame -> layout -> DiffRenderer
//! ```
//!
//! ## Modules
//!
//! - [`store`] - record store, optics, bindings, list splitter
//! - [`model`] - the cat record, its optics and seeds
//! - [`views`] - owner, info and parts views
//! - [`primitives`] - view tree nodes, editable text and switch widgets
//! - [`state`] - keyboard events, focus ring, terminal input
//! - [`renderer`] - layout and differential terminal output
//! - [`pipeline`] - editor, reporting, mount and event loop

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod store;
pub mod types;
pub mod views;

// Re-export commonly used items
pub use types::*;

pub use error::{BindingError, LoggingError, ReportError, SeedError};

pub use store::{
    Binding, Identity, ItemKey, Optic, Path, Segment, SplitChanges, Splitter, Store,
    Subscription,
};

pub use model::{Attribute, Cat, Info, Owner, Part, default_cat, from_json, load_seed};

pub use pipeline::{
    CatEditor, EditorAction, JsonLinesReporter, LogReporter, MemoryReporter, MountHandle,
    RenderMode, Reporter, mount, print_once, run,
};

pub use renderer::{DiffRenderer, Frame, Screen, layout, render_plain};

pub use state::{FocusChange, FocusRing, KeyState, KeyboardEvent, Modifiers};
