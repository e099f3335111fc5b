//! Cat Editor - the root composition.
//!
//! Owns the record store, the three top-level bindings and their views, the
//! focus ring and the active edit session. Keys come in through
//! [`CatEditor::handle_key`]; frames go out through [`CatEditor::render`].
//!
//! # Reactive State
//!
//! ```text
//! Store<CatRef> --subscribe--> revision: Signal<u64> --+
//!               --subscribe--> Reporter                 |
//! FocusRing.focused: Signal<i32> -----------------------+--> render effect
//! session: Signal<Option<EditSession>> -----------------+
//! ```
//!
//! The render effect (see [`super::mount`]) reads those three signals, so
//! any write, focus move or keystroke in a draft redraws the screen.
//!
//! # Example
//!
//! ```ignore
//! use makeshift_vet::model::default_cat;
//! use makeshift_vet::pipeline::{CatEditor, MemoryReporter};
//!
//! let reporter = MemoryReporter::new();
//! let editor = CatEditor::new(default_cat(), reporter.clone());
//! editor.handle_key(&KeyboardEvent::new("Tab"));
//! ```

use std::rc::Rc;

use spark_signals::{Signal, signal};
use tracing::{debug, warn};

use super::report::Reporter;
use crate::model::optics::{self, CatRef};
use crate::primitives::{
    EditSession, EditableProps, Focusable, Node, WidgetId, column, commit_on_blur, heading,
    is_activation_key, toggle,
};
use crate::renderer::Frame;
use crate::state::{FocusChange, FocusRing, GlobalAction, KeyboardEvent, global_action};
use crate::store::{Binding, Store, Subscription};
use crate::views::{InfoView, OwnerView, PartsView};

/// What the event loop should do after a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorAction {
    Continue,
    Quit,
}

pub struct CatEditor {
    store: Store<CatRef>,
    owner: OwnerView,
    info: InfoView,
    parts: PartsView,
    focus: FocusRing,
    session: Signal<Option<EditSession>>,
    revision: Signal<u64>,
    reporter: Rc<dyn Reporter>,
    _subscriptions: Vec<Subscription>,
}

impl CatEditor {
    pub fn new(cat: CatRef, reporter: impl Reporter + 'static) -> Self {
        let store = Store::new(cat);
        let root = Binding::root(&store);
        let reporter: Rc<dyn Reporter> = Rc::new(reporter);

        let revision = signal(0u64);
        let bump = revision.clone();
        let redraw = store.subscribe(move |_| {
            bump.set(bump.get() + 1);
        });

        let sink = reporter.clone();
        let report = store.subscribe(move |cat| {
            if let Err(err) = sink.report(cat) {
                warn!(%err, "report failed");
            }
        });

        let editor = Self {
            owner: OwnerView::new(root.focus(&optics::owner())),
            info: InfoView::new(root.focus(&optics::info())),
            parts: PartsView::new(root.focus(&optics::parts())),
            store,
            focus: FocusRing::new(),
            session: signal(None),
            revision,
            reporter,
            _subscriptions: vec![redraw, report],
        };

        editor.sync_focus();
        editor.focus.focus_first();
        editor.begin_session();
        editor
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn store(&self) -> &Store<CatRef> {
        &self.store
    }

    /// Current record.
    pub fn cat(&self) -> CatRef {
        self.store.get()
    }

    pub fn owner_view(&self) -> &OwnerView {
        &self.owner
    }

    pub fn info_view(&self) -> &InfoView {
        &self.info
    }

    pub fn parts_view(&self) -> &PartsView {
        &self.parts
    }

    pub fn focus(&self) -> &FocusRing {
        &self.focus
    }

    pub fn focused_id(&self) -> Option<WidgetId> {
        self.focus.focused_id()
    }

    /// Current draft, if an editable has focus.
    pub fn session(&self) -> Option<EditSession> {
        self.session.get()
    }

    pub fn session_signal(&self) -> Signal<Option<EditSession>> {
        self.session.clone()
    }

    /// Bumped once per settled store change.
    pub fn revision_signal(&self) -> Signal<u64> {
        self.revision.clone()
    }

    /// Hand the current record to the reporter.
    pub fn report_current(&self) {
        if let Err(err) = self.reporter.report(&self.store.get()) {
            warn!(%err, "report failed");
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// The whole view tree.
    pub fn tree(&self) -> Node {
        column(vec![
            heading(1, "Welcome to Makeshift Vet!"),
            heading(2, "Start editing to manage the cat injuries!"),
            self.owner.render(),
            self.info.render(),
            self.parts.render(),
        ])
    }

    /// Build a frame. Reads the focus and session signals.
    pub fn render(&self) -> Frame {
        Frame {
            root: self.tree(),
            focused: self.focus.focused_id(),
            session: self.session.get(),
        }
    }

    /// Refresh the focus order from the current tree.
    pub fn sync_focus(&self) {
        let ids = self
            .tree()
            .focusables()
            .iter()
            .map(|focusable| focusable.id().clone())
            .collect();
        self.focus.set_order(ids);
    }

    fn focusable(&self, id: &WidgetId) -> Option<Focusable> {
        self.tree()
            .focusables()
            .into_iter()
            .find(|focusable| focusable.id() == id)
    }

    fn editable(&self, id: &WidgetId) -> Option<EditableProps> {
        match self.focusable(id)? {
            Focusable::Editable(props) => Some(props),
            Focusable::Switch(_) => None,
        }
    }

    // -------------------------------------------------------------------------
    // Focus & Sessions
    // -------------------------------------------------------------------------

    /// Start a draft for the focused widget if it is an editable; clear it
    /// otherwise.
    fn begin_session(&self) {
        let next = self
            .focus
            .focused_id()
            .and_then(|id| self.editable(&id))
            .map(|props| EditSession::begin(props.id, &props.value));
        self.session.set(next);
    }

    /// Blur handling for the active draft. Returns whether it wrote.
    fn commit_session(&self) -> bool {
        let Some(session) = self.session.get() else {
            return false;
        };
        let wrote = match self.editable(&session.id) {
            Some(props) => commit_on_blur(&props, &session.buffer.text()),
            None => false,
        };
        self.session.set(None);
        if wrote {
            self.sync_focus();
        }
        wrote
    }

    fn move_focus(&self, step: impl FnOnce(&FocusRing) -> Option<FocusChange>) {
        self.commit_session();
        if let Some(change) = step(&self.focus) {
            debug!(from = ?change.from, to = ?change.to, "focus changed");
        }
        self.begin_session();
    }

    pub fn focus_next(&self) {
        self.move_focus(FocusRing::focus_next);
    }

    pub fn focus_previous(&self) {
        self.move_focus(FocusRing::focus_previous);
    }

    /// Focus a specific widget, committing the current draft first.
    pub fn focus_widget(&self, id: &WidgetId) {
        self.move_focus(|ring| ring.focus(id));
    }

    /// Blur everything, committing the current draft.
    pub fn blur(&self) {
        self.move_focus(FocusRing::blur);
    }

    // -------------------------------------------------------------------------
    // Keys
    // -------------------------------------------------------------------------

    pub fn handle_key(&self, event: &KeyboardEvent) -> EditorAction {
        if !event.is_press() {
            return EditorAction::Continue;
        }

        match global_action(event) {
            Some(GlobalAction::Quit) => {
                self.commit_session();
                return EditorAction::Quit;
            }
            Some(GlobalAction::FocusNext) => {
                self.focus_next();
                return EditorAction::Continue;
            }
            Some(GlobalAction::FocusPrevious) => {
                self.focus_previous();
                return EditorAction::Continue;
            }
            None => {}
        }

        if let Some(session) = self.session.get() {
            self.edit(session, event);
            return EditorAction::Continue;
        }

        let focused = self.focus.focused_id().and_then(|id| self.focusable(&id));
        match focused {
            Some(Focusable::Switch(props)) if is_activation_key(&event.key) => {
                toggle(&props);
                self.sync_focus();
                EditorAction::Continue
            }
            _ if event.key == "q" || event.key == "Escape" => EditorAction::Quit,
            _ => EditorAction::Continue,
        }
    }

    fn edit(&self, mut session: EditSession, event: &KeyboardEvent) {
        match event.key.as_str() {
            "Enter" => {
                self.commit_session();
                self.begin_session();
            }
            "Escape" => {
                debug!(id = %session.id, "draft discarded");
                self.begin_session();
            }
            _ => {
                if session.buffer.apply_key(event) {
                    self.session.set(Some(session));
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
