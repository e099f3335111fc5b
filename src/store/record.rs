//! Record Store - one shared value, replaced wholesale.
//!
//! The store never mutates its value in place. Writers hand it a new value
//! (usually built by structural update through an [`Optic`](super::Optic));
//! if that value is not [`Identity::same`] as the current one it is accepted
//! and every subscriber is notified.
//!
//! # Notification
//!
//! Notification is synchronous and runs after the value is replaced. A write
//! made by a subscriber during a round is applied at once but its round is
//! deferred; all writes made during one round are coalesced into a single
//! follow-up round, so the last round a subscriber sees always carries the
//! settled value.
//!
//! # Example
//!
//! ```ignore
//! use makeshift_vet::store::Store;
//! use std::rc::Rc;
//!
//! let store = Store::new(Rc::new(1));
//! let _sub = store.subscribe(|value| println!("now {value}"));
//! store.update(|v| Rc::new(**v + 1));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use tracing::trace;

use super::identity::Identity;

// =============================================================================
// Subscription
// =============================================================================

/// Cleanup function run when a subscription ends.
pub type Cleanup = Box<dyn FnOnce()>;

/// Handle for a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cleanup: Option<Cleanup>,
}

impl Subscription {
    pub(crate) fn new(cleanup: Cleanup) -> Self {
        Self { cleanup: Some(cleanup) }
    }

    /// Unsubscribe now.
    pub fn cancel(mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cleanup.is_some())
            .finish()
    }
}

// =============================================================================
// Store
// =============================================================================

type Listener<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: RefCell<T>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
    next_listener: Cell<u64>,
    revision: Cell<u64>,
    notifying: Cell<bool>,
    pending: Cell<bool>,
}

/// Holds exactly one value and notifies subscribers when it is replaced.
///
/// Cloning a `Store` yields another handle to the same value.
pub struct Store<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Identity + 'static> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
                revision: Cell::new(0),
                notifying: Cell::new(false),
                pending: Cell::new(false),
            }),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current value without cloning it.
    ///
    /// `f` must not write to this store.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Number of accepted changes since creation.
    pub fn revision(&self) -> u64 {
        self.inner.revision.get()
    }

    /// Replace the value. Returns false if `value` is the current value.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.borrow_mut();
            if current.same(&value) {
                trace!("store write skipped, value unchanged");
                return false;
            }
            *current = value;
        }
        let revision = self.inner.revision.get() + 1;
        self.inner.revision.set(revision);
        trace!(revision, "store value replaced");

        if self.inner.notifying.get() {
            self.inner.pending.set(true);
        } else {
            self.notify();
        }
        true
    }

    /// Replace the value with a function of the previous one.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> bool {
        let next = f(&self.get());
        self.set(next)
    }

    /// Register `listener`; it runs after every settled change.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        Subscription::new(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.borrow_mut().retain(|(other, _)| *other != id);
            }
        }))
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn is_subscribed(&self, id: u64) -> bool {
        self.inner.listeners.borrow().iter().any(|(other, _)| *other == id)
    }

    fn notify(&self) {
        let _round = NotifyGuard::enter(&self.inner.notifying, &self.inner.pending);
        loop {
            self.inner.pending.set(false);
            let value = self.get();
            // Snapshot so listeners can subscribe/unsubscribe while we iterate
            let listeners: Vec<(u64, Listener<T>)> = self
                .inner
                .listeners
                .borrow()
                .iter()
                .map(|(id, listener)| (*id, listener.clone()))
                .collect();
            for (id, listener) in &listeners {
                // Unsubscribed earlier in this round
                if !self.is_subscribed(*id) {
                    continue;
                }
                listener(&value);
            }
            if !self.inner.pending.get() {
                break;
            }
        }
    }
}

/// Marks a notification round; clears the flags when the round ends,
/// including when a listener panics.
struct NotifyGuard<'a> {
    notifying: &'a Cell<bool>,
    pending: &'a Cell<bool>,
}

impl<'a> NotifyGuard<'a> {
    fn enter(notifying: &'a Cell<bool>, pending: &'a Cell<bool>) -> Self {
        notifying.set(true);
        Self { notifying, pending }
    }
}

impl Drop for NotifyGuard<'_> {
    fn drop(&mut self) {
        self.notifying.set(false);
        self.pending.set(false);
    }
}

// =============================================================================
// TESTS
// =============================================================================
