//! Bindings - live read/write views onto a slice of a [`Store`].
//!
//! A [`Binding<S, A>`] pairs a store of `S` with an [`Optic<S, A>`]. Reading
//! walks the optic; writing rebuilds the root by structural update and hands
//! it to the store. Narrower bindings are derived with [`Binding::focus`].
//!
//! [`Binding::subscribe`] is scoped to the projected slice: the listener runs
//! only when the slice stops being [`Identity::same`] as what it last saw, so
//! an edit to `info` never wakes a listener on `parts`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use super::identity::Identity;
use super::optic::{Optic, Path};
use super::record::{Store, Subscription};
use crate::error::BindingError;

struct Inner<S, A> {
    store: Store<S>,
    optic: Optic<S, A>,
}

/// A live projection of a store.
///
/// Cloning shares the binding; [`Binding::ptr_eq`] tells two handles to the
/// same binding apart from two equal projections.
pub struct Binding<S, A> {
    inner: Rc<Inner<S, A>>,
}

impl<S, A> Clone for Binding<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S, A> fmt::Debug for Binding<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("path", self.inner.optic.path())
            .finish()
    }
}

impl<S: Clone + Identity + 'static> Binding<S, S> {
    /// Binding onto the whole stored value.
    pub fn root(store: &Store<S>) -> Self {
        Self::new(store, Optic::identity())
    }
}

impl<S, A> Binding<S, A>
where
    S: Clone + Identity + 'static,
    A: Clone + 'static,
{
    pub fn new(store: &Store<S>, optic: Optic<S, A>) -> Self {
        Self {
            inner: Rc::new(Inner {
                store: store.clone(),
                optic,
            }),
        }
    }

    pub fn store(&self) -> &Store<S> {
        &self.inner.store
    }

    pub fn path(&self) -> &Path {
        self.inner.optic.path()
    }

    pub fn is_writable(&self) -> bool {
        self.inner.optic.is_writable()
    }

    /// Same binding object (not merely the same path).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Current value of the slice, `None` if the path no longer resolves.
    pub fn get(&self) -> Option<A> {
        self.inner.store.with(|root| self.inner.optic.get(root))
    }

    /// Replace the slice. Only the path from the root to the slice is copied.
    pub fn set(&self, value: A) -> Result<(), BindingError> {
        if !self.is_writable() {
            return Err(BindingError::ReadOnly {
                path: self.path().clone(),
            });
        }
        let root = self.inner.store.get();
        let next = self
            .inner
            .optic
            .set(&root, value)
            .ok_or_else(|| BindingError::Detached {
                path: self.path().clone(),
            })?;

        debug!(path = %self.path(), "binding write");
        self.inner.store.set(next);
        Ok(())
    }

    /// Replace the slice with a function of its current value.
    pub fn update(&self, f: impl FnOnce(&A) -> A) -> Result<(), BindingError> {
        let current = self.get().ok_or_else(|| BindingError::Detached {
            path: self.path().clone(),
        })?;
        self.set(f(&current))
    }

    /// Derive a narrower binding on the same store.
    pub fn focus<B: Clone + 'static>(&self, optic: &Optic<A, B>) -> Binding<S, B> {
        Binding::new(&self.inner.store, self.inner.optic.then(optic))
    }
}

impl<S, A> Binding<S, A>
where
    S: Clone + Identity + 'static,
    A: Clone + Identity + 'static,
{
    /// Run `listener` whenever the projected slice changes identity.
    ///
    /// A slice that stops resolving is remembered as gone but not reported.
    pub fn subscribe(&self, listener: impl Fn(&A) + 'static) -> Subscription {
        let optic = self.inner.optic.clone();
        let last: RefCell<Option<A>> = RefCell::new(self.get());

        self.inner.store.subscribe(move |root| {
            let next = optic.get(root);
            if last.borrow().same(&next) {
                return;
            }
            *last.borrow_mut() = next.clone();
            if let Some(value) = next {
                listener(&value);
            }
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Clone, Debug)]
    struct Doc {
        title: Rc<String>,
        tags: Rc<Vec<Rc<String>>>,
    }

    fn title() -> Optic<Rc<Doc>, Rc<String>> {
        Optic::field(
            "title",
            |d: &Rc<Doc>| d.title.clone(),
            |d, title| Rc::new(Doc { title, ..(**d).clone() }),
        )
    }

    fn tags() -> Optic<Rc<Doc>, Rc<Vec<Rc<String>>>> {
        Optic::field(
            "tags",
            |d: &Rc<Doc>| d.tags.clone(),
            |d, tags| Rc::new(Doc { tags, ..(**d).clone() }),
        )
    }

    fn store() -> Store<Rc<Doc>> {
        Store::new(Rc::new(Doc {
            title: Rc::new("draft".into()),
            tags: Rc::new(vec![Rc::new("a".into()), Rc::new("b".into())]),
        }))
    }

    #[test]
    fn test_get_and_set_through_binding() {
        let store = store();
        let title = Binding::new(&store, title());
        assert_eq!(*title.get().unwrap(), "draft");

        let tags_before = store.get().tags.clone();
        title.set(Rc::new("final".into())).unwrap();

        assert_eq!(*store.get().title, "final");
        assert!(Rc::ptr_eq(&store.get().tags, &tags_before));
    }

    #[test]
    fn test_focus_index_write() {
        let store = store();
        let second = Binding::new(&store, tags()).focus(&Optic::index(1));
        assert_eq!(second.path().to_string(), "tags[1]");

        second.update(|t| Rc::new(format!("{t}!"))).unwrap();
        assert_eq!(*store.get().tags[1], "b!");
    }

    #[test]
    fn test_detached_write_errors() {
        let store = store();
        let missing = Binding::new(&store, tags()).focus(&Optic::index(5));
        assert!(missing.get().is_none());

        let err = missing.set(Rc::new("x".into())).unwrap_err();
        assert_eq!(
            err,
            BindingError::Detached {
                path: missing.path().clone()
            }
        );
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_read_only_write_errors() {
        let store = store();
        let selected = Binding::new(&store, Optic::select("title", |d: &Rc<Doc>| d.title.clone()));
        assert!(matches!(
            selected.set(Rc::new("x".into())),
            Err(BindingError::ReadOnly { .. })
        ));
    }

    #[test]
    fn test_subscribe_is_scoped_to_slice() {
        let store = store();
        let title = Binding::new(&store, title());
        let tags = Binding::new(&store, tags());

        let title_calls = Rc::new(Cell::new(0));
        let title_calls_clone = title_calls.clone();
        let _sub = title.subscribe(move |_| title_calls_clone.set(title_calls_clone.get() + 1));

        tags.focus(&Optic::index(0)).set(Rc::new("z".into())).unwrap();
        assert_eq!(title_calls.get(), 0);

        title.set(Rc::new("new".into())).unwrap();
        assert_eq!(title_calls.get(), 1);
    }

    #[test]
    fn test_root_binding() {
        let store = store();
        let root = Binding::root(&store);
        assert!(root.path().is_root());
        assert!(Rc::ptr_eq(&root.get().unwrap(), &store.get()));
    }

    #[test]
    fn test_debug_shows_path() {
        let store = store();
        let second = Binding::new(&store, tags()).focus(&Optic::index(1));
        assert_eq!(format!("{second:?}"), "Binding { path: Path([Field(\"tags\"), Index(1)]) }");
    }
}
