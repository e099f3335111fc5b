//! List Splitter - one stable binding per list element.
//!
//! Given a binding onto an `Rc<Vec<T>>` and a key function, a [`Splitter`]
//! hands out one [`Binding<S, T>`] per element. Each element gets an
//! [`ItemKey`] minted by the splitter the first time it is seen, and its
//! binding projects "the element with this id" rather than "the element at
//! this position". Inserting, removing or reordering elements never repoints
//! a binding at a different item, even when several elements share a key.
//!
//! # Reconciliation
//!
//! The splitter keeps an arena of `(id, element)` entries in list order.
//! [`Splitter::insert`], [`Splitter::remove`] and [`Splitter::move_item`]
//! edit the arena alongside the list. A list changed by anyone else is
//! matched against the arena when it is next read:
//!
//! - Same allocation (`Identity::same`): the element, wherever it moved
//! - Same key: an element rewritten in place, preferring its old position
//! - Anything else: a new id
//!
//! Reads against the list the arena last saw are a map lookup.
//!
//! [`Splitter::refresh`] then reconciles the handed-out bindings:
//!
//! - Existing ids: binding reused (same object, `ptr_eq` holds)
//! - New ids: binding created
//! - Removed ids: binding dropped

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use tracing::{debug, trace};

use super::binding::Binding;
use super::identity::Identity;
use super::optic::{ItemKey, KeyFn, Optic, Path, Segment};
use crate::error::BindingError;

/// Keys added and removed by one [`Splitter::refresh`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitChanges<K> {
    pub added: Vec<ItemKey<K>>,
    pub removed: Vec<ItemKey<K>>,
}

impl<K> SplitChanges<K> {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

// =============================================================================
// Arena
// =============================================================================

struct Entry<T, K> {
    id: ItemKey<K>,
    item: T,
    key: K,
}

/// Element ids in list order, and the list they describe.
struct Arena<T, K> {
    key_fn: KeyFn<T, K>,
    list: Option<Rc<Vec<T>>>,
    entries: Vec<Entry<T, K>>,
    positions: HashMap<ItemKey<K>, usize>,
    serials: HashMap<K, usize>,
}

impl<T, K> Arena<T, K>
where
    T: Clone + Identity,
    K: Clone + Eq + Hash,
{
    fn new(key_fn: KeyFn<T, K>) -> Self {
        Self {
            key_fn,
            list: None,
            entries: Vec::new(),
            positions: HashMap::new(),
            serials: HashMap::new(),
        }
    }

    fn ids(&self) -> Vec<ItemKey<K>> {
        self.entries.iter().map(|entry| entry.id.clone()).collect()
    }

    /// A fresh id. Serials per key only grow.
    fn mint(&mut self, item: T, key: K) -> Entry<T, K> {
        let serial = self.serials.entry(key.clone()).or_insert(0);
        let id = ItemKey::new(key.clone(), *serial);
        *serial += 1;
        Entry { id, item, key }
    }

    fn reindex(&mut self, list: Rc<Vec<T>>) {
        self.positions = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.id.clone(), index))
            .collect();
        self.list = Some(list);
    }

    fn position_in(&mut self, list: &Rc<Vec<T>>, id: &ItemKey<K>) -> Option<usize> {
        self.sync(list);
        self.positions.get(id).copied()
    }

    /// Match the entries against `list` unless it is the list they describe.
    fn sync(&mut self, list: &Rc<Vec<T>>) {
        if self.list.as_ref().is_some_and(|known| Rc::ptr_eq(known, list)) {
            return;
        }

        let mut old: Vec<Option<Entry<T, K>>> =
            std::mem::take(&mut self.entries).into_iter().map(Some).collect();
        let mut slots: Vec<Option<Entry<T, K>>> = (0..list.len()).map(|_| None).collect();

        // Same allocation, wherever it moved
        for (index, item) in list.iter().enumerate() {
            let same = |entry: &Option<Entry<T, K>>| entry.as_ref().is_some_and(|e| e.item.same(item));
            let found = if old.get(index).is_some_and(same) {
                Some(index)
            } else {
                old.iter().position(same)
            };
            slots[index] = found.and_then(|j| old[j].take());
        }

        let keys: Vec<Option<K>> = slots
            .iter()
            .zip(list.iter())
            .map(|(slot, item)| if slot.is_none() { Some((self.key_fn)(item)) } else { None })
            .collect();

        // Rewritten in place
        for (index, key) in keys.iter().enumerate() {
            let Some(key) = key else { continue };
            if old.get(index).is_some_and(|entry| entry.as_ref().is_some_and(|e| e.key == *key)) {
                slots[index] = old[index].take();
            }
        }

        // Rewritten and moved
        for (index, key) in keys.iter().enumerate() {
            let Some(key) = key else { continue };
            if slots[index].is_some() {
                continue;
            }
            if let Some(j) = old
                .iter()
                .position(|entry| entry.as_ref().is_some_and(|e| e.key == *key))
            {
                slots[index] = old[j].take();
            }
        }

        let mut entries = Vec::with_capacity(list.len());
        for ((slot, key), item) in slots.into_iter().zip(keys).zip(list.iter()) {
            let entry = match slot {
                Some(mut entry) => {
                    entry.item = item.clone();
                    if let Some(key) = key {
                        entry.key = key;
                    }
                    entry
                }
                None => {
                    let key = key.unwrap_or_else(|| (self.key_fn)(item));
                    self.mint(item.clone(), key)
                }
            };
            entries.push(entry);
        }

        trace!(
            len = entries.len(),
            dropped = old.iter().flatten().count(),
            "split arena resynced"
        );
        self.entries = entries;
        self.reindex(list.clone());
    }

    // Mutations below expect the arena to be synced with the list they edit.

    fn insert(&mut self, index: usize, item: T, list: Rc<Vec<T>>) -> ItemKey<K> {
        let key = (self.key_fn)(&item);
        let entry = self.mint(item, key);
        let id = entry.id.clone();
        self.entries.insert(index, entry);
        self.reindex(list);
        id
    }

    fn remove(&mut self, index: usize, list: Rc<Vec<T>>) {
        self.entries.remove(index);
        self.reindex(list);
    }

    fn move_entry(&mut self, from: usize, to: usize, list: Rc<Vec<T>>) {
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        self.reindex(list);
    }

    fn replace(&mut self, index: usize, item: T, list: Rc<Vec<T>>) {
        let key = (self.key_fn)(&item);
        if let Some(entry) = self.entries.get_mut(index) {
            entry.item = item;
            entry.key = key;
        }
        self.list = Some(list);
    }
}

/// The element the arena knows as `id`.
fn element<T, K>(arena: &Rc<RefCell<Arena<T, K>>>, id: ItemKey<K>) -> Optic<Rc<Vec<T>>, T>
where
    T: Clone + Identity + 'static,
    K: Clone + Eq + Hash + fmt::Display + 'static,
{
    let path: Path = Segment::Key(id.to_string()).into();
    let read = arena.clone();
    let write = arena.clone();
    let id_for_set = id.clone();

    Optic::new(
        path,
        move |list: &Rc<Vec<T>>| {
            let index = read.borrow_mut().position_in(list, &id)?;
            list.get(index).cloned()
        },
        move |list: &Rc<Vec<T>>, value: T| {
            let mut arena = write.borrow_mut();
            let index = arena.position_in(list, &id_for_set)?;
            let mut next: Vec<T> = (**list).clone();
            next[index] = value.clone();
            let next = Rc::new(next);
            arena.replace(index, value, next.clone());
            Some(next)
        },
    )
}

// =============================================================================
// Splitter
// =============================================================================

/// Splits a list binding into per-element bindings with stable ids.
pub struct Splitter<S, T, K> {
    source: Binding<S, Rc<Vec<T>>>,
    arena: Rc<RefCell<Arena<T, K>>>,
    items: RefCell<Vec<(ItemKey<K>, Binding<S, T>)>>,
}

impl<S, T, K> Splitter<S, T, K>
where
    S: Clone + Identity + 'static,
    T: Clone + Identity + 'static,
    K: Clone + Eq + Hash + fmt::Display + 'static,
{
    pub fn new(source: Binding<S, Rc<Vec<T>>>, key_fn: impl Fn(&T) -> K + 'static) -> Self {
        let splitter = Self {
            source,
            arena: Rc::new(RefCell::new(Arena::new(Rc::new(key_fn)))),
            items: RefCell::new(Vec::new()),
        };
        splitter.refresh();
        splitter
    }

    pub fn source(&self) -> &Binding<S, Rc<Vec<T>>> {
        &self.source
    }

    /// Ids of the current list, in order.
    fn current_ids(&self) -> Vec<ItemKey<K>> {
        let list = self.source.get().unwrap_or_default();
        let mut arena = self.arena.borrow_mut();
        arena.sync(&list);
        arena.ids()
    }

    fn current_list(&self) -> Result<Rc<Vec<T>>, BindingError> {
        self.source.get().ok_or_else(|| BindingError::Detached {
            path: self.source.path().clone(),
        })
    }

    /// Reconcile element bindings with the current list.
    pub fn refresh(&self) -> SplitChanges<K> {
        let ids = self.current_ids();
        let previous = std::mem::take(&mut *self.items.borrow_mut());

        let live: HashSet<&ItemKey<K>> = ids.iter().collect();
        let removed: Vec<ItemKey<K>> = previous
            .iter()
            .filter(|(id, _)| !live.contains(id))
            .map(|(id, _)| id.clone())
            .collect();

        let mut reusable: HashMap<ItemKey<K>, Binding<S, T>> = previous.into_iter().collect();
        let mut added = Vec::new();
        let mut next = Vec::with_capacity(ids.len());

        for id in ids {
            let binding = match reusable.remove(&id) {
                Some(binding) => binding,
                None => {
                    added.push(id.clone());
                    self.source.focus(&element(&self.arena, id.clone()))
                }
            };
            next.push((id, binding));
        }

        *self.items.borrow_mut() = next;

        let changes = SplitChanges { added, removed };
        if !changes.is_empty() {
            debug!(
                path = %self.source.path(),
                added = changes.added.len(),
                removed = changes.removed.len(),
                "list split reconciled"
            );
        }
        changes
    }

    /// Per-element bindings in list order.
    pub fn items(&self) -> Vec<(ItemKey<K>, Binding<S, T>)> {
        self.refresh();
        self.items.borrow().clone()
    }

    /// Binding for `key`, if that element is currently present.
    pub fn get(&self, key: &ItemKey<K>) -> Option<Binding<S, T>> {
        self.refresh();
        self.items
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, binding)| binding.clone())
    }

    pub fn len(&self) -> usize {
        self.source.get().map_or(0, |list| list.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert `item` at `index` (clamped to the list length).
    /// Returns the id minted for it.
    pub fn insert(&self, index: usize, item: T) -> Result<ItemKey<K>, BindingError> {
        let list = self.current_list()?;
        let (id, next) = {
            let mut arena = self.arena.borrow_mut();
            arena.sync(&list);
            let index = index.min(list.len());
            let mut next = (*list).clone();
            next.insert(index, item.clone());
            let next = Rc::new(next);
            (arena.insert(index, item, next.clone()), next)
        };
        self.source.set(next)?;
        Ok(id)
    }

    /// Remove the element identified by `key`. Returns the removed element.
    pub fn remove(&self, key: &ItemKey<K>) -> Result<Option<T>, BindingError> {
        let list = self.current_list()?;
        let (removed, next) = {
            let mut arena = self.arena.borrow_mut();
            let Some(index) = arena.position_in(&list, key) else {
                return Ok(None);
            };
            let mut next = (*list).clone();
            let removed = next.remove(index);
            let next = Rc::new(next);
            arena.remove(index, next.clone());
            (removed, next)
        };
        self.source.set(next)?;
        Ok(Some(removed))
    }

    /// Move the element at `from` to position `to` (clamped).
    pub fn move_item(&self, from: usize, to: usize) -> Result<(), BindingError> {
        let list = self.current_list()?;
        if from >= list.len() {
            return Ok(());
        }
        let next = {
            let mut arena = self.arena.borrow_mut();
            arena.sync(&list);
            let mut next = (*list).clone();
            let item = next.remove(from);
            let to = to.min(next.len());
            next.insert(to, item);
            let next = Rc::new(next);
            arena.move_entry(from, to, next.clone());
            next
        };
        self.source.set(next)
    }
}

// =============================================================================
// TESTS
// =============================================================================
