//! Optics - get/set pairs that project into a nested value.
//!
//! An [`Optic<S, A>`] reads an `A` out of an `S` and, on write, rebuilds the
//! `S` around a new `A`. Setters copy only the nodes on the path; every
//! sibling is carried over by `Rc` so it keeps its identity.
//!
//! Three kinds of step exist:
//!
//! - [`Optic::field`] - a named property, always present
//! - [`Optic::index`] - position in an `Rc<Vec<T>>`, follows position on reorder
//! - [`Optic::keyed`] - the first element with a given key, follows the element
//!
//! Steps compose with [`Optic::then`]. Reads are O(depth); writes allocate
//! one node per step (a list step clones its pointer vector once).

use std::fmt;
use std::rc::Rc;

// =============================================================================
// Path
// =============================================================================

/// One step of an optic's path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    Field(&'static str),
    Index(usize),
    Key(String),
}

/// Printable location of an optic inside the root value,
/// e.g. `parts{leg#0}.attributes[1]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Segment>);

impl Path {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn join(&self, other: &Path) -> Path {
        let mut segments = self.0.clone();
        segments.extend(other.0.iter().cloned());
        Path(segments)
    }

    pub fn child(&self, segment: Segment) -> Path {
        let mut segments = self.0.clone();
        segments.push(segment);
        Path(segments)
    }
}

impl From<Segment> for Path {
    fn from(segment: Segment) -> Self {
        Path(vec![segment])
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("$");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => write!(f, "{name}")?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::Key(key) => write!(f, "{{{key}}}")?,
            }
        }
        Ok(())
    }
}

// =============================================================================
// Item keys
// =============================================================================

/// Stable identity of a list element: the key it had when first seen plus a
/// serial number among elements that were ever given that key.
///
/// Serials are handed out by a [`Splitter`](super::Splitter) and never
/// reused, so two elements sharing a key stay apart through inserts and
/// moves.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemKey<K> {
    pub key: K,
    pub serial: usize,
}

impl<K> ItemKey<K> {
    pub fn new(key: K, serial: usize) -> Self {
        Self { key, serial }
    }
}

impl<K: fmt::Display> fmt::Display for ItemKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.key, self.serial)
    }
}

/// Key extraction function shared between a splitter and its optics.
pub type KeyFn<T, K> = Rc<dyn Fn(&T) -> K>;

/// Position of the first element whose key equals `key`.
pub fn position_of<T, K: PartialEq>(list: &[T], key_fn: &KeyFn<T, K>, key: &K) -> Option<usize> {
    list.iter().position(|item| key_fn(item) == *key)
}

// =============================================================================
// Optic
// =============================================================================

type Getter<S, A> = Rc<dyn Fn(&S) -> Option<A>>;
type Setter<S, A> = Rc<dyn Fn(&S, A) -> Option<S>>;

/// A composable projection from `S` to `A`.
pub struct Optic<S, A> {
    path: Path,
    writable: bool,
    getter: Getter<S, A>,
    setter: Setter<S, A>,
}

impl<S, A> Clone for Optic<S, A> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            writable: self.writable,
            getter: self.getter.clone(),
            setter: self.setter.clone(),
        }
    }
}

impl<S, A> fmt::Debug for Optic<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Optic")
            .field("path", &self.path)
            .field("writable", &self.writable)
            .finish()
    }
}

impl<S, A> Optic<S, A> {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }
}

impl<S: 'static, A: 'static> Optic<S, A> {
    /// Build an optic from raw partial get/set functions.
    pub fn new(
        path: Path,
        get: impl Fn(&S) -> Option<A> + 'static,
        set: impl Fn(&S, A) -> Option<S> + 'static,
    ) -> Self {
        Self {
            path,
            writable: true,
            getter: Rc::new(get),
            setter: Rc::new(set),
        }
    }

    /// A property that is always present.
    pub fn field(
        name: &'static str,
        get: impl Fn(&S) -> A + 'static,
        set: impl Fn(&S, A) -> S + 'static,
    ) -> Self {
        Self::new(
            Segment::Field(name).into(),
            move |s| Some(get(s)),
            move |s, a| Some(set(s, a)),
        )
    }

    /// A read-only selector. Writes through it fail with `ReadOnly`.
    pub fn select(name: &'static str, get: impl Fn(&S) -> A + 'static) -> Self {
        Self {
            path: Segment::Field(name).into(),
            writable: false,
            getter: Rc::new(move |s: &S| Some(get(s))),
            setter: Rc::new(|_: &S, _: A| -> Option<S> { None }),
        }
    }

    pub fn get(&self, source: &S) -> Option<A> {
        (self.getter)(source)
    }

    /// Rebuild `source` with the focused part replaced by `value`.
    /// `None` if the path does not resolve or the optic is read-only.
    pub fn set(&self, source: &S, value: A) -> Option<S> {
        if !self.writable {
            return None;
        }
        (self.setter)(source, value)
    }

    /// Compose: focus `inner` inside whatever this optic focuses.
    pub fn then<B: 'static>(&self, inner: &Optic<A, B>) -> Optic<S, B> {
        let outer_get = self.getter.clone();
        let outer_get_for_set = self.getter.clone();
        let outer_set = self.setter.clone();
        let inner_get = inner.getter.clone();
        let inner_set = inner.setter.clone();

        Optic {
            path: self.path.join(&inner.path),
            writable: self.writable && inner.writable,
            getter: Rc::new(move |s: &S| outer_get(s).and_then(|a| inner_get(&a))),
            setter: Rc::new(move |s: &S, b: B| {
                let a = outer_get_for_set(s)?;
                let next = inner_set(&a, b)?;
                outer_set(s, next)
            }),
        }
    }
}

impl<S: Clone + 'static> Optic<S, S> {
    /// The whole value.
    pub fn identity() -> Self {
        Self::new(Path::root(), |s: &S| Some(s.clone()), |_, s| Some(s))
    }
}

impl<T: Clone + 'static> Optic<Rc<Vec<T>>, T> {
    /// The element at `index`. Follows position, not identity.
    pub fn index(index: usize) -> Self {
        Self::new(
            Segment::Index(index).into(),
            move |list: &Rc<Vec<T>>| list.get(index).cloned(),
            move |list, value| {
                if index >= list.len() {
                    return None;
                }
                let mut next: Vec<T> = (**list).clone();
                next[index] = value;
                Some(Rc::new(next))
            },
        )
    }

    /// The first element whose key is `key`, wherever it currently sits.
    ///
    /// Scans the list on every access. Lists with duplicate keys want a
    /// [`Splitter`](super::Splitter), which tracks each element by identity.
    pub fn keyed<K>(key: K, key_fn: KeyFn<T, K>) -> Self
    where
        K: PartialEq + fmt::Display + 'static,
    {
        let path: Path = Segment::Key(key.to_string()).into();
        let key = Rc::new(key);
        let key_for_set = key.clone();
        let key_fn_for_set = key_fn.clone();

        Self::new(
            path,
            move |list: &Rc<Vec<T>>| {
                position_of(list.as_slice(), &key_fn, &*key).map(|index| list[index].clone())
            },
            move |list, value| {
                let index = position_of(list.as_slice(), &key_fn_for_set, &*key_for_set)?;
                let mut next: Vec<T> = (**list).clone();
                next[index] = value;
                Some(Rc::new(next))
            },
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Pair {
        left: Rc<String>,
        right: Rc<Vec<Rc<String>>>,
    }

    fn left() -> Optic<Rc<Pair>, Rc<String>> {
        Optic::field(
            "left",
            |p: &Rc<Pair>| p.left.clone(),
            |p, left| Rc::new(Pair { left, ..(**p).clone() }),
        )
    }

    fn right() -> Optic<Rc<Pair>, Rc<Vec<Rc<String>>>> {
        Optic::field(
            "right",
            |p: &Rc<Pair>| p.right.clone(),
            |p, right| Rc::new(Pair { right, ..(**p).clone() }),
        )
    }

    fn sample() -> Rc<Pair> {
        Rc::new(Pair {
            left: Rc::new("l".into()),
            right: Rc::new(vec![Rc::new("a".into()), Rc::new("b".into())]),
        })
    }

    #[test]
    fn test_field_write_shares_siblings() {
        let pair = sample();
        let next = left().set(&pair, Rc::new("L".into())).unwrap();

        assert_eq!(*next.left, "L");
        assert!(Rc::ptr_eq(&pair.right, &next.right));
        assert!(!Rc::ptr_eq(&pair, &next));
    }

    #[test]
    fn test_composed_index_write() {
        let pair = sample();
        let second = right().then(&Optic::index(1));
        assert_eq!(second.path().to_string(), "right[1]");

        let next = second.set(&pair, Rc::new("B".into())).unwrap();
        assert_eq!(*next.right[1], "B");
        assert!(Rc::ptr_eq(&pair.right[0], &next.right[0]));
        assert!(Rc::ptr_eq(&pair.left, &next.left));
    }

    #[test]
    fn test_index_past_end() {
        let pair = sample();
        let third = right().then(&Optic::index(2));
        assert!(third.get(&pair).is_none());
        assert!(third.set(&pair, Rc::new("c".into())).is_none());
    }

    #[test]
    fn test_keyed_follows_element() {
        let key_fn: KeyFn<Rc<String>, String> = Rc::new(|s: &Rc<String>| s.to_string());
        let b = Optic::keyed("b".to_string(), key_fn);
        assert_eq!(b.path().to_string(), "{b}");

        let list = Rc::new(vec![Rc::new("a".to_string()), Rc::new("b".to_string())]);
        let reordered = Rc::new(vec![list[1].clone(), list[0].clone()]);

        assert!(Rc::ptr_eq(&b.get(&list).unwrap(), &list[1]));
        assert!(Rc::ptr_eq(&b.get(&reordered).unwrap(), &list[1]));
    }

    #[test]
    fn test_keyed_takes_first_match() {
        let key_fn: KeyFn<Rc<String>, String> = Rc::new(|s: &Rc<String>| s.to_string());
        let list = Rc::new(vec![
            Rc::new("y".to_string()),
            Rc::new("x".to_string()),
            Rc::new("x".to_string()),
        ]);
        assert_eq!(position_of(list.as_slice(), &key_fn, &"x".to_string()), Some(1));
        assert_eq!(position_of(list.as_slice(), &key_fn, &"z".to_string()), None);
    }

    #[test]
    fn test_path_readable_without_static_bounds() {
        fn describe<S, A>(optic: &Optic<S, A>) -> String {
            format!("{} writable={}", optic.path(), optic.is_writable())
        }
        assert_eq!(describe(&right().then(&Optic::index(0))), "right[0] writable=true");
    }

    #[test]
    fn test_select_is_read_only() {
        let pair = sample();
        let sel = Optic::select("left", |p: &Rc<Pair>| p.left.clone());
        assert_eq!(*sel.get(&pair).unwrap(), "l");
        assert!(sel.set(&pair, Rc::new("x".into())).is_none());
        assert!(!sel.then(&Optic::identity()).is_writable());
    }

    #[test]
    fn test_path_display() {
        let path = Path::from(Segment::Field("parts"))
            .child(Segment::Key("leg#0".into()))
            .child(Segment::Field("attributes"))
            .child(Segment::Index(1));
        assert_eq!(path.to_string(), "parts{leg#0}.attributes[1]");
        assert_eq!(Path::root().to_string(), "$");
    }
}
