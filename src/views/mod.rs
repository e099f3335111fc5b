//! Views - Presentation components over bindings.
//!
//! Each view owns the binding it reads and a [`Memo`] keyed on the identity
//! of that binding's slice. Rendering a view whose slice did not change
//! returns the previous node without running the view body, so editing one
//! part never re-renders its siblings, and editing `info` never re-renders
//! the owner or the parts.
//!
//! - [`OwnerView`] - read-only owner name
//! - [`InfoView`] - cat name and editable weight
//! - [`PartsView`] / [`PartView`] / [`AttributeView`] - body parts and their
//!   injury switches

mod info;
mod owner;
mod parts;

use std::cell::{Cell, RefCell};

use crate::primitives::Node;
use crate::store::Identity;

pub use info::InfoView;
pub use owner::{OwnerView, display_name};
pub use parts::{AttributeView, PartView, PartsView};

/// Render cache keyed on slice identity.
pub struct Memo<A> {
    last: RefCell<Option<(A, Node)>>,
    renders: Cell<usize>,
}

impl<A: Identity + Clone> Default for Memo<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Identity + Clone> Memo<A> {
    pub fn new() -> Self {
        Self {
            last: RefCell::new(None),
            renders: Cell::new(0),
        }
    }

    /// Return the cached node if `value` is the value it was built from,
    /// otherwise run `build` and cache its result.
    pub fn render(&self, value: &A, build: impl FnOnce(&A) -> Node) -> Node {
        if let Some((last, node)) = self.last.borrow().as_ref() {
            if last.same(value) {
                return node.clone();
            }
        }

        let node = build(value);
        self.renders.set(self.renders.get() + 1);
        *self.last.borrow_mut() = Some((value.clone(), node.clone()));
        node
    }

    /// How many times the view body actually ran.
    pub fn render_count(&self) -> usize {
        self.renders.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::text;
    use std::rc::Rc;

    #[test]
    fn test_memo_skips_same_value() {
        let memo: Memo<Rc<String>> = Memo::new();
        let value = Rc::new("a".to_string());

        memo.render(&value, |v| text(v.as_str()));
        memo.render(&value, |_| unreachable!());
        assert_eq!(memo.render_count(), 1);

        memo.render(&Rc::new("a".to_string()), |v| text(v.as_str()));
        assert_eq!(memo.render_count(), 2);
    }
}
