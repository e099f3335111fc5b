//! Identity - the sameness test that scopes change notification.
//!
//! Interior nodes of the record live behind `Rc`, so "unchanged" means
//! "same allocation". Leaves compare by value.

use std::rc::Rc;

/// Decide whether two snapshots of a slice are the same for notification
/// purposes.
pub trait Identity {
    fn same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identity for Rc<T> {
    fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl Identity for String {
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

impl Identity for bool {
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

impl Identity for usize {
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T: Identity> Identity for Option<T> {
    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same(b),
            (None, None) => true,
            _ => false,
        }
    }
}
