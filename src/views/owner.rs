//! Owner view.

use std::rc::Rc;

use super::Memo;
use crate::model::Owner;
use crate::model::optics::CatRef;
use crate::primitives::{Node, column, heading, text};
use crate::store::Binding;

/// `"<first> <last>"`. A missing owner renders as the literal
/// `undefined undefined`; the record is never checked for it.
pub fn display_name(owner: Option<&Owner>) -> String {
    match owner {
        Some(owner) => [owner.first_name.as_str(), owner.last_name.as_str()].join(" "),
        None => "undefined undefined".to_string(),
    }
}

pub struct OwnerView {
    binding: Binding<CatRef, Rc<Owner>>,
    memo: Memo<Option<Rc<Owner>>>,
}

impl OwnerView {
    pub fn new(binding: Binding<CatRef, Rc<Owner>>) -> Self {
        Self {
            binding,
            memo: Memo::new(),
        }
    }

    pub fn render(&self) -> Node {
        let owner = self.binding.get();
        self.memo.render(&owner, |owner| {
            column(vec![
                heading(2, "Owner Details"),
                text(format!("Name: {}", display_name(owner.as_deref()))),
            ])
        })
    }

    pub fn render_count(&self) -> usize {
        self.memo.render_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_joins_with_space() {
        assert_eq!(display_name(Some(&Owner::new("A", "B"))), "A B");
        assert_eq!(display_name(Some(&Owner::new("", "B"))), " B");
    }

    #[test]
    fn test_missing_owner_renders_undefined() {
        assert_eq!(display_name(None), "undefined undefined");
    }
}
