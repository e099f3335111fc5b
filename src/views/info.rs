//! Info view - cat name and editable weight.

use std::rc::Rc;

use tracing::warn;

use super::Memo;
use crate::model::Info;
use crate::model::optics::{self, CatRef};
use crate::primitives::{Node, WidgetId, column, editable, heading, row, text};
use crate::store::Binding;

pub struct InfoView {
    binding: Binding<CatRef, Rc<Info>>,
    weight_id: WidgetId,
    memo: Memo<Option<Rc<Info>>>,
}

impl InfoView {
    pub fn new(binding: Binding<CatRef, Rc<Info>>) -> Self {
        let weight_id = WidgetId::new(format!("{}.weight", binding.path()));
        Self {
            binding,
            weight_id,
            memo: Memo::new(),
        }
    }

    pub fn weight_id(&self) -> &WidgetId {
        &self.weight_id
    }

    pub fn render(&self) -> Node {
        let info = self.binding.get();
        self.memo.render(&info, |info| {
            let Some(info) = info else {
                return column(vec![heading(2, "Cat Details")]);
            };

            let binding = self.binding.clone();
            let weight = editable(self.weight_id.clone(), info.weight.clone(), move |value| {
                if let Err(err) = binding.update(|prev| optics::with_weight(prev, value)) {
                    warn!(%err, "weight edit dropped");
                }
            });

            column(vec![
                heading(2, "Cat Details"),
                text(format!("Name: {}", info.name)),
                row(vec![text("Weight: "), weight, text(" lbs")]),
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
    use crate::model::default_cat;
    use crate::primitives::{Focusable, commit_on_blur};
    use crate::store::Store;

    fn weight_props(node: &Node) -> crate::primitives::EditableProps {
        match node.focusables().into_iter().next() {
            Some(Focusable::Editable(props)) => props,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_weight_commit_writes_info_only() {
        let store = Store::new(default_cat());
        let view = InfoView::new(Binding::root(&store).focus(&optics::info()));
        assert_eq!(view.weight_id().as_str(), "info.weight");

        let before = store.get();
        let props = weight_props(&view.render());
        assert_eq!(props.value, "10");
        assert!(commit_on_blur(&props, "11"));

        let after = store.get();
        assert_eq!(after.info.weight, "11");
        assert_eq!(after.info.name, "Whiskers");
        assert!(Rc::ptr_eq(&before.owner, &after.owner));
        assert!(Rc::ptr_eq(&before.parts, &after.parts));

        view.render();
        view.render();
        assert_eq!(view.render_count(), 2);
    }
}
