//! Parts, Part and Attribute views.
//!
//! The parts list is split into keyed part bindings (keyed by part type);
//! each part renders one attribute view per attribute index, keyed by
//! placement.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::warn;

use super::Memo;
use crate::model::optics::{self, AttributeList, CatRef, PartList};
use crate::model::{Attribute, Part};
use crate::primitives::{Node, WidgetId, column, heading, row, switch, text};
use crate::store::{Binding, ItemKey, Optic, Splitter};

// =============================================================================
// Attribute
// =============================================================================

pub struct AttributeView {
    binding: Binding<CatRef, Rc<Attribute>>,
    switch_id: WidgetId,
    memo: Memo<Option<Rc<Attribute>>>,
}

impl AttributeView {
    pub fn new(binding: Binding<CatRef, Rc<Attribute>>) -> Self {
        let switch_id = WidgetId::new(format!("{}.injured", binding.path()));
        Self {
            binding,
            switch_id,
            memo: Memo::new(),
        }
    }

    pub fn switch_id(&self) -> &WidgetId {
        &self.switch_id
    }

    pub fn render(&self) -> Node {
        let attribute = self.binding.get();
        self.memo.render(&attribute, |attribute| {
            let Some(attribute) = attribute else {
                return Node::Empty;
            };

            let binding = self.binding.clone();
            let toggle = switch(self.switch_id.clone(), attribute.injured, move |checked| {
                if let Err(err) = binding.update(|prev| optics::with_injured(prev, checked)) {
                    warn!(%err, "injury toggle dropped");
                }
            });

            row(vec![text(format!("  {:<14}", attribute.placement)), toggle])
        })
    }

    pub fn render_count(&self) -> usize {
        self.memo.render_count()
    }
}

// =============================================================================
// Part
// =============================================================================

pub struct PartView {
    binding: Binding<CatRef, Rc<Part>>,
    attributes: Binding<CatRef, AttributeList>,
    attribute_views: RefCell<Vec<Rc<AttributeView>>>,
    memo: Memo<Option<Rc<Part>>>,
}

impl PartView {
    pub fn new(binding: Binding<CatRef, Rc<Part>>) -> Self {
        let attributes = binding.focus(&optics::attributes());
        Self {
            binding,
            attributes,
            attribute_views: RefCell::new(Vec::new()),
            memo: Memo::new(),
        }
    }

    pub fn binding(&self) -> &Binding<CatRef, Rc<Part>> {
        &self.binding
    }

    /// View for the attribute at `index`, created on first use.
    pub fn attribute_view(&self, index: usize) -> Rc<AttributeView> {
        let mut views = self.attribute_views.borrow_mut();
        while views.len() <= index {
            let next = views.len();
            let binding = self.attributes.focus(&Optic::index(next));
            views.push(Rc::new(AttributeView::new(binding)));
        }
        views[index].clone()
    }

    pub fn render(&self) -> Node {
        let part = self.binding.get();
        self.memo.render(&part, |part| {
            let Some(part) = part else {
                return Node::Empty;
            };

            let mut children = vec![heading(3, part.kind.clone())];
            for (index, attribute) in part.attributes.iter().enumerate() {
                let view = self.attribute_view(index);
                children.push(Node::keyed(attribute.placement.clone(), view.render()));
            }
            self.attribute_views
                .borrow_mut()
                .truncate(part.attributes.len());

            column(children)
        })
    }

    pub fn render_count(&self) -> usize {
        self.memo.render_count()
    }
}

// =============================================================================
// Parts
// =============================================================================

pub struct PartsView {
    splitter: Splitter<CatRef, Rc<Part>, String>,
    part_views: RefCell<HashMap<ItemKey<String>, Rc<PartView>>>,
    memo: Memo<Option<PartList>>,
}

impl PartsView {
    pub fn new(binding: Binding<CatRef, PartList>) -> Self {
        Self {
            splitter: Splitter::new(binding, optics::part_key),
            part_views: RefCell::new(HashMap::new()),
            memo: Memo::new(),
        }
    }

    pub fn splitter(&self) -> &Splitter<CatRef, Rc<Part>, String> {
        &self.splitter
    }

    /// The live view for `key`, if that part has been rendered.
    pub fn part_view(&self, key: &ItemKey<String>) -> Option<Rc<PartView>> {
        self.part_views.borrow().get(key).cloned()
    }

    pub fn render(&self) -> Node {
        let parts = self.splitter.source().get();
        self.memo.render(&parts, |_| {
            let items = self.splitter.items();

            let mut views = self.part_views.borrow_mut();
            views.retain(|key, _| items.iter().any(|(live, _)| live == key));

            let mut children = vec![heading(2, "Body Injury Details")];
            for (key, binding) in items {
                let view = views
                    .entry(key.clone())
                    .or_insert_with(|| Rc::new(PartView::new(binding)))
                    .clone();
                children.push(Node::keyed(key.to_string(), view.render()));
            }

            column(children)
        })
    }

    pub fn render_count(&self) -> usize {
        self.memo.render_count()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_cat;
    use crate::store::Store;

    fn parts_view() -> (Store<CatRef>, PartsView) {
        let store = Store::new(default_cat());
        let view = PartsView::new(Binding::root(&store).focus(&optics::parts()));
        (store, view)
    }

    fn leg(placement: &str) -> Rc<Part> {
        Rc::new(Part {
            kind: "leg".into(),
            attributes: Rc::new(vec![Rc::new(Attribute {
                placement: placement.into(),
                injured: false,
            })]),
        })
    }

    fn switch_ids(node: &Node) -> Vec<String> {
        node.focusables().iter().map(|f| f.id().to_string()).collect()
    }

    #[test]
    fn test_parts_keyed_by_type() {
        let (_store, view) = parts_view();
        let node = view.render();
        assert_eq!(node.child_keys(), vec!["leg#0", "tail#0", "head#0"]);
        assert_eq!(switch_ids(&node)[0], "parts{leg#0}.attributes[0].injured");
        assert_eq!(switch_ids(&node).len(), 8);
    }

    #[test]
    fn test_toggle_rerenders_only_owning_part() {
        let (store, view) = parts_view();
        let node = view.render();
        let leg = view.part_view(&ItemKey::new("leg".into(), 0)).unwrap();
        let tail = view.part_view(&ItemKey::new("tail".into(), 0)).unwrap();
        assert_eq!((leg.render_count(), tail.render_count()), (1, 1));

        let Some(crate::primitives::Focusable::Switch(props)) = node.focusables().into_iter().nth(4)
        else {
            unreachable!()
        };
        assert_eq!(props.id.as_str(), "parts{tail#0}.attributes[0].injured");
        crate::primitives::toggle(&props);

        view.render();
        assert_eq!(leg.render_count(), 1);
        assert_eq!(tail.render_count(), 2);
        assert!(store.get().parts[1].attributes[0].injured);

        let base = tail.attribute_view(0);
        let tip = tail.attribute_view(1);
        assert_eq!(base.render_count(), 2);
        assert_eq!(tip.render_count(), 1);
    }

    #[test]
    fn test_reorder_keeps_views_on_their_parts() {
        let (store, view) = parts_view();
        view.render();
        let head = view.part_view(&ItemKey::new("head".into(), 0)).unwrap();

        view.splitter().move_item(2, 0).unwrap();
        let node = view.render();
        assert_eq!(node.child_keys(), vec!["head#0", "leg#0", "tail#0"]);

        let same = view.part_view(&ItemKey::new("head".into(), 0)).unwrap();
        assert!(Rc::ptr_eq(&head, &same));
        assert_eq!(same.binding().get().unwrap().kind, "head");
        // Nothing about the head part changed, so it was not re-rendered
        assert_eq!(head.render_count(), 1);
        assert_eq!(store.get().parts[0].kind, "head");
    }

    #[test]
    fn test_same_type_insert_keeps_views_on_their_parts() {
        let (store, view) = parts_view();
        view.render();
        let front = view.part_view(&ItemKey::new("leg".into(), 0)).unwrap();

        let spare = view.splitter().insert(0, leg("back-left")).unwrap();
        assert_eq!(spare.to_string(), "leg#1");

        let node = view.render();
        assert_eq!(node.child_keys(), vec!["leg#1", "leg#0", "tail#0", "head#0"]);
        let part = front.binding().get().unwrap();
        assert_eq!(part.attributes[0].placement, "front-left");
        assert!(Rc::ptr_eq(&part, &store.get().parts[1]));
        assert_eq!(front.render_count(), 1);
    }

    #[test]
    fn test_same_type_move_keeps_writes_on_their_part() {
        let (store, view) = parts_view();
        view.splitter().insert(1, leg("back-left")).unwrap();
        view.render();
        let spare = view.part_view(&ItemKey::new("leg".into(), 1)).unwrap();

        view.splitter().move_item(1, 0).unwrap();
        let node = view.render();
        assert_eq!(node.child_keys(), vec!["leg#1", "leg#0", "tail#0", "head#0"]);

        let Node::Row(children) = spare.attribute_view(0).render() else {
            unreachable!()
        };
        let Node::Switch(props) = &children[1] else {
            unreachable!()
        };
        crate::primitives::toggle(props);

        let cat = store.get();
        assert_eq!(cat.parts[0].attributes[0].placement, "back-left");
        assert!(cat.parts[0].attributes[0].injured);
        assert_eq!(cat.parts[1].attributes[0].placement, "front-left");
        assert!(!cat.parts[1].attributes[0].injured);
    }

    #[test]
    fn test_removed_part_view_is_dropped() {
        let (_store, view) = parts_view();
        view.render();
        let key = ItemKey::new("tail".to_string(), 0);
        view.splitter().remove(&key).unwrap();

        let node = view.render();
        assert_eq!(node.child_keys(), vec!["leg#0", "head#0"]);
        assert!(view.part_view(&key).is_none());
    }

    #[test]
    fn test_attribute_view_renders_placement_and_switch() {
        let store = Store::new(default_cat());
        let binding = Binding::root(&store)
            .focus(&optics::parts())
            .focus(&Optic::index(0))
            .focus(&optics::attributes())
            .focus(&Optic::index(3));
        let view = AttributeView::new(binding);
        let Node::Row(children) = view.render() else {
            unreachable!()
        };
        assert!(matches!(&children[0], Node::Text(t) if t.trim() == "back-right"));
        assert!(matches!(&children[1], Node::Switch(p) if !p.checked));
        assert_eq!(view.switch_id().as_str(), "parts[0].attributes[3].injured");
    }
}
