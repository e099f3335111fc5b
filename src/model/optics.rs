//! Projections into the cat record, plus the immutable update helpers the
//! views write through.

use std::rc::Rc;

use super::{Attribute, Cat, Info, Owner, Part};
use crate::store::Optic;

pub type CatRef = Rc<Cat>;
pub type PartList = Rc<Vec<Rc<Part>>>;
pub type AttributeList = Rc<Vec<Rc<Attribute>>>;

/// Owner selector. Read-only: nothing in the editor changes the owner.
pub fn owner() -> Optic<CatRef, Rc<Owner>> {
    Optic::select("owner", |cat: &CatRef| cat.owner.clone())
}

pub fn info() -> Optic<CatRef, Rc<Info>> {
    Optic::field(
        "info",
        |cat: &CatRef| cat.info.clone(),
        |cat, info| Rc::new(Cat { info, ..(**cat).clone() }),
    )
}

pub fn parts() -> Optic<CatRef, PartList> {
    Optic::field(
        "parts",
        |cat: &CatRef| cat.parts.clone(),
        |cat, parts| Rc::new(Cat { parts, ..(**cat).clone() }),
    )
}

pub fn attributes() -> Optic<Rc<Part>, AttributeList> {
    Optic::field(
        "attributes",
        |part: &Rc<Part>| part.attributes.clone(),
        |part, attributes| {
            Rc::new(Part {
                attributes,
                ..(**part).clone()
            })
        },
    )
}

/// Key used to split the parts list.
pub fn part_key(part: &Rc<Part>) -> String {
    part.kind.clone()
}

pub fn with_weight(info: &Info, weight: String) -> Rc<Info> {
    Rc::new(Info {
        weight,
        ..info.clone()
    })
}

pub fn with_injured(attribute: &Attribute, injured: bool) -> Rc<Attribute> {
    Rc::new(Attribute {
        injured,
        ..attribute.clone()
    })
}
