//! Cat record model.
//!
//! Every interior node sits behind `Rc` so that a structural update copies
//! only the path it touches. Serde names follow the JSON shape of the seed
//! (`firstName`, `lastName`, `type`).

mod fixture;
pub mod optics;

use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub use fixture::{default_cat, from_json, load_seed};

/// Root of the record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cat {
    pub owner: Rc<Owner>,
    pub info: Rc<Info>,
    pub parts: Rc<Vec<Rc<Part>>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub first_name: String,
    pub last_name: String,
}

/// Weight is free text; it is never parsed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub name: String,
    pub weight: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: Rc<Vec<Rc<Attribute>>>,
}

/// `placement` doubles as the per-part key and is assumed unique in a part.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub placement: String,
    pub injured: bool,
}

impl Cat {
    pub fn new(owner: Owner, info: Info, parts: Vec<Part>) -> Self {
        Self {
            owner: Rc::new(owner),
            info: Rc::new(info),
            parts: Rc::new(parts.into_iter().map(Rc::new).collect()),
        }
    }
}

impl Part {
    pub fn new(kind: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Rc::new(attributes.into_iter().map(Rc::new).collect()),
        }
    }
}

impl Attribute {
    pub fn new(placement: impl Into<String>, injured: bool) -> Self {
        Self {
            placement: placement.into(),
            injured,
        }
    }
}

impl Owner {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl Info {
    pub fn new(name: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: weight.into(),
        }
    }
}
