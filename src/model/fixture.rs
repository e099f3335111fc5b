//! Seed records: the built-in cat and JSON seed loading.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use tracing::info;

use super::{Attribute, Cat, Info, Owner, Part};
use crate::error::SeedError;

/// The cat every session starts with unless a seed file is given.
pub fn default_cat() -> Rc<Cat> {
    Rc::new(Cat::new(
        Owner::new("Jane", "Doe"),
        Info::new("Whiskers", "10"),
        vec![
            Part::new(
                "leg",
                vec![
                    Attribute::new("front-left", false),
                    Attribute::new("front-right", false),
                    Attribute::new("back-left", false),
                    Attribute::new("back-right", false),
                ],
            ),
            Part::new(
                "tail",
                vec![Attribute::new("base", false), Attribute::new("tip", false)],
            ),
            Part::new(
                "head",
                vec![
                    Attribute::new("left-ear", false),
                    Attribute::new("right-ear", false),
                ],
            ),
        ],
    ))
}

/// Parse a cat from JSON text. `origin` names the source in errors.
pub fn from_json(json: &str, origin: &str) -> Result<Rc<Cat>, SeedError> {
    serde_json::from_str::<Cat>(json)
        .map(Rc::new)
        .map_err(|source| SeedError::Parse {
            origin: origin.to_string(),
            source,
        })
}

/// Load a cat from a JSON seed file.
pub fn load_seed(path: &Path) -> Result<Rc<Cat>, SeedError> {
    let json = fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cat = from_json(&json, &path.display().to_string())?;
    info!(path = %path.display(), parts = cat.parts.len(), "loaded seed record");
    Ok(cat)
}
