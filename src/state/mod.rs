//! State Module - Input and focus state
//!
//! - **Keyboard** - Event types
//! - **Input** - crossterm event conversion and polling
//! - **Focus** - Focus ring, Tab cycling, focus kept across re-renders
//! - **Global keys** - Editor-wide shortcuts

mod focus;
mod global_keys;
mod input;
mod keyboard;

pub use focus::*;
pub use global_keys::*;
pub use input::*;
pub use keyboard::*;
