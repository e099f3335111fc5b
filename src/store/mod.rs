//! Store Module - Record store, optics, bindings and list splitting
//!
//! - **Store** - one shared value, replaced wholesale, with subscribers
//! - **Optic** - composable get/set projections with structural write-back
//! - **Binding** - store + optic; scoped subscriptions
//! - **Splitter** - keyed per-element bindings for a list slice
//!
//! # Example
//!
//! ```ignore
//! use makeshift_vet::model::{self, optics};
//! use makeshift_vet::store::{Binding, Store};
//!
//! let store = Store::new(model::default_cat());
//! let info = Binding::new(&store, optics::info());
//! let parts = Binding::new(&store, optics::parts());
//!
//! // Writing info copies the root and the info node only;
//! // `parts` keeps its identity and its subscribers stay quiet.
//! info.update(|i| optics::with_weight(i, "12".into()))?;
//! ```

mod binding;
mod identity;
mod optic;
mod record;
mod split;

pub use binding::Binding;
pub use identity::Identity;
pub use optic::{ItemKey, KeyFn, Optic, Path, Segment, position_of};
pub use record::{Cleanup, Store, Subscription};
pub use split::{SplitChanges, Splitter};
