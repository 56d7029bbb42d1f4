//! Business logic services.
//!
//! Services orchestrate storage backends and provide high-level operations.
//! [`LexiconService`] is the entry point; the canonical resolution and
//! traversal algorithms are exposed separately so they can run against any
//! [`EntryStore`](crate::storage::EntryStore) or
//! [`EdgeStore`](crate::storage::EdgeStore).

pub mod canonical;
mod lexicon;
pub mod traversal;

pub use canonical::{resolve_canonical, select_canonical};
pub use lexicon::LexiconService;
pub use traversal::{ChainOptions, ancestor_chain, descendant_chain};
