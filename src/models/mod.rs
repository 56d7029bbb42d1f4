//! Data models for etymon.
//!
//! Lexical entries, the typed edges between them, and the query options used
//! to look them up.

mod edge;
mod entry;

pub use edge::{Edge, Neighbor, RelationType};
pub use entry::{
    Category, DEFAULT_ENTRY_LIMIT, DescendantNote, Entry, EntryQuery, EtymologyTemplate,
    LinkedTerm, NodeId, NodeIdParts,
};
pub(crate) use entry::LinkedTermRepr;
