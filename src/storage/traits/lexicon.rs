//! Read-side traits for the word graph.
//!
//! The graph is split into two stores that a single backend usually
//! implements together:
//!
//! | Trait | Reads | Absent data |
//! |-------|-------|-------------|
//! | [`EntryStore`] | lexical entries by word or id | empty `Vec` / `None` |
//! | [`EdgeStore`] | typed edges and the entries at their far end | empty `Vec` |
//!
//! # Error Modes and Guarantees
//!
//! Implementations return `Err` only when storage itself fails. An unknown
//! word or id, a node without edges, and an edge whose far end is missing from
//! `entries` are all ordinary empty results.
//!
//! # Ordering
//!
//! Every method returns rows in a fixed, documented order. Callers rely on it:
//! the first row of [`EntryStore::find_by_word`] and
//! [`EdgeStore::descendant_sources_of`] decides canonical entries and ancestor
//! chains.

use crate::Result;
use crate::models::{Edge, Entry, EntryQuery, Neighbor, NodeId};

/// Indexed read access to lexical entries.
///
/// # Implementor Notes
///
/// - Methods use `&self` so one backend can be shared via `Arc`
/// - Blank (empty or whitespace-only) words must return an empty `Vec`
///   without touching storage
pub trait EntryStore: Send + Sync {
    /// Finds entries whose word matches exactly; input is not normalized.
    ///
    /// With `query.lang_code` set, results are ordered by
    /// (`etymology_number`, `pos`); otherwise by
    /// (`lang_code`, `etymology_number`, `pos`). A missing etymology number
    /// orders as 0. At most `query.effective_limit()` entries are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn find_by_word(&self, word: &str, query: &EntryQuery) -> Result<Vec<Entry>>;

    /// Looks an entry up by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. An unknown id is `Ok(None)`.
    fn find_by_id(&self, id: &NodeId) -> Result<Option<Entry>>;
}

/// Indexed read access to the typed edges between entries.
pub trait EdgeStore: Send + Sync {
    /// Edges whose source is `id`, ordered by (`relation_type`, `id`).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn outgoing(&self, id: &NodeId) -> Result<Vec<Edge>>;

    /// Edges whose destination is `id`, ordered by (`relation_type`, `id`).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn incoming(&self, id: &NodeId) -> Result<Vec<Edge>>;

    /// Destination entries of outgoing edges, as neighbors.
    ///
    /// Ordered by (`relation_type`, far `lang_code`, far `word`). Edges whose
    /// destination is missing are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn outgoing_neighbors(&self, id: &NodeId) -> Result<Vec<Neighbor>>;

    /// Source entries of incoming edges, as neighbors. Same ordering as
    /// [`EdgeStore::outgoing_neighbors`].
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn incoming_neighbors(&self, id: &NodeId) -> Result<Vec<Neighbor>>;

    /// Full entries that `id` points to through `descendant` edges.
    ///
    /// Ordered by (`lang_code`, `word`, `pos`, `etymology_number`); each entry
    /// appears once even if several edges lead to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn descendants_of(&self, id: &NodeId) -> Result<Vec<Entry>>;

    /// Full entries that point to `id` through `descendant` edges (its
    /// etymological parents). Same ordering and deduplication as
    /// [`EdgeStore::descendants_of`].
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn descendant_sources_of(&self, id: &NodeId) -> Result<Vec<Entry>>;
}

/// A backend that serves both entries and edges.
pub trait LexiconBackend: EntryStore + EdgeStore {}

impl<T: EntryStore + EdgeStore> LexiconBackend for T {}
