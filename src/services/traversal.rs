//! Word graph traversals.
//!
//! Both traversals follow `descendant` edges only and share two guarantees:
//!
//! - **No repeats**: a call-local visited set keyed by [`NodeId`] means no
//!   entry appears twice, even when the edge data contains cycles.
//! - **Bounded depth**: no output entry is more than `max_depth` edges away
//!   from the start. An entry at the ceiling is included but not expanded.
//!
//! | Traversal | Direction | Shape | Order |
//! |-----------|-----------|-------|-------|
//! | [`descendant_chain`] | outgoing | every branch | pre-order DFS |
//! | [`ancestor_chain`] | incoming | first parent only | newest first |
//!
//! Both run iteratively so deep or adversarial data cannot exhaust the call
//! stack.

use crate::Result;
use crate::models::{Entry, NodeId};
use crate::storage::EdgeStore;
use std::collections::HashSet;

/// Per-call traversal options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainOptions {
    /// Depth ceiling; the configured default applies when unset.
    pub max_depth: Option<usize>,
}

impl ChainOptions {
    /// Creates options with the configured defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self { max_depth: None }
    }

    /// Sets the depth ceiling.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Enumerates `start` and everything descending from it, depth first.
///
/// Children are visited in [`EdgeStore::descendants_of`] order, and a node's
/// whole subtree is emitted before its next sibling. A node reachable along
/// several paths is emitted at its first pre-order position only.
///
/// # Errors
///
/// Returns an error if an edge lookup fails; no partial result is returned.
pub fn descendant_chain<S: EdgeStore + ?Sized>(
    store: &S,
    start: Entry,
    max_depth: usize,
) -> Result<Vec<Entry>> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut output = Vec::new();
    let mut stack = vec![(start, 0_usize)];

    while let Some((entry, depth)) = stack.pop() {
        if !visited.insert(entry.node_id.clone()) {
            continue;
        }

        if depth < max_depth {
            let children = store.descendants_of(&entry.node_id)?;
            // Reversed so the first child is popped first.
            stack.extend(
                children
                    .into_iter()
                    .rev()
                    .filter(|child| !visited.contains(&child.node_id))
                    .map(|child| (child, depth + 1)),
            );
        }

        output.push(entry);
    }

    Ok(output)
}

/// Walks from `start` back through its etymological parents.
///
/// At each step the first entry of [`EdgeStore::descendant_sources_of`] is
/// taken as the parent; other parents and their ancestry are never visited.
/// The walk ends at an entry without parents, at a parent already in the
/// chain, or at the depth ceiling.
///
/// # Errors
///
/// Returns an error if an edge lookup fails; no partial result is returned.
pub fn ancestor_chain<S: EdgeStore + ?Sized>(
    store: &S,
    start: Entry,
    max_depth: usize,
) -> Result<Vec<Entry>> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut output = Vec::new();
    let mut current = Some(start);
    let mut depth = 0_usize;

    while let Some(entry) = current.take() {
        if depth > max_depth || !visited.insert(entry.node_id.clone()) {
            break;
        }

        if depth < max_depth {
            current = store
                .descendant_sources_of(&entry.node_id)?
                .into_iter()
                .next();
        }

        output.push(entry);
        depth += 1;
    }

    Ok(output)
}
