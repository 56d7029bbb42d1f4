//! Lexicon service: the public face of the engine.
//!
//! Wraps a [`LexiconBackend`] and exposes every lookup and traversal callers
//! need. The backend is constructed once by the host process and shared by
//! `Arc`; the service itself holds no mutable state, so one instance can
//! serve any number of threads.
//!
//! # Example
//!
//! ```rust,ignore
//! use etymon::{ChainOptions, LexiconService};
//! use etymon::storage::SqliteLexiconBackend;
//!
//! let service = LexiconService::new(SqliteLexiconBackend::open("etymology.db")?);
//! let lineage = service.get_etymology_chain_for_word("history", &ChainOptions::new())?;
//! ```

use crate::Result;
use crate::config::TraversalConfig;
use crate::models::{Edge, Entry, EntryQuery, Neighbor, NodeId};
use crate::services::canonical::resolve_canonical;
use crate::services::traversal::{ChainOptions, ancestor_chain, descendant_chain};
use crate::storage::LexiconBackend;
use std::sync::Arc;
use tracing::{Span, instrument};

/// High-level service for word graph lookups and traversals.
///
/// # Thread Safety
///
/// The service is `Send + Sync` whenever the backend is, which
/// [`SqliteLexiconBackend`](crate::storage::SqliteLexiconBackend) is.
pub struct LexiconService<B: LexiconBackend> {
    backend: Arc<B>,
    traversal: TraversalConfig,
}

impl<B: LexiconBackend> LexiconService<B> {
    /// Creates a service with default traversal settings.
    pub fn new(backend: B) -> Self {
        Self::with_shared_backend(Arc::new(backend))
    }

    /// Creates a service over a shared backend.
    #[must_use]
    pub fn with_shared_backend(backend: Arc<B>) -> Self {
        Self {
            backend,
            traversal: TraversalConfig::default(),
        }
    }

    /// Replaces the traversal settings.
    #[must_use]
    pub fn with_traversal_config(mut self, traversal: TraversalConfig) -> Self {
        self.traversal = traversal;
        self
    }

    /// Returns a reference to the underlying backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the traversal settings in effect.
    #[must_use]
    pub const fn traversal_config(&self) -> &TraversalConfig {
        &self.traversal
    }

    // =========================================================================
    // Entry Lookups
    // =========================================================================

    /// Finds entries for a word, optionally in one language.
    ///
    /// Blank words return an empty list without touching storage. Without an
    /// explicit limit, the configured default applies.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    pub fn find_entries_by_word(&self, word: &str, query: &EntryQuery) -> Result<Vec<Entry>> {
        if word.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut query = query.clone();
        query.limit = query.limit.or(Some(self.traversal.default_limit));
        self.backend.find_by_word(word, &query)
    }

    /// Looks up an entry by node id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    pub fn get_entry_by_node_id(&self, id: &NodeId) -> Result<Option<Entry>> {
        self.backend.find_by_id(id)
    }

    /// Resolves the canonical entry for a word (see
    /// [`crate::services::canonical`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    pub fn resolve_canonical(&self, word: &str) -> Result<Option<Entry>> {
        resolve_canonical(self.backend.as_ref(), word, &self.traversal)
    }

    // =========================================================================
    // Edge Lookups
    // =========================================================================

    /// Edges leaving a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    pub fn get_outgoing_edges(&self, id: &NodeId) -> Result<Vec<Edge>> {
        self.backend.outgoing(id)
    }

    /// Edges entering a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    pub fn get_incoming_edges(&self, id: &NodeId) -> Result<Vec<Edge>> {
        self.backend.incoming(id)
    }

    /// Entries at the far end of a node's outgoing edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    pub fn get_outgoing_neighbors(&self, id: &NodeId) -> Result<Vec<Neighbor>> {
        self.backend.outgoing_neighbors(id)
    }

    /// Entries at the far end of a node's incoming edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    pub fn get_incoming_neighbors(&self, id: &NodeId) -> Result<Vec<Neighbor>> {
        self.backend.incoming_neighbors(id)
    }

    // =========================================================================
    // Traversals
    // =========================================================================

    /// Everything descending from the word's canonical entry, pre-order.
    ///
    /// Empty when the word has no canonical entry.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage query fails.
    #[instrument(skip(self, options), fields(max_depth, visited))]
    pub fn get_descendant_chain_for_word(
        &self,
        word: &str,
        options: &ChainOptions,
    ) -> Result<Vec<Entry>> {
        let max_depth = self.max_depth(options);
        Span::current().record("max_depth", max_depth);

        let Some(start) = self.resolve_canonical(word)? else {
            return Ok(Vec::new());
        };

        let chain = descendant_chain(self.backend.as_ref(), start, max_depth)?;
        record_visited("descendants", chain.len());
        Ok(chain)
    }

    /// The word's canonical entry followed by its first-parent ancestry,
    /// newest first.
    ///
    /// Empty for blank input or when the word has no canonical entry.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage query fails.
    #[instrument(skip(self, options), fields(max_depth, visited))]
    pub fn get_etymology_chain_for_word(
        &self,
        word: &str,
        options: &ChainOptions,
    ) -> Result<Vec<Entry>> {
        let max_depth = self.max_depth(options);
        Span::current().record("max_depth", max_depth);

        let Some(start) = self.resolve_canonical(word)? else {
            return Ok(Vec::new());
        };

        let chain = ancestor_chain(self.backend.as_ref(), start, max_depth)?;
        record_visited("ancestors", chain.len());
        Ok(chain)
    }

    fn max_depth(&self, options: &ChainOptions) -> usize {
        options.max_depth.unwrap_or(self.traversal.max_depth)
    }
}

impl<B: LexiconBackend> Clone for LexiconService<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            traversal: self.traversal.clone(),
        }
    }
}

fn record_visited(kind: &'static str, visited: usize) {
    Span::current().record("visited", visited);
    metrics::counter!("traversal_visited_total", "kind" => kind)
        .increment(u64::try_from(visited).unwrap_or(u64::MAX));
    tracing::debug!(kind, visited, "traversal finished");
}
