//! # Etymon
//!
//! Etymological lineage lookup over a read-only `SQLite` word graph.
//!
//! Etymon resolves a word to a canonical lexical entry and walks the typed
//! relations between entries (most importantly `descendant`) to answer two
//! questions: what descends from this word, and where did it come from.
//!
//! ## Features
//!
//! - Indexed entry lookup by word (optionally per language) and by node id
//! - Outgoing/incoming edge and neighbor queries
//! - Cycle-safe, depth-bounded descendant enumeration (pre-order DFS)
//! - First-parent ancestor chain walk, newest entry first
//!
//! ## Example
//!
//! ```rust,ignore
//! use etymon::{ChainOptions, LexiconService};
//! use etymon::storage::lexicon::SqliteLexiconBackend;
//!
//! let backend = SqliteLexiconBackend::open("etymology.db")?;
//! let service = LexiconService::new(backend);
//!
//! for entry in service.get_etymology_chain_for_word("history", &ChainOptions::default())? {
//!     println!("{} ({})", entry.word, entry.lang_code);
//! }
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use thiserror::Error as ThisError;

pub mod config;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

pub use config::{EtymonConfig, StorageConfig, TraversalConfig};
pub use models::{Edge, Entry, EntryQuery, Neighbor, NodeId, RelationType};
pub use services::{ChainOptions, LexiconService};
pub use storage::{EdgeStore, EntryStore, LexiconBackend};

/// Error type for etymon operations.
///
/// Only storage-level failures are errors. Missing entries, missing edges,
/// blank input, cyclic data and the depth ceiling are all represented as
/// empty or bounded results instead.
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `StorageUnavailable` | The database cannot be opened or lacks a required table |
/// | `Query` | A statement fails to prepare, execute, or decode |
/// | `Config` | A configuration file cannot be read or parsed |
/// | `InvalidInput` | CLI or configuration values are malformed |
#[derive(Debug, ThisError)]
pub enum Error {
    /// The word graph database could not be opened.
    ///
    /// Raised when:
    /// - The database file does not exist (it is never created)
    /// - The file is not a `SQLite` database
    /// - The `entries` or `edges` table is missing
    #[error("storage unavailable at '{}': {cause}", path.display())]
    StorageUnavailable {
        /// Path of the database that failed to open.
        path: PathBuf,
        /// The underlying cause.
        cause: String,
    },

    /// A query against the word graph failed.
    #[error("query '{operation}' failed: {cause}")]
    Query {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {cause}")]
    Config {
        /// The underlying cause.
        cause: String,
    },

    /// Invalid input was provided to the CLI or configuration layer.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for etymon operations.
pub type Result<T> = std::result::Result<T, Error>;
