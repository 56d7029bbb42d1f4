//! Word graph backends.
//!
//! # Available Backends
//!
//! | Backend | Use Case | Notes |
//! |---------|----------|-------|
//! | [`SqliteLexiconBackend`] | Default; embedded | Read-only, pooled connections |
//!
//! # Example
//!
//! ```rust,ignore
//! use etymon::storage::lexicon::SqliteLexiconBackend;
//! use etymon::storage::traits::EntryStore;
//! use etymon::models::EntryQuery;
//!
//! let backend = SqliteLexiconBackend::open("etymology.db")?;
//! let senses = backend.find_by_word("bank", &EntryQuery::new().with_lang_code("en"))?;
//! ```

mod sqlite;

pub use sqlite::SqliteLexiconBackend;

// Re-export traits for convenience
pub use crate::storage::traits::{EdgeStore, EntryStore, LexiconBackend};
