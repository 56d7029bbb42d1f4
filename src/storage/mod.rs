//! Storage layer for the word graph.
//!
//! The graph lives in a pre-populated `SQLite` database opened read-only:
//! - [`traits`]: the [`EntryStore`] / [`EdgeStore`] read interfaces
//! - [`lexicon`]: the `SQLite` backend implementing them
//! - [`sqlite`]: connection handling, SQL, and row mapping shared by the backend

// Allow significant_drop_tightening - connection guards are scoped to one query.
#![allow(clippy::significant_drop_tightening)]

pub mod lexicon;
pub mod sqlite;
pub mod traits;

pub use lexicon::SqliteLexiconBackend;
pub use traits::{EdgeStore, EntryStore, LexiconBackend};
