//! Storage backend traits.

mod lexicon;

pub use lexicon::{EdgeStore, EntryStore, LexiconBackend};
