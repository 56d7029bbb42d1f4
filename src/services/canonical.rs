//! Canonical entry resolution.
//!
//! A word usually has several entries: one per language, part of speech and
//! etymology. Traversals need a single starting point, chosen as follows:
//!
//! 1. Fetch up to `candidate_limit` entries for the word in the canonical
//!    language (English by default), in store order.
//! 2. Take the first candidate that is a noun of etymology 0 (or none).
//! 3. Otherwise take the first candidate.
//!
//! Several entries can satisfy rule 2; store order breaks the tie. There is
//! no fallback to other languages.

use crate::Result;
use crate::config::TraversalConfig;
use crate::models::{Entry, EntryQuery};
use crate::storage::EntryStore;

/// Picks the canonical entry among candidates already in store order.
#[must_use]
pub fn select_canonical(candidates: &[Entry]) -> Option<&Entry> {
    candidates
        .iter()
        .find(|entry| entry.is_primary_noun())
        .or_else(|| candidates.first())
}

/// Fetches candidates for `word` and picks the canonical one.
///
/// Blank words resolve to `None` without querying the store.
///
/// # Errors
///
/// Returns an error if the candidate lookup fails.
pub fn resolve_canonical<S: EntryStore + ?Sized>(
    store: &S,
    word: &str,
    config: &TraversalConfig,
) -> Result<Option<Entry>> {
    if word.trim().is_empty() {
        return Ok(None);
    }

    let query = EntryQuery::new()
        .with_lang_code(config.canonical_lang_code.as_str())
        .with_limit(config.candidate_limit);
    let candidates = store.find_by_word(word, &query)?;

    let chosen = select_canonical(&candidates).cloned();
    if chosen.is_none() {
        tracing::debug!(word, lang_code = %config.canonical_lang_code, "no canonical entry");
    }

    Ok(chosen)
}
