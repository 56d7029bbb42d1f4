//! Row conversion for the word graph.
//!
//! Rows are read positionally into plain structs first, then mapped into the
//! domain types. JSON-bearing columns are decoded one by one; a column that is
//! NULL, blank, JSON `null`, or malformed becomes `None` without affecting the
//! rest of the entry.

use crate::models::{
    Category, DescendantNote, Edge, Entry, EtymologyTemplate, LinkedTerm, LinkedTermRepr,
    Neighbor, NodeId, RelationType,
};
use rusqlite::Row;
use serde::de::DeserializeOwned;

/// Raw `entries` row, in the column order of [`super::sql`]'s entry columns.
#[derive(Debug)]
pub struct EntryRow {
    /// Unique identifier.
    pub node_id: String,
    /// Display text.
    pub word: String,
    /// Language name.
    pub lang: Option<String>,
    /// Language code.
    pub lang_code: String,
    /// Part of speech.
    pub pos: Option<String>,
    /// Etymology number.
    pub etymology_number: Option<i64>,
    /// Free-text etymology.
    pub etymology_text: Option<String>,
    /// JSON: etymology templates.
    pub etymology_templates: Option<String>,
    /// JSON: derived terms.
    pub derived: Option<String>,
    /// JSON: descendant notes.
    pub descendants: Option<String>,
    /// JSON: alternative-form targets.
    pub alt_of: Option<String>,
    /// JSON: inflected-form targets.
    pub form_of: Option<String>,
    /// JSON: categories.
    pub categories: Option<String>,
    /// JSON: redirect targets.
    pub redirects: Option<String>,
    /// Literal meaning.
    pub literal_meaning: Option<String>,
    /// External knowledge-base identifier.
    pub wikidata: Option<String>,
}

impl EntryRow {
    /// Reads an entry row by position.
    ///
    /// # Errors
    ///
    /// Returns the rusqlite error if a column has an incompatible type.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            node_id: row.get(0)?,
            word: row.get(1)?,
            lang: row.get(2)?,
            lang_code: row.get(3)?,
            pos: row.get(4)?,
            etymology_number: row.get(5)?,
            etymology_text: row.get(6)?,
            etymology_templates: row.get(7)?,
            derived: row.get(8)?,
            descendants: row.get(9)?,
            alt_of: row.get(10)?,
            form_of: row.get(11)?,
            categories: row.get(12)?,
            redirects: row.get(13)?,
            literal_meaning: row.get(14)?,
            wikidata: row.get(15)?,
        })
    }
}

/// Converts an [`EntryRow`] into an [`Entry`], decoding JSON columns.
#[must_use]
pub fn build_entry_from_row(row: EntryRow) -> Entry {
    let id = row.node_id.as_str();

    let etymology_templates: Option<Vec<EtymologyTemplate>> =
        decode_json_column(id, "etymology_templates", row.etymology_templates.as_deref());
    let derived = decode_linked_terms(id, "derived", row.derived.as_deref());
    let descendants: Option<Vec<DescendantNote>> =
        decode_json_column(id, "descendants", row.descendants.as_deref());
    let alt_of = decode_linked_terms(id, "alt_of", row.alt_of.as_deref());
    let form_of = decode_linked_terms(id, "form_of", row.form_of.as_deref());
    let categories: Option<Vec<Category>> =
        decode_json_column(id, "categories", row.categories.as_deref());
    let redirects = decode_linked_terms(id, "redirects", row.redirects.as_deref());

    Entry {
        node_id: NodeId::new(row.node_id),
        word: row.word,
        lang: row.lang,
        lang_code: row.lang_code,
        pos: row.pos,
        etymology_number: row.etymology_number,
        etymology_text: row.etymology_text,
        etymology_templates,
        derived,
        descendants,
        alt_of,
        form_of,
        categories,
        redirects,
        literal_meaning: row.literal_meaning,
        wikidata: row.wikidata,
    }
}

/// Decodes one JSON column, degrading every failure to `None`.
pub fn decode_json_column<T: DeserializeOwned>(
    node_id: &str,
    column: &'static str,
    raw: Option<&str>,
) -> Option<T> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;

    match serde_json::from_str::<Option<T>>(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(node_id, column, error = %e, "undecodable JSON column, treating as absent");
            metrics::counter!("entry_json_decode_failures_total", "column" => column).increment(1);
            None
        },
    }
}

fn decode_linked_terms(
    node_id: &str,
    column: &'static str,
    raw: Option<&str>,
) -> Option<Vec<LinkedTerm>> {
    decode_json_column::<Vec<LinkedTermRepr>>(node_id, column, raw)
        .map(|items| items.into_iter().filter_map(LinkedTermRepr::into_term).collect())
}

/// Reads an `edges` row (`id, src_id, dst_id, relation_type`).
///
/// # Errors
///
/// Returns the rusqlite error if a column has an incompatible type.
pub fn edge_from_row(row: &Row<'_>) -> rusqlite::Result<Edge> {
    let relation_type: String = row.get(3)?;
    Ok(Edge {
        id: row.get(0)?,
        src_id: NodeId::new(row.get::<_, String>(1)?),
        dst_id: NodeId::new(row.get::<_, String>(2)?),
        relation_type: RelationType::parse(&relation_type),
    })
}

/// Reads a neighbor projection row.
///
/// # Errors
///
/// Returns the rusqlite error if a column has an incompatible type.
pub fn neighbor_from_row(row: &Row<'_>) -> rusqlite::Result<Neighbor> {
    let relation_type: String = row.get(6)?;
    Ok(Neighbor {
        node_id: NodeId::new(row.get::<_, String>(0)?),
        word: row.get(1)?,
        lang: row.get(2)?,
        lang_code: row.get(3)?,
        pos: row.get(4)?,
        etymology_number: row.get(5)?,
        relation_type: RelationType::parse(&relation_type),
    })
}
