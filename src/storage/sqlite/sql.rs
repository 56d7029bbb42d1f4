//! SQL statements for the word graph.
//!
//! Every statement selecting full entries uses the same column list in the
//! same order so rows can be mapped by position (see [`super::EntryRow`]).
//! `etymology_number` is compared through `COALESCE(.., 0)` so a missing
//! number orders exactly like 0. `node_id` (or the edge `id`) closes every
//! ORDER BY so results are stable across runs.

/// Full entry column list, aliased to `e`.
macro_rules! entry_columns {
    () => {
        "e.node_id, e.word, e.lang, e.lang_code, e.pos, e.etymology_number, e.etymology_text, \
         e.etymology_templates, e.derived, e.descendants, e.alt_of, e.form_of, e.categories, \
         e.redirects, e.literal_meaning, e.wikidata"
    };
}

/// Neighbor projection: far entry identity fields plus the edge tag.
macro_rules! neighbor_columns {
    () => {
        "e.node_id, e.word, e.lang, e.lang_code, e.pos, e.etymology_number, ed.relation_type"
    };
}

/// Entries for a word in every language.
pub const FIND_BY_WORD: &str = concat!(
    "SELECT ",
    entry_columns!(),
    " FROM entries e WHERE e.word = ?1
      ORDER BY e.lang_code, COALESCE(e.etymology_number, 0), e.pos, e.node_id
      LIMIT ?2"
);

/// Entries for a word in one language.
pub const FIND_BY_WORD_IN_LANG: &str = concat!(
    "SELECT ",
    entry_columns!(),
    " FROM entries e WHERE e.word = ?1 AND e.lang_code = ?2
      ORDER BY COALESCE(e.etymology_number, 0), e.pos, e.node_id
      LIMIT ?3"
);

/// Point lookup by node id.
pub const FIND_BY_ID: &str = concat!(
    "SELECT ",
    entry_columns!(),
    " FROM entries e WHERE e.node_id = ?1"
);

/// Edges leaving a node.
pub const OUTGOING_EDGES: &str = "SELECT id, src_id, dst_id, relation_type FROM edges
     WHERE src_id = ?1
     ORDER BY relation_type, id";

/// Edges entering a node.
pub const INCOMING_EDGES: &str = "SELECT id, src_id, dst_id, relation_type FROM edges
     WHERE dst_id = ?1
     ORDER BY relation_type, id";

/// Destination entries of edges leaving a node.
pub const OUTGOING_NEIGHBORS: &str = concat!(
    "SELECT ",
    neighbor_columns!(),
    " FROM edges ed JOIN entries e ON e.node_id = ed.dst_id
      WHERE ed.src_id = ?1
      ORDER BY ed.relation_type, e.lang_code, e.word, ed.id"
);

/// Source entries of edges entering a node.
pub const INCOMING_NEIGHBORS: &str = concat!(
    "SELECT ",
    neighbor_columns!(),
    " FROM edges ed JOIN entries e ON e.node_id = ed.src_id
      WHERE ed.dst_id = ?1
      ORDER BY ed.relation_type, e.lang_code, e.word, ed.id"
);

/// Full destination entries of a node's edges of one type (`?2`).
pub const RELATED_TARGETS: &str = concat!(
    "SELECT ",
    entry_columns!(),
    " FROM edges ed JOIN entries e ON e.node_id = ed.dst_id
      WHERE ed.src_id = ?1 AND ed.relation_type = ?2
      ORDER BY e.lang_code, e.word, e.pos, COALESCE(e.etymology_number, 0), e.node_id, ed.id"
);

/// Full source entries of edges of one type (`?2`) entering a node.
pub const RELATED_SOURCES: &str = concat!(
    "SELECT ",
    entry_columns!(),
    " FROM edges ed JOIN entries e ON e.node_id = ed.src_id
      WHERE ed.dst_id = ?1 AND ed.relation_type = ?2
      ORDER BY e.lang_code, e.word, e.pos, COALESCE(e.etymology_number, 0), e.node_id, ed.id"
);

/// Names of the tables the engine reads.
pub const REQUIRED_TABLES: [&str; 2] = ["entries", "edges"];

/// Indexes needed for interactive latency, as (table, leading columns).
pub const REQUIRED_INDEXES: [(&str, &[&str]); 4] = [
    ("entries", &["word"]),
    ("entries", &["word", "lang_code"]),
    ("edges", &["src_id"]),
    ("edges", &["dst_id"]),
];
