//! `SQLite` backend for the word graph.
//!
//! Reads the `entries` and `edges` tables produced by the ingestion pipeline.
//! The database is never written to: it is opened read-only, and every
//! connection additionally runs with `query_only`.

use crate::config::StorageConfig;
use crate::models::{Edge, Entry, EntryQuery, Neighbor, NodeId, RelationType};
use crate::storage::sqlite::{
    self, ConnectionPool, EntryRow, FIND_BY_ID, FIND_BY_WORD, FIND_BY_WORD_IN_LANG,
    INCOMING_EDGES, INCOMING_NEIGHBORS, OUTGOING_EDGES, OUTGOING_NEIGHBORS, RELATED_SOURCES,
    RELATED_TARGETS, build_entry_from_row, edge_from_row, neighbor_from_row,
    record_operation_metrics,
};
use crate::storage::traits::{EdgeStore, EntryStore};
use crate::{Error, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::instrument;

/// `SQLite`-based word graph backend.
///
/// # Concurrency Model
///
/// Holds a fixed pool of read-only connections. Each query borrows one
/// connection for its own duration only, so several traversals running on
/// different threads interleave their queries. No state survives between
/// calls.
pub struct SqliteLexiconBackend {
    pool: ConnectionPool,
    /// Path to the database (None when built from an existing connection).
    db_path: Option<PathBuf>,
}

impl SqliteLexiconBackend {
    /// Opens an existing word graph with default storage settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageUnavailable`] if the file is missing, is not a
    /// database, or lacks the `entries`/`edges` tables.
    pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_config(&StorageConfig::for_path(db_path))
    }

    /// Opens an existing word graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageUnavailable`] if the file is missing, is not a
    /// database, or lacks the `entries`/`edges` tables.
    pub fn open_with_config(config: &StorageConfig) -> Result<Self> {
        let path = config.db_path.as_path();
        let pool_size = config.pool_size.max(1);

        let connections = (0..pool_size)
            .map(|_| sqlite::open_read_only(path, config.busy_timeout))
            .collect::<Result<Vec<_>>>()?;
        if let Some(first) = connections.first() {
            sqlite::verify_schema(first, path)?;
        }

        let pool = ConnectionPool::new(connections)?;
        tracing::info!(path = %path.display(), pool_size = pool.size(), "opened word graph");

        Ok(Self {
            pool,
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Wraps an already-open connection (an in-memory database, for example).
    ///
    /// The connection is switched to `query_only` before use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageUnavailable`] if the required tables are missing.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        sqlite::configure_connection(&conn, StorageConfig::default().busy_timeout);
        sqlite::verify_schema(&conn, Path::new(":memory:"))?;

        Ok(Self {
            pool: ConnectionPool::new(vec![conn])?,
            db_path: None,
        })
    }

    /// Returns the database path.
    #[must_use]
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Runs one query on a pooled connection, recording metrics and mapping
    /// failures to [`Error::Query`].
    fn run<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T> {
        let start = Instant::now();
        let result = {
            let conn = self.pool.get();
            f(&conn)
        };

        let status = if result.is_ok() { "success" } else { "error" };
        record_operation_metrics("sqlite", operation, start, status);

        result.map_err(|e| {
            tracing::error!(operation, error = %e, "word graph query failed");
            Error::Query {
                operation: operation.to_string(),
                cause: e.to_string(),
            }
        })
    }

    /// Full entries across `relation_type` edges, one per entry.
    fn related_entries(
        &self,
        operation: &'static str,
        sql: &'static str,
        id: &NodeId,
        relation_type: &RelationType,
    ) -> Result<Vec<Entry>> {
        let entries = self.run(operation, |conn| {
            let mut stmt = conn.prepare_cached(sql)?;
            let rows = stmt.query_map(params![id.as_str(), relation_type.as_str()], EntryRow::from_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
        })?;

        let mut seen = HashSet::with_capacity(entries.len());
        Ok(entries
            .into_iter()
            .filter(|row| seen.insert(row.node_id.clone()))
            .map(build_entry_from_row)
            .collect())
    }
}

/// Limits are bound as `i64`; anything larger than `i64::MAX` is unlimited.
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

impl EntryStore for SqliteLexiconBackend {
    #[instrument(skip(self, query), fields(lang_code = ?query.lang_code))]
    fn find_by_word(&self, word: &str, query: &EntryQuery) -> Result<Vec<Entry>> {
        if word.trim().is_empty() {
            return Ok(Vec::new());
        }

        let limit = sql_limit(query.effective_limit());
        let rows = self.run("find_by_word", |conn| match query.lang_code.as_deref() {
            Some(lang_code) => {
                let mut stmt = conn.prepare_cached(FIND_BY_WORD_IN_LANG)?;
                let rows = stmt.query_map(params![word, lang_code, limit], EntryRow::from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()
            },
            None => {
                let mut stmt = conn.prepare_cached(FIND_BY_WORD)?;
                let rows = stmt.query_map(params![word, limit], EntryRow::from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()
            },
        })?;

        Ok(rows.into_iter().map(build_entry_from_row).collect())
    }

    #[instrument(skip(self), fields(node_id = %id))]
    fn find_by_id(&self, id: &NodeId) -> Result<Option<Entry>> {
        let row = self.run("find_by_id", |conn| {
            conn.prepare_cached(FIND_BY_ID)?
                .query_row(params![id.as_str()], EntryRow::from_row)
                .optional()
        })?;

        Ok(row.map(build_entry_from_row))
    }
}

impl EdgeStore for SqliteLexiconBackend {
    #[instrument(skip(self), fields(node_id = %id))]
    fn outgoing(&self, id: &NodeId) -> Result<Vec<Edge>> {
        self.run("outgoing_edges", |conn| {
            let mut stmt = conn.prepare_cached(OUTGOING_EDGES)?;
            let rows = stmt.query_map(params![id.as_str()], edge_from_row)?;
            rows.collect()
        })
    }

    #[instrument(skip(self), fields(node_id = %id))]
    fn incoming(&self, id: &NodeId) -> Result<Vec<Edge>> {
        self.run("incoming_edges", |conn| {
            let mut stmt = conn.prepare_cached(INCOMING_EDGES)?;
            let rows = stmt.query_map(params![id.as_str()], edge_from_row)?;
            rows.collect()
        })
    }

    #[instrument(skip(self), fields(node_id = %id))]
    fn outgoing_neighbors(&self, id: &NodeId) -> Result<Vec<Neighbor>> {
        self.run("outgoing_neighbors", |conn| {
            let mut stmt = conn.prepare_cached(OUTGOING_NEIGHBORS)?;
            let rows = stmt.query_map(params![id.as_str()], neighbor_from_row)?;
            rows.collect()
        })
    }

    #[instrument(skip(self), fields(node_id = %id))]
    fn incoming_neighbors(&self, id: &NodeId) -> Result<Vec<Neighbor>> {
        self.run("incoming_neighbors", |conn| {
            let mut stmt = conn.prepare_cached(INCOMING_NEIGHBORS)?;
            let rows = stmt.query_map(params![id.as_str()], neighbor_from_row)?;
            rows.collect()
        })
    }

    #[instrument(skip(self), fields(node_id = %id))]
    fn descendants_of(&self, id: &NodeId) -> Result<Vec<Entry>> {
        self.related_entries(
            "descendants_of",
            RELATED_TARGETS,
            id,
            &RelationType::Descendant,
        )
    }

    #[instrument(skip(self), fields(node_id = %id))]
    fn descendant_sources_of(&self, id: &NodeId) -> Result<Vec<Entry>> {
        self.related_entries(
            "descendant_sources_of",
            RELATED_SOURCES,
            id,
            &RelationType::Descendant,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::fixtures::{connection, insert_edge, insert_entry};

    fn entry(node_id: &str, word: &str, lang_code: &str) -> Entry {
        Entry::new(node_id, word, lang_code)
    }

    fn backend_with(setup: impl FnOnce(&Connection)) -> SqliteLexiconBackend {
        let conn = connection();
        setup(&conn);
        SqliteLexiconBackend::from_connection(conn).unwrap()
    }

    fn ids(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.node_id.as_str()).collect()
    }

    #[test]
    fn test_find_by_word_orders_across_languages() {
        let backend = backend_with(|conn| {
            insert_entry(conn, &entry("fr:bank:noun:0", "bank", "fr").with_pos("noun"));
            insert_entry(conn, &entry("en:bank:verb:1", "bank", "en").with_pos("verb").with_etymology_number(1));
            insert_entry(conn, &entry("en:bank:noun:1", "bank", "en").with_pos("noun").with_etymology_number(1));
            insert_entry(conn, &entry("de:bank:noun:0", "bank", "de").with_pos("noun"));
        });

        let entries = backend.find_by_word("bank", &EntryQuery::new()).unwrap();
        assert_eq!(
            ids(&entries),
            vec!["de:bank:noun:0", "en:bank:noun:1", "en:bank:verb:1", "fr:bank:noun:0"]
        );
    }

    #[test]
    fn test_find_by_word_in_lang_treats_null_etymology_as_zero() {
        let backend = backend_with(|conn| {
            insert_entry(conn, &entry("en:bank:verb:0", "bank", "en").with_pos("verb").with_etymology_number(0));
            insert_entry(conn, &entry("en:bank:adj:1", "bank", "en").with_pos("adj").with_etymology_number(1));
            insert_entry(conn, &entry("en:bank:noun:", "bank", "en").with_pos("noun"));
            insert_entry(conn, &entry("fr:bank:noun:0", "bank", "fr").with_pos("noun"));
        });

        let entries = backend
            .find_by_word("bank", &EntryQuery::new().with_lang_code("en"))
            .unwrap();
        assert_eq!(
            ids(&entries),
            vec!["en:bank:noun:", "en:bank:verb:0", "en:bank:adj:1"]
        );
    }

    #[test]
    fn test_find_by_word_limit_and_blank() {
        let backend = backend_with(|conn| {
            for n in 0..5 {
                insert_entry(conn, &entry(&format!("en:set:noun:{n}"), "set", "en").with_etymology_number(n));
            }
        });

        let limited = backend.find_by_word("set", &EntryQuery::new().with_limit(2)).unwrap();
        assert_eq!(ids(&limited), vec!["en:set:noun:0", "en:set:noun:1"]);

        assert!(backend.find_by_word("", &EntryQuery::new()).unwrap().is_empty());
        assert!(backend.find_by_word(" \t ", &EntryQuery::new()).unwrap().is_empty());
        assert!(backend.find_by_word("  set ", &EntryQuery::new()).unwrap().is_empty());
    }

    #[test]
    fn test_find_by_word_matches_exactly() {
        let backend = backend_with(|conn| {
            insert_entry(conn, &entry("en:history:noun:0", "history", "en"));
            insert_entry(conn, &entry("en: pad:noun:0", " pad", "en"));
        });

        assert_eq!(backend.find_by_word("history", &EntryQuery::new()).unwrap().len(), 1);
        assert!(backend.find_by_word(" history ", &EntryQuery::new()).unwrap().is_empty());

        let padded = backend.find_by_word(" pad", &EntryQuery::new()).unwrap();
        assert_eq!(ids(&padded), vec!["en: pad:noun:0"]);
        assert!(backend.find_by_word("pad", &EntryQuery::new()).unwrap().is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let backend = backend_with(|conn| {
            insert_entry(conn, &entry("la:historia:noun:0", "historia", "la").with_lang("Latin"));
        });

        let found = backend.find_by_id(&NodeId::new("la:historia:noun:0")).unwrap().unwrap();
        assert_eq!(found.word, "historia");
        assert_eq!(found.lang.as_deref(), Some("Latin"));

        assert!(backend.find_by_id(&NodeId::new("la:nihil:noun:0")).unwrap().is_none());
    }

    #[test]
    fn test_find_by_id_malformed_json_column() {
        let backend = backend_with(|conn| {
            insert_entry(conn, &entry("en:bank:noun:0", "bank", "en"));
            conn.execute(
                "UPDATE entries SET derived = 'not json', categories = '[\"English nouns\"]'",
                [],
            )
            .unwrap();
        });

        let found = backend.find_by_id(&NodeId::new("en:bank:noun:0")).unwrap().unwrap();
        assert!(found.derived.is_none());
        assert_eq!(found.categories.unwrap()[0].name, "English nouns");
    }

    #[test]
    fn test_edges_ordered_by_type_then_id() {
        let backend = backend_with(|conn| {
            insert_edge(conn, "a", "c", "descendant");
            insert_edge(conn, "a", "b", "derived");
            insert_edge(conn, "a", "b", "descendant");
            insert_edge(conn, "z", "a", "alt_of");
        });

        let out = backend.outgoing(&NodeId::new("a")).unwrap();
        let summary: Vec<(String, &str, i64)> = out
            .iter()
            .map(|e| (e.relation_type.to_string(), e.dst_id.as_str(), e.id))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("derived".to_string(), "b", 2),
                ("descendant".to_string(), "c", 1),
                ("descendant".to_string(), "b", 3),
            ]
        );

        let incoming = backend.incoming(&NodeId::new("a")).unwrap();
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].relation_type, RelationType::AltOf);
    }

    #[test]
    fn test_outgoing_neighbors_order_and_orphans() {
        let backend = backend_with(|conn| {
            insert_entry(conn, &entry("la:banca:noun:0", "banca", "la"));
            insert_entry(conn, &entry("fr:banque:noun:0", "banque", "fr"));
            insert_entry(conn, &entry("de:bank:noun:0", "bank", "de"));
            insert_edge(conn, "la:banca:noun:0", "fr:banque:noun:0", "descendant");
            insert_edge(conn, "la:banca:noun:0", "de:bank:noun:0", "descendant");
            insert_edge(conn, "la:banca:noun:0", "xx:ghost:noun:0", "descendant");
        });

        let neighbors = backend.outgoing_neighbors(&NodeId::new("la:banca:noun:0")).unwrap();
        let codes: Vec<&str> = neighbors.iter().map(|n| n.lang_code.as_str()).collect();
        assert_eq!(codes, vec!["de", "fr"]);
        assert!(neighbors.iter().all(|n| n.relation_type == RelationType::Descendant));

        let incoming = backend.incoming_neighbors(&NodeId::new("fr:banque:noun:0")).unwrap();
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].word, "banca");
    }

    #[test]
    fn test_descendants_of_four_key_order_and_dedupe() {
        let backend = backend_with(|conn| {
            insert_entry(conn, &entry("la:root:noun:0", "root", "la"));
            insert_entry(conn, &entry("it:b:verb:0", "b", "it").with_pos("verb"));
            insert_entry(conn, &entry("it:b:noun:0", "b", "it").with_pos("noun"));
            insert_entry(conn, &entry("it:a:noun:0", "a", "it").with_pos("noun"));
            insert_entry(conn, &entry("es:z:noun:0", "z", "es").with_pos("noun"));
            insert_entry(conn, &entry("en:x:noun:0", "x", "en").with_pos("noun"));
            for dst in ["it:b:verb:0", "it:b:noun:0", "it:a:noun:0", "es:z:noun:0", "it:a:noun:0"] {
                insert_edge(conn, "la:root:noun:0", dst, "descendant");
            }
            insert_edge(conn, "la:root:noun:0", "en:x:noun:0", "derived");
        });

        let descendants = backend.descendants_of(&NodeId::new("la:root:noun:0")).unwrap();
        assert_eq!(
            ids(&descendants),
            vec!["es:z:noun:0", "it:a:noun:0", "it:b:noun:0", "it:b:verb:0"]
        );
    }

    #[test]
    fn test_descendant_sources_of() {
        let backend = backend_with(|conn| {
            insert_entry(conn, &entry("en:x:noun:0", "x", "en"));
            insert_entry(conn, &entry("grc:p:noun:0", "p", "grc"));
            insert_entry(conn, &entry("en:p:noun:0", "p", "en"));
            insert_edge(conn, "grc:p:noun:0", "en:x:noun:0", "descendant");
            insert_edge(conn, "en:p:noun:0", "en:x:noun:0", "descendant");
        });

        let parents = backend.descendant_sources_of(&NodeId::new("en:x:noun:0")).unwrap();
        assert_eq!(ids(&parents), vec!["en:p:noun:0", "grc:p:noun:0"]);
        assert!(backend.descendant_sources_of(&NodeId::new("nowhere")).unwrap().is_empty());
    }

    #[test]
    fn test_from_connection_requires_schema() {
        let conn = Connection::open_in_memory().unwrap();
        let result = SqliteLexiconBackend::from_connection(conn);
        assert!(matches!(result, Err(Error::StorageUnavailable { .. })));
    }

    #[test]
    fn test_from_connection_refuses_writes() {
        let backend = backend_with(|_| {});
        assert!(backend.db_path().is_none());

        let result = backend.run("write_attempt", |conn| {
            conn.execute("INSERT INTO edges (src_id, dst_id, relation_type) VALUES ('a', 'b', 'descendant')", [])
        });
        assert!(matches!(result, Err(Error::Query { ref operation, .. }) if operation == "write_attempt"));
        assert!(backend.outgoing(&NodeId::new("a")).unwrap().is_empty());
    }

    #[test]
    fn test_open_with_config_records_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch(crate::storage::sqlite::fixtures::SCHEMA)
            .unwrap();

        let backend = SqliteLexiconBackend::open_with_config(&StorageConfig {
            pool_size: 3,
            ..StorageConfig::for_path(&path)
        })
        .unwrap();
        assert_eq!(backend.db_path(), Some(path.as_path()));
        assert_eq!(backend.pool.size(), 3);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SqliteLexiconBackend::open(dir.path().join("missing.db"));
        assert!(matches!(result, Err(Error::StorageUnavailable { .. })));
    }
}
