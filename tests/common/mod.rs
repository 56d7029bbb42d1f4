//! Shared fixtures for integration tests.
//!
//! Builds word graph databases on disk so the backend is exercised through
//! its real read-only open path.

#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]

use etymon::storage::SqliteLexiconBackend;
use etymon::{LexiconService, StorageConfig};
use rusqlite::{Connection, params};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Word graph schema as produced by the import pipeline.
pub const SCHEMA: &str = "
    CREATE TABLE entries (
        node_id TEXT PRIMARY KEY,
        word TEXT NOT NULL,
        lang TEXT,
        lang_code TEXT NOT NULL,
        pos TEXT,
        etymology_number INTEGER,
        etymology_text TEXT,
        etymology_templates TEXT,
        derived TEXT,
        descendants TEXT,
        alt_of TEXT,
        form_of TEXT,
        categories TEXT,
        redirects TEXT,
        literal_meaning TEXT,
        wikidata TEXT
    );
    CREATE INDEX idx_entries_lang_word_pos ON entries(lang_code, word, pos);
    CREATE INDEX idx_entries_word ON entries(word);
    CREATE INDEX idx_entries_word_lang ON entries(word, lang_code);
    CREATE TABLE edges (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        src_id TEXT NOT NULL,
        dst_id TEXT NOT NULL,
        relation_type TEXT NOT NULL,
        raw_payload TEXT
    );
    CREATE INDEX idx_edges_src ON edges(src_id);
    CREATE INDEX idx_edges_dst ON edges(dst_id);
";

/// Writable handle used to populate a test database.
pub struct GraphBuilder {
    dir: TempDir,
    path: PathBuf,
    conn: Connection,
}

impl GraphBuilder {
    /// Creates an empty database with the full schema.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("etymology.db");
        let conn = Connection::open(&path).expect("create db");
        conn.execute_batch(SCHEMA).expect("schema");
        Self { dir, path, conn }
    }

    /// Inserts an entry with identity fields only.
    pub fn entry(
        self,
        node_id: &str,
        word: &str,
        lang_code: &str,
        pos: Option<&str>,
        etymology_number: Option<i64>,
    ) -> Self {
        self.conn
            .execute(
                "INSERT INTO entries (node_id, word, lang_code, pos, etymology_number)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![node_id, word, lang_code, pos, etymology_number],
            )
            .expect("insert entry");
        self
    }

    /// Inserts a noun entry of etymology 0, deriving the node id.
    pub fn noun(self, lang_code: &str, word: &str) -> Self {
        let node_id = format!("{lang_code}:{word}:noun:0");
        self.entry(&node_id, word, lang_code, Some("noun"), Some(0))
    }

    /// Sets a raw column value on an existing entry.
    pub fn column(self, node_id: &str, column: &str, value: &str) -> Self {
        let sql = format!("UPDATE entries SET {column} = ?1 WHERE node_id = ?2");
        self.conn
            .execute(&sql, params![value, node_id])
            .expect("update column");
        self
    }

    /// Inserts an edge.
    pub fn edge(self, src: &str, dst: &str, relation_type: &str) -> Self {
        self.conn
            .execute(
                "INSERT INTO edges (src_id, dst_id, relation_type) VALUES (?1, ?2, ?3)",
                params![src, dst, relation_type],
            )
            .expect("insert edge");
        self
    }

    /// Inserts a `descendant` edge.
    pub fn descendant(self, src: &str, dst: &str) -> Self {
        self.edge(src, dst, "descendant")
    }

    /// Closes the writer and opens the database read-only.
    pub fn open(self) -> TestGraph {
        let Self { dir, path, conn } = self;
        drop(conn);
        let backend = SqliteLexiconBackend::open_with_config(&StorageConfig {
            pool_size: 2,
            ..StorageConfig::for_path(&path)
        })
        .expect("open backend");
        TestGraph {
            _dir: dir,
            path,
            service: LexiconService::new(backend),
        }
    }
}

/// An opened test database; keeps the temp dir alive.
pub struct TestGraph {
    _dir: TempDir,
    pub path: PathBuf,
    pub service: LexiconService<SqliteLexiconBackend>,
}

impl TestGraph {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Node ids of a list of entries.
pub fn ids(entries: &[etymon::Entry]) -> Vec<String> {
    entries.iter().map(|e| e.node_id.to_string()).collect()
}
