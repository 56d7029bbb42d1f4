//! Read-only connection handling for the word graph.
//!
//! The database is opened with `SQLITE_OPEN_READ_ONLY` and never created.
//! A small pool of connections, each behind its own mutex, lets concurrent
//! traversals interleave their queries instead of queueing on one handle.

use super::sql::{REQUIRED_INDEXES, REQUIRED_TABLES};
use crate::{Error, Result};
use rusqlite::{Connection, OpenFlags, params};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Helper to acquire mutex lock with poison recovery.
///
/// Connections are only ever read through, so a panic in another query
/// cannot leave one in a state worth refusing.
pub fn acquire_lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("SQLite mutex was poisoned, recovering");
            metrics::counter!("sqlite_mutex_poison_recovery_total").increment(1);
            poisoned.into_inner()
        },
    }
}

/// Opens an existing database read-only.
///
/// # Errors
///
/// Returns [`Error::StorageUnavailable`] if the file does not exist or
/// cannot be opened.
pub fn open_read_only(path: &Path, busy_timeout: Duration) -> Result<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_NO_MUTEX
        | OpenFlags::SQLITE_OPEN_URI;
    let conn = Connection::open_with_flags(path, flags).map_err(|e| unavailable(path, &e))?;
    configure_connection(&conn, busy_timeout);
    Ok(conn)
}

/// Applies read-side pragmas.
///
/// - **`busy_timeout`**: waits for a writer elsewhere instead of failing
/// - **`query_only`**: refuses any statement that would modify the database
pub fn configure_connection(conn: &Connection, busy_timeout: Duration) {
    if let Err(e) = conn.busy_timeout(busy_timeout) {
        tracing::debug!(error = %e, "failed to set busy timeout");
    }
    if let Err(e) = conn.pragma_update(None, "query_only", "ON") {
        tracing::warn!(error = %e, "failed to enable query_only; connection is writable");
    }
}

/// Checks that the word graph tables exist and warns about missing indexes.
///
/// A missing index only slows lookups down, so it is reported but tolerated.
///
/// # Errors
///
/// Returns [`Error::StorageUnavailable`] if the file is not a database or a
/// required table is missing.
pub fn verify_schema(conn: &Connection, path: &Path) -> Result<()> {
    for table in REQUIRED_TABLES {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
                params![table],
                |row| row.get(0),
            )
            .map_err(|e| unavailable(path, &e))?;

        if !exists {
            return Err(Error::StorageUnavailable {
                path: path.to_path_buf(),
                cause: format!("missing table '{table}'"),
            });
        }
    }

    for (table, columns) in REQUIRED_INDEXES {
        match has_index_on(conn, table, columns) {
            Ok(true) => {},
            Ok(false) => tracing::warn!(
                table,
                columns = %columns.join(", "),
                "word graph is missing an index; lookups will scan"
            ),
            Err(e) => tracing::debug!(table, error = %e, "could not inspect indexes"),
        }
    }

    Ok(())
}

/// Whether some index on `table` starts with exactly `columns`, in order.
fn has_index_on(conn: &Connection, table: &str, columns: &[&str]) -> rusqlite::Result<bool> {
    let mut list = conn.prepare("SELECT name FROM pragma_index_list(?1)")?;
    let names = list
        .query_map(params![table], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut info = conn.prepare("SELECT name FROM pragma_index_info(?1) ORDER BY seqno")?;
    for name in names {
        let indexed = info
            .query_map(params![name], |row| row.get::<_, Option<String>>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let leading = indexed.iter().take(columns.len());
        if indexed.len() >= columns.len()
            && leading
                .zip(columns)
                .all(|(have, want)| have.as_deref() == Some(*want))
        {
            return Ok(true);
        }
    }

    Ok(false)
}

fn unavailable(path: &Path, e: &rusqlite::Error) -> Error {
    Error::StorageUnavailable {
        path: path.to_path_buf(),
        cause: e.to_string(),
    }
}

/// Fixed-size pool of read-only connections.
pub struct ConnectionPool {
    connections: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl ConnectionPool {
    /// Wraps already-opened connections. An empty list is not a pool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `connections` is empty.
    pub fn new(connections: Vec<Connection>) -> Result<Self> {
        if connections.is_empty() {
            return Err(Error::InvalidInput(
                "connection pool needs at least one connection".to_string(),
            ));
        }

        Ok(Self {
            connections: connections.into_iter().map(Mutex::new).collect(),
            next: AtomicUsize::new(0),
        })
    }

    /// Number of pooled connections.
    #[must_use]
    pub fn size(&self) -> usize {
        self.connections.len()
    }

    /// Borrows a connection.
    ///
    /// Starts at the next connection in round-robin order and takes the first
    /// idle one; when all are busy, waits on the starting one.
    pub fn get(&self) -> MutexGuard<'_, Connection> {
        let len = self.connections.len();
        let start = self.next.fetch_add(1, Ordering::Relaxed) % len;

        for offset in 0..len {
            let slot = &self.connections[(start + offset) % len];
            match slot.try_lock() {
                Ok(guard) => return guard,
                Err(std::sync::TryLockError::Poisoned(poisoned)) => {
                    tracing::warn!("SQLite mutex was poisoned, recovering");
                    metrics::counter!("sqlite_mutex_poison_recovery_total").increment(1);
                    return poisoned.into_inner();
                },
                Err(std::sync::TryLockError::WouldBlock) => {},
            }
        }

        acquire_lock(&self.connections[start])
    }
}
