//! Shared `SQLite` infrastructure for the word graph backend.
//!
//! ## Module Structure
//!
//! - [`connection`]: read-only open, schema verification, connection pool
//! - [`sql`]: the statements the engine runs
//! - [`entry_row`]: row mapping for entries, edges and neighbors
//! - [`metrics`]: per-query metrics

mod connection;
mod entry_row;
mod metrics;
mod sql;

pub use connection::{
    ConnectionPool, acquire_lock, configure_connection, open_read_only, verify_schema,
};
pub use entry_row::{
    EntryRow, build_entry_from_row, decode_json_column, edge_from_row, neighbor_from_row,
};
pub use metrics::record_operation_metrics;
pub(crate) use sql::{
    FIND_BY_ID, FIND_BY_WORD, FIND_BY_WORD_IN_LANG, INCOMING_EDGES, INCOMING_NEIGHBORS,
    OUTGOING_EDGES, OUTGOING_NEIGHBORS, RELATED_SOURCES, RELATED_TARGETS,
};
