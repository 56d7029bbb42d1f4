//! Query metrics for the `SQLite` word graph backend.

use std::time::Instant;

/// Records operation metrics for a storage query.
///
/// Two series are recorded per call:
/// 1. `storage_operations_total` - counter by backend, operation and status
/// 2. `storage_operation_duration_ms` - latency histogram with the same labels
///
/// Recording is a no-op until the host process installs a `metrics` recorder.
///
/// # Examples
///
/// ```ignore
/// use std::time::Instant;
/// use etymon::storage::sqlite::record_operation_metrics;
///
/// let start = Instant::now();
/// // ... run query ...
/// record_operation_metrics("sqlite", "find_by_word", start, "success");
/// ```
pub fn record_operation_metrics(
    backend: &'static str,
    operation: &'static str,
    start: Instant,
    status: &'static str,
) {
    metrics::counter!(
        "storage_operations_total",
        "backend" => backend,
        "operation" => operation,
        "status" => status
    )
    .increment(1);
    metrics::histogram!(
        "storage_operation_duration_ms",
        "backend" => backend,
        "operation" => operation,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64() * 1000.0);
}
