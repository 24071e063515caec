//! Prometheus metrics for the resolution engine.
//!
//! - `adnet_resolution_cache_total{op}` - cache hits, misses, stores and flushes
//! - `adnet_store_errors_total{op}` - failed or timed out store calls
//! - `adnet_batch_updates_total{result}` - batch update outcomes
//!
//! Counters are no-ops until [`init_metrics`] installs the recorder.

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global Prometheus handle for rendering metrics
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Safe to call more than once; later
/// calls return the handle installed first.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(
        "adnet_resolution_cache_total",
        "Resolution cache operations by result (hit, miss, store, flush)"
    );
    describe_counter!("adnet_store_errors_total", "Failed or timed out store calls by operation");
    describe_counter!("adnet_batch_updates_total", "Batch update outcomes by result");

    Ok(PROMETHEUS_HANDLE.get_or_init(|| handle).clone())
}

/// Labels: op = "hit" | "miss" | "store" | "flush"
pub(crate) fn record_resolution_cache(op: &str) {
    let labels = [("op", op.to_string())];
    counter!("adnet_resolution_cache_total", &labels).increment(1);
}

/// Labels: op = store operation name ("get", "set", "index_add", ...)
pub(crate) fn record_store_error(op: &str) {
    let labels = [("op", op.to_string())];
    counter!("adnet_store_errors_total", &labels).increment(1);
}

/// Labels: result = "ok" | "partial" | "rejected"
pub(crate) fn record_batch_update(result: &str) {
    let labels = [("result", result.to_string())];
    counter!("adnet_batch_updates_total", &labels).increment(1);
}
