//! Prometheus metrics for the asset registry.
//!
//! All metrics follow the naming convention: `ar_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., assets_issued_total)
//! - **Histogram**: Distribution of values (e.g., invocation_duration_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, HistogramOpts, HistogramVec, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::Duration;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Issues executed by the engine. Counted before the ledger commits.
    pub static ref ASSETS_ISSUED: Counter = Counter::new(
        "ar_assets_issued_total",
        "Total number of asset issues executed (before ledger commit)"
    ).expect("metric creation failed");

    /// Ownership changes executed by the engine, self-transfers excluded.
    /// Counted before the ledger commits, so a transfer later aborted by an
    /// MVCC conflict is still included.
    pub static ref ASSETS_TRANSFERRED: Counter = Counter::new(
        "ar_assets_transferred_total",
        "Total number of asset ownership transfers executed (before ledger commit)"
    ).expect("metric creation failed");

    /// Invocations by function and outcome
    pub static ref INVOCATIONS: CounterVec = CounterVec::new(
        Opts::new("ar_invocations_total", "Registry invocations"),
        &["function", "outcome"]  // outcome: ok/validation/identity/authorization/storage
    ).expect("metric creation failed");

    /// Invocation latency
    pub static ref INVOCATION_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "ar_invocation_duration_seconds",
            "Time spent handling a registry invocation"
        ).buckets(exponential_buckets(0.00001, 2.0, 15).unwrap_or_default()),
        &["function"]
    ).expect("metric creation failed");
}

/// Handle to the registry the metrics were registered with.
pub struct MetricsHandle {
    registry: Arc<Registry>,
}

impl MetricsHandle {
    /// Render the registered metrics in Prometheus text format.
    pub fn gather(&self) -> Result<String, TelemetryError> {
        encode(&self.registry)
    }
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(ASSETS_ISSUED.clone()),
        Box::new(ASSETS_TRANSFERRED.clone()),
        Box::new(INVOCATIONS.clone()),
        Box::new(INVOCATION_DURATION.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics in the global registry as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    encode(&REGISTRY)
}

fn encode(registry: &Registry) -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Record one finished invocation.
pub fn record_invocation(function: &str, outcome: &str, elapsed: Duration) {
    INVOCATIONS.with_label_values(&[function, outcome]).inc();
    INVOCATION_DURATION
        .with_label_values(&[function])
        .observe(elapsed.as_secs_f64());
}
