//! Prometheus metrics for the history engine.
//!
//! All metrics follow the naming convention: `history_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Metrics registry for the engine
    pub static ref REGISTRY: Registry = Registry::new();

    /// History queries answered, by classified search type
    pub static ref QUERIES_SERVED: CounterVec = CounterVec::new(
        Opts::new("history_queries_served_total", "History queries answered"),
        &["search_type"]
    ).expect("metric creation failed");

    /// Queries answered with the documented empty page instead of a lookup
    pub static ref EMPTY_POLICY_RESULTS: CounterVec = CounterVec::new(
        Opts::new(
            "history_empty_policy_results_total",
            "Queries short-circuited to an empty page"
        ),
        &["reason"]  // reason: amount_unsupported/unknown_search/address_not_owned
    ).expect("metric creation failed");

    /// Store or resolver failures propagated to callers
    pub static ref BACKEND_FAILURES: CounterVec = CounterVec::new(
        Opts::new("history_backend_failures_total", "Store and resolver failures"),
        &["operation"]
    ).expect("metric creation failed");

    /// Description updates by outcome
    pub static ref DESCRIPTION_UPDATES: CounterVec = CounterVec::new(
        Opts::new("history_description_updates_total", "Description update requests"),
        &["outcome"]  // outcome: updated/not_found
    ).expect("metric creation failed");

    /// End-to-end duration of engine operations
    pub static ref QUERY_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "history_operation_duration_seconds",
            "Time spent serving engine operations"
        ).buckets(exponential_buckets(0.0001, 2.0, 16).expect("valid buckets")),
        &["operation"]
    ).expect("metric creation failed");

    /// Size of the full candidate hash list materialized per page request
    pub static ref CANDIDATE_SET_SIZE: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "history_candidate_set_size",
            "Matching transactions materialized before pagination"
        ).buckets(exponential_buckets(1.0, 4.0, 10).expect("valid buckets"))
    ).expect("metric creation failed");
}

/// Handle for the registered metrics
pub struct MetricsHandle {
    registry: Arc<Registry>,
}

impl MetricsHandle {
    /// Registry the engine metrics live in.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Register all metrics with the engine registry.
///
/// Calling this more than once is harmless: metrics that are already
/// registered are skipped.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(QUERIES_SERVED.clone()),
        Box::new(EMPTY_POLICY_RESULTS.clone()),
        Box::new(BACKEND_FAILURES.clone()),
        Box::new(DESCRIPTION_UPDATES.clone()),
        Box::new(QUERY_DURATION.clone()),
        Box::new(CANDIDATE_SET_SIZE.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
