//! # History Telemetry
//!
//! Observability for the Cell History engine.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` registry with an `EnvFilter`, rendered
//!   either human-readable (development) or as JSON lines (containers).
//! - **Metrics**: Prometheus counters and histograms describing query load,
//!   empty-result policies and backend failures.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use history_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! let _guard = init_telemetry(&config).expect("Failed to init telemetry");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HISTORY_SERVICE_NAME` | `cell-history` | Service name attached to logs |
//! | `HISTORY_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `HISTORY_JSON_LOGS` | `false` | Emit JSON lines |
//! | `HISTORY_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{init_logging, StructuredLogger};
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, MetricsHandle, BACKEND_FAILURES,
    CANDIDATE_SET_SIZE, DESCRIPTION_UPDATES, EMPTY_POLICY_RESULTS, QUERIES_SERVED,
    QUERY_DURATION,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics = register_metrics()?;
    let logger = init_logging(config)?;

    Ok(TelemetryGuard {
        _logger: logger,
        _metrics: metrics,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _logger: StructuredLogger,
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
    ($histogram:expr, $labels:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram.with_label_values($labels))
    };
}
