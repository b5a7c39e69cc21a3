//! # Registry Telemetry
//!
//! Observability for the confidential asset registry.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with an `EnvFilter` and a pretty or
//!   JSON formatter, selected by [`TelemetryConfig::json_logs`]
//! - **Metrics**: Prometheus counters and histograms for issue/transfer
//!   invocations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use registry_telemetry::{init_logging, register_metrics, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config).expect("Failed to init logging");
//! let metrics = register_metrics().expect("Failed to register metrics");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AR_SERVICE_NAME` | `asset-registry` | Service name in log records |
//! | `AR_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `AR_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |
//! | `AR_CONSOLE_OUTPUT` | `true` | Emit logs to stdout |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{init_logging, LoggingGuard};
pub use metrics::{
    encode_metrics, record_invocation, register_metrics, MetricsHandle, ASSETS_ISSUED,
    ASSETS_TRANSFERRED, INVOCATIONS, INVOCATION_DURATION,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// A metric could not be registered or encoded.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// The configuration is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
