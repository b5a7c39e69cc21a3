//! Structured logging setup.
//!
//! JSON output is meant for log shippers; the pretty formatter is for local
//! peers. Payload contents are never part of a log record, only keys, orgs
//! and sizes.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Returned by [`init_logging`]; records which formatter was installed.
#[derive(Debug)]
pub struct LoggingGuard {
    /// Whether the JSON formatter is active.
    pub json: bool,
}

/// Install the global `tracing` subscriber.
///
/// Fails with [`TelemetryError::LoggingInit`] if a global subscriber is
/// already set or the filter directive does not parse.
pub fn init_logging(config: &TelemetryConfig) -> Result<LoggingGuard, TelemetryError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(format!("log level {:?}: {e}", config.log_level)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match (config.console_output, config.json_logs) {
        (false, _) => registry.try_init(),
        (true, true) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        (true, false) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .try_init(),
    };
    result.map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        json: config.json_logs,
    })
}

/// Log an asset lifecycle event with the standard fields.
#[macro_export]
macro_rules! log_asset_event {
    ($level:ident, $msg:expr, $collection:expr, $asset_key:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            collection = %$collection,
            asset_key = %$asset_key,
            $($($field)*,)?
            $msg
        )
    };
}
