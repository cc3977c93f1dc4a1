//! # Dapp Telemetry
//!
//! Logging and metrics for the Dapp-Token workspace.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` registry with `EnvFilter`, pretty or JSON output
//! - **Metrics**: Prometheus counters for ledger mutations and deployments
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dapp_telemetry::{TelemetryConfig, init_telemetry};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // Logs and metrics are now being collected
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DT_SERVICE_NAME` | `dapp-token` | Service name in logs |
//! | `DT_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `DT_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `DT_JSON_LOGS` | `false` | JSON log lines |
//! | `DT_NETWORK` | `localhost` | Network name |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::{parse_flag, TelemetryConfig};
pub use logging::{init_logging, StructuredLogger};
pub use metrics::{encode_metrics, register_metrics, MetricsHandle};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize logger: {0}")]
    LoggerInit(String),

    /// Prometheus registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first: registration has no side effects on output
    let metrics_handle = register_metrics()?;
    let logger = init_logging(&config)?;

    tracing::info!(
        service = logger.service_name(),
        network = %config.network,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard {
        _logger: logger,
        _metrics: metrics_handle,
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
