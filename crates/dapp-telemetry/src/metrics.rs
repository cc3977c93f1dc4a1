//! Prometheus metrics for the token ledger.
//!
//! All metrics follow the naming convention: `dt_<component>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Applied `transfer` and `transfer_from` calls
    pub static ref LEDGER_TRANSFERS: Counter = Counter::new(
        "dt_ledger_transfers_total",
        "Total number of applied token transfers"
    ).expect("metric creation failed");

    /// Applied `approve` calls
    pub static ref LEDGER_APPROVALS: Counter = Counter::new(
        "dt_ledger_approvals_total",
        "Total number of applied allowance approvals"
    ).expect("metric creation failed");

    /// Rejected mutations by operation and error code
    pub static ref LEDGER_REJECTIONS: CounterVec = CounterVec::new(
        Opts::new("dt_ledger_rejections_total", "Rejected ledger mutations"),
        &["operation", "error"]
    ).expect("metric creation failed");

    /// Events handed to the notification sink
    pub static ref LEDGER_EVENTS_PUBLISHED: Counter = Counter::new(
        "dt_ledger_events_published_total",
        "Total ledger events published to the sink"
    ).expect("metric creation failed");

    /// Contracts deployed by the deployment driver
    pub static ref CONTRACTS_DEPLOYED: CounterVec = CounterVec::new(
        Opts::new("dt_deploy_contracts_total", "Contracts deployed"),
        &["kind"]  // kind: token/exchange
    ).expect("metric creation failed");
}

/// Handle proving the ledger metrics are registered.
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Calling this twice fails with [`TelemetryError::MetricsInit`] because the
/// collectors are already registered.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(LEDGER_TRANSFERS.clone()),
        Box::new(LEDGER_APPROVALS.clone()),
        Box::new(LEDGER_REJECTIONS.clone()),
        Box::new(LEDGER_EVENTS_PUBLISHED.clone()),
        Box::new(CONTRACTS_DEPLOYED.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
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
