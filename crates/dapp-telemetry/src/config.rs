//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to log output.
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive string.
    pub log_level: String,

    /// Whether to write log lines to stdout.
    pub console_output: bool,

    /// Whether to emit JSON log lines instead of the pretty format.
    pub json_logs: bool,

    /// Network identifier (localhost, testnet, mainnet).
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "dapp-token".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            network: "localhost".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DT_SERVICE_NAME`: Service name (default: dapp-token)
    /// - `DT_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `DT_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `DT_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    /// - `DT_NETWORK`: Network name (default: localhost)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("DT_SERVICE_NAME")
                .unwrap_or_else(|_| "dapp-token".to_string()),

            log_level: env::var("DT_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("DT_CONSOLE_OUTPUT")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),

            json_logs: env::var("DT_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(is_container),

            network: env::var("DT_NETWORK").unwrap_or_else(|_| "localhost".to_string()),
        }
    }

    /// Configuration for a named component.
    pub fn for_component(component: &str) -> Self {
        let mut config = Self::from_env();
        config.service_name = format!("dapp-token-{component}");
        config
    }
}

/// `true`/`1`/`yes`/`on` (any case) are true; everything else is false.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
