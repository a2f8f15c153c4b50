//! Telemetry initialization.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Telemetry configuration.
#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    /// Enable JSON logging (for production).
    pub json_logs: bool,
    /// Force debug level regardless of `RUST_LOG`.
    pub verbose: bool,
}

impl TelemetryConfig {
    /// Load configuration from environment variables.
    pub fn from_env(verbose: bool) -> Self {
        Self {
            json_logs: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            verbose,
        }
    }
}

/// Initialize the tracing subscriber. Logs go to stderr so command output on
/// stdout stays machine-readable.
pub fn init_telemetry(config: &TelemetryConfig) {
    let env_filter = if config.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,seeder=debug,quill_infra=debug"))
    };

    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    tracing::debug!(json_logs = config.json_logs, "Telemetry initialized");
}
