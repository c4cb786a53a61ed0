//! Structured logging setup
//!
//! Builds the `tracing-subscriber` stack from [`TelemetryConfig`]. The
//! `RUST_LOG` environment variable, when set, overrides the configured
//! level. Debug builds log pretty terminal output; release builds log JSON
//! with span context for log ingestion.

use crate::config::TelemetryConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured logging from configuration.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_telemetry(config: &TelemetryConfig) {
    init_telemetry_with_level(&config.log_level);
}

/// Initialize structured logging at an explicit level, e.g. `"debug"`.
///
/// Priority: `RUST_LOG` env var, then `log_level`.
pub fn init_telemetry_with_level(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},gitfolio={log_level}")));

    #[cfg(debug_assertions)]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_target(false))
            .try_init()
            .ok();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
            .ok();
    }
}
