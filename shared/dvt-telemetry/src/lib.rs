//! DVT Telemetry
//!
//! Structured logging setup shared by datasource services.

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::init_tracing;

/// Initialize logging from the environment, naming the service
/// `default_service` unless `SERVICE_NAME` overrides it.
pub fn init(default_service: &str) -> Result<TelemetryConfig, TelemetryError> {
    let config = TelemetryConfig::from_env(default_service);
    init_tracing(&config)?;
    Ok(config)
}

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid log filter {filter:?}: {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Tracing initialization failed: {0}")]
    TracingInit(String),
}
