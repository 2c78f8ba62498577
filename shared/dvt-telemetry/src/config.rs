//! Telemetry Configuration

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Reported as the `service` field of every log line
    pub service_name: String,
    /// `EnvFilter` directives, e.g. `info,example_datasource=debug`
    pub log_level: String,
    pub json_logs: bool,
}

impl TelemetryConfig {
    /// Read `SERVICE_NAME`, `RUST_LOG` and `JSON_LOGS`
    pub fn from_env(default_service: &str) -> Self {
        Self::from_lookup(default_service, |key| std::env::var(key).ok())
    }

    pub fn from_lookup(default_service: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            service_name: lookup("SERVICE_NAME").unwrap_or_else(|| default_service.to_string()),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            json_logs: lookup("JSON_LOGS")
                .map(|v| matches!(v.trim(), "true" | "1"))
                .unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> TelemetryConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TelemetryConfig::from_lookup("example-datasource", |key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.service_name, "example-datasource");
        assert_eq!(config.log_level, "info");
        assert!(config.json_logs);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("SERVICE_NAME", "datasource-eu"),
            ("RUST_LOG", "debug"),
            ("JSON_LOGS", "false"),
        ]);
        assert_eq!(config.service_name, "datasource-eu");
        assert_eq!(config.log_level, "debug");
        assert!(!config.json_logs);
    }
}
