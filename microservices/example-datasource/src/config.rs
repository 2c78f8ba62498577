//! Configuration for the example datasource

use std::net::SocketAddr;
use std::str::FromStr;

use dvt_core::{DvtError, Result};

/// Example datasource configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP bind address
    pub host: String,
    /// HTTP port
    pub port: u16,
    /// Generated rows per table
    pub users_count: usize,
    pub companies_count: usize,
    pub departments_count: usize,
    /// Seed for the sample data generator
    pub data_seed: u64,
    /// Page size when a data request omits `limit`
    pub default_page_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            users_count: 100,
            companies_count: 37,
            departments_count: 10,
            data_seed: 42,
            default_page_limit: 100,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: env_or("PORT", defaults.port)?,
            users_count: env_or("USERS_COUNT", defaults.users_count)?,
            companies_count: env_or("COMPANIES_COUNT", defaults.companies_count)?,
            departments_count: env_or("DEPARTMENTS_COUNT", defaults.departments_count)?,
            data_seed: env_or("DATA_SEED", defaults.data_seed)?,
            default_page_limit: env_or("DEFAULT_PAGE_LIMIT", defaults.default_page_limit)?,
        })
    }

    /// Get socket address for binding
    pub fn bind_address(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| DvtError::Configuration(format!("Invalid bind address: {}", e)))
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_setting(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_setting<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| DvtError::Configuration(format!("Invalid {}: {}", key, e)))
}
