//! Example Datasource
//!
//! Sample datasource for the data validation tool:
//! - Static catalog of three tables (users, companies, departments)
//! - Per-column extractors over the domain records
//! - Paged key/value column data and table sizes over REST
//! - Seeded in-memory sample data

use std::sync::Arc;

use dvt_core::MicroserviceRuntime;
use tracing::info;

mod api;
mod catalog;
mod config;
mod controller;
mod data;
mod error;
mod records;
mod service;


pub use config::Config;
pub use controller::DatasourceController;
pub use service::{build_controller, ExampleDatasource, SERVICE_ID};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let telemetry = dvt_telemetry::init(SERVICE_ID)?;

    info!(service = %telemetry.service_name, "Starting Example Datasource");

    let service = Arc::new(ExampleDatasource::new(Config::from_env()?)?);
    MicroserviceRuntime::run(service).await?;

    Ok(())
}
