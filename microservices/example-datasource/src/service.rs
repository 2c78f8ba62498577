//! Example datasource service: wiring and lifecycle

use std::sync::Arc;
use std::time::Instant;

use dvt_core::{DatasourceService, HealthStatus, ReadinessStatus, Result};
use tracing::info;

use crate::api::{self, AppState};
use crate::catalog::{ExtractorTable, SchemaRegistry, COMPANIES_TABLE, DEPARTMENTS_TABLE, USERS_TABLE};
use crate::config::Config;
use crate::controller::DatasourceController;
use crate::data::{DataService, DataServices, InMemoryDataService, SampleDataGenerator};
use crate::records::Record;

pub const SERVICE_ID: &str = "example-datasource";

/// Build the registry, extractors and data services, and check that they
/// agree before any request is served.
pub fn build_controller(config: &Config) -> Result<DatasourceController> {
    let registry = SchemaRegistry::new()?;
    let extractors = ExtractorTable::new();

    let data = SampleDataGenerator::new(config.data_seed).generate(
        config.users_count,
        config.companies_count,
        config.departments_count,
    );

    let tables = [
        (USERS_TABLE, InMemoryDataService::new(data.users.into_iter().map(Record::from).collect())),
        (COMPANIES_TABLE, InMemoryDataService::new(data.companies.into_iter().map(Record::from).collect())),
        (DEPARTMENTS_TABLE, InMemoryDataService::new(data.departments.into_iter().map(Record::from).collect())),
    ];

    let samples: Vec<Record> = tables.iter().filter_map(|(_, s)| s.first().cloned()).collect();
    extractors.validate(&registry, &samples)?;
    info!(extractors = extractors.len(), "Extractors validated");

    let mut services = DataServices::new();
    for (table, service) in tables {
        info!(table, "Registering data service");
        services.insert(table.to_string(), Arc::new(service) as Arc<dyn DataService>);
    }

    DatasourceController::new(registry, extractors, services)
}

pub struct ExampleDatasource {
    config: Config,
    controller: DatasourceController,
    start_time: Instant,
}

impl ExampleDatasource {
    /// Generate sample data for `config` and wire the controller
    pub fn new(config: Config) -> Result<Self> {
        let controller = build_controller(&config)?;

        info!(
            users = config.users_count,
            companies = config.companies_count,
            departments = config.departments_count,
            seed = config.data_seed,
            "Sample data generated"
        );

        Ok(Self::with_controller(config, controller))
    }

    pub fn with_controller(config: Config, controller: DatasourceController) -> Self {
        Self {
            config,
            controller,
            start_time: Instant::now(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn controller(&self) -> &DatasourceController {
        &self.controller
    }
}

#[async_trait::async_trait]
impl DatasourceService for ExampleDatasource {
    fn service_id(&self) -> &'static str {
        SERVICE_ID
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    async fn health(&self) -> HealthStatus {
        HealthStatus {
            healthy: true,
            service_id: self.service_id().to_string(),
            version: self.version().to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    async fn ready(&self) -> ReadinessStatus {
        let dependencies = self.controller.check_services().await;
        ReadinessStatus {
            ready: dependencies.iter().all(|d| d.available),
            dependencies,
        }
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down Example Datasource");
        Ok(())
    }

    async fn start(self: Arc<Self>) -> Result<()> {
        let bind_addr = self.config.bind_address()?;
        let listener = tokio::net::TcpListener::bind(bind_addr).await?;
        info!("Example Datasource listening on {}", bind_addr);

        let app = api::create_router(AppState::new(self));
        axum::serve(listener, app).await?;

        Ok(())
    }
}
