//! Datasource request handler
//!
//! Resolves the requested table and column against the registry, picks the
//! key and value extractors, pages records from the table's data service and
//! assembles the paired key/value result.

use std::sync::Arc;
use std::time::Instant;

use dvt_core::{
    ColumnData, ColumnRef, DatasourceColumn, DatasourceMetadata, DatasourceTable, DependencyStatus, DvtError, Result,
};
use tracing::{debug, warn};

use crate::catalog::{ExtractorTable, SchemaRegistry};
use crate::data::{DataService, DataServices};

#[derive(Clone)]
pub struct DatasourceController {
    registry: Arc<SchemaRegistry>,
    extractors: Arc<ExtractorTable>,
    services: Arc<DataServices>,
}

impl DatasourceController {
    /// Wire the controller, failing if any catalog table lacks a data service
    pub fn new(registry: SchemaRegistry, extractors: ExtractorTable, services: DataServices) -> Result<Self> {
        if let Some(table) = registry.tables().find(|t| !services.contains_key(&t.name)) {
            return Err(DvtError::configuration(format!(
                "No data service registered for table {}",
                table.name
            )));
        }

        Ok(Self {
            registry: Arc::new(registry),
            extractors: Arc::new(extractors),
            services: Arc::new(services),
        })
    }

    pub fn get_metadata(&self) -> DatasourceMetadata {
        self.registry.metadata().clone()
    }

    pub async fn get_data(&self, column: &ColumnRef, offset: usize, limit: usize) -> Result<ColumnData> {
        let table = self.resolve_table(&column.table_name)?;
        let key_column = self.resolve_column(table, &table.primary_key)?;
        let value_column = self.resolve_column(table, &column.column_name)?;

        let key_extractor = self.extractors.get_extractor(key_column)?;
        let value_extractor = self.extractors.get_extractor(value_column)?;

        let records = self.service(table)?.get_page(offset, limit).await?;

        let mut data = ColumnData::with_capacity(key_column.clone(), value_column.clone(), records.len());
        for record in &records {
            data.push(key_extractor.extract(record)?, value_extractor.extract(record)?);
        }

        debug!(
            table = %table.name,
            column = %value_column.name,
            offset,
            limit,
            rows = data.len(),
            "Column data served"
        );

        Ok(data)
    }

    /// Row count of a table. The column, when given, must exist but does not
    /// affect the result.
    pub async fn get_size(&self, table_name: &str, column_name: Option<&str>) -> Result<u64> {
        let table = self.resolve_table(table_name)?;
        if let Some(column_name) = column_name {
            self.resolve_column(table, column_name)?;
        }

        self.service(table)?.count().await
    }

    /// Probe every data service with a count
    pub async fn check_services(&self) -> Vec<DependencyStatus> {
        let mut statuses = Vec::with_capacity(self.services.len());
        for table in self.registry.tables() {
            let started = Instant::now();
            let available = match self.service(table) {
                Ok(service) => match service.count().await {
                    Ok(_) => true,
                    Err(e) => {
                        warn!(table = %table.name, error = %e, "Data service unavailable");
                        false
                    }
                },
                Err(_) => false,
            };
            statuses.push(DependencyStatus {
                name: format!("{}-data-service", table.name),
                available,
                latency_ms: Some(started.elapsed().as_millis() as u64),
            });
        }
        statuses
    }

    fn resolve_table(&self, name: &str) -> Result<&DatasourceTable> {
        self.registry.get_table(name).ok_or_else(|| {
            DvtError::invalid_request(format!("Table with table name: {} wasn't found", name))
        })
    }

    fn resolve_column<'a>(&'a self, table: &'a DatasourceTable, name: &str) -> Result<&'a DatasourceColumn> {
        self.registry.get_column(table, name).ok_or_else(|| {
            DvtError::invalid_request(format!(
                "Column with column name: {} wasn't found for table: {}",
                name, table.name
            ))
        })
    }

    fn service(&self, table: &DatasourceTable) -> Result<&Arc<dyn DataService>> {
        self.services.get(&table.name).ok_or_else(|| {
            DvtError::configuration(format!("No data service registered for table {}", table.name))
        })
    }
}
