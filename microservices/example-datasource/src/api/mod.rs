//! Example Datasource REST API

pub mod handlers;
pub mod routes;

use std::sync::Arc;

use crate::service::ExampleDatasource;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ExampleDatasource>,
}

impl AppState {
    pub fn new(service: Arc<ExampleDatasource>) -> Self {
        Self { service }
    }
}

pub use routes::create_router;
