//! DVT Core - Shared model and service infrastructure for datasources
//!
//! This crate provides:
//! - The datasource model exchanged with the data validation tool
//!   (tables, columns, metadata, column data, cell values)
//! - Error handling utilities
//! - Standard service trait and runtime for datasource services

pub mod error;
pub mod model;
pub mod service;

pub use error::{DvtError, Result};
pub use model::*;
pub use service::{DatasourceService, DependencyStatus, HealthStatus, MicroserviceRuntime, ReadinessStatus};
