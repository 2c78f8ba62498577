//! HTTP handlers for the Example Datasource API

use axum::{
    extract::{Query, State},
    Json,
};
use dvt_core::{ColumnData, ColumnRef, DatasourceMetadata, DatasourceService, HealthStatus, ReadinessStatus};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::Result;

/// Query of `GET /data`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQuery {
    pub table_name: String,
    pub column_name: String,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

/// Query of `GET /size`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeQuery {
    pub table_name: String,
    pub column_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SizeResponse {
    pub size: u64,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.service.health().await)
}

pub async fn ready(State(state): State<AppState>) -> Json<ReadinessStatus> {
    Json(state.service.ready().await)
}

pub async fn get_metadata(State(state): State<AppState>) -> Json<DatasourceMetadata> {
    Json(state.service.controller().get_metadata())
}

pub async fn get_data(
    State(state): State<AppState>,
    Query(query): Query<DataQuery>,
) -> Result<Json<ColumnData>> {
    let column = ColumnRef::new(&query.table_name, &query.column_name);
    let offset = query.offset.unwrap_or(0);
    let limit = query.limit.unwrap_or(state.service.config().default_page_limit);

    let data = state.service.controller().get_data(&column, offset, limit).await?;
    Ok(Json(data))
}

pub async fn get_size(
    State(state): State<AppState>,
    Query(query): Query<SizeQuery>,
) -> Result<Json<SizeResponse>> {
    let size = state
        .service
        .controller()
        .get_size(&query.table_name, query.column_name.as_deref())
        .await?;
    Ok(Json(SizeResponse { size }))
}
