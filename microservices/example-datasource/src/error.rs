//! HTTP mapping of datasource errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dvt_core::DvtError;
use serde_json::json;

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DvtError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_client_error() {
            tracing::debug!(error = %self.0, "Rejected request");
            self.0.to_string()
        } else if let DvtError::DataService(_) = self.0 {
            tracing::warn!(error = %self.0, "Data service failed");
            self.0.to_string()
        } else {
            tracing::error!("Internal error: {:?}", self.0);
            "Internal server error".to_string()
        };

        let body = Json(json!({
            "error": message,
            "type": self.0.error_code(),
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}
