//! Error types for datasource services

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DvtError>;

#[derive(Error, Debug)]
pub enum DvtError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Data service error: {0}")]
    DataService(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DvtError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) => 400,
            Self::DataService(_) => 502,
            _ => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Configuration(_) => "CONFIG_ERROR",
            Self::DataService(_) => "DATA_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }

    /// Whether the failure was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(DvtError::invalid_request("no table").status_code(), 400);
        assert_eq!(DvtError::DataService("down".into()).status_code(), 502);
        assert_eq!(DvtError::configuration("drift").status_code(), 500);
        assert_eq!(DvtError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn test_client_error_classification() {
        assert!(DvtError::invalid_request("bad").is_client_error());
        assert!(!DvtError::configuration("bad").is_client_error());
        assert_eq!(DvtError::configuration("bad").error_code(), "CONFIG_ERROR");
    }
}
