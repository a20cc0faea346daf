use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog::CatalogError;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    #[error("{}", .0.body_text())]
    InvalidQuery(#[from] QueryRejection),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Metrics are disabled")]
    MetricsDisabled,

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Catalog(err) => match err {
                CatalogError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
                CatalogError::InvalidParameter { .. } | CatalogError::InvalidProduct(_) => {
                    StatusCode::BAD_REQUEST
                }
                CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                CatalogError::Conflict(_) => StatusCode::CONFLICT,
            },
            ServerError::InvalidBody(rejection) => rejection.status(),
            ServerError::InvalidQuery(rejection) => rejection.status(),
            ServerError::NotFound | ServerError::MetricsDisabled => StatusCode::NOT_FOUND,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::Catalog(err) => match err {
                CatalogError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
                CatalogError::InvalidParameter { .. } => "INVALID_PARAMETER",
                CatalogError::InvalidProduct(_) => "INVALID_PRODUCT",
                CatalogError::NotFound(_) => "NOT_FOUND",
                CatalogError::Conflict(_) => "CONFLICT",
            },
            ServerError::InvalidBody(_) => "INVALID_BODY",
            ServerError::InvalidQuery(_) => "INVALID_QUERY",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::MetricsDisabled | ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %message, "request failed");
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {err}"))
    }
}
