use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::{FieldViolation, ServiceError};
use thiserror::Error;
use tracing::{error, warn};

/// Error body returned by every company endpoint.
///
/// Serialized as `{"error": title, "detail": ..., "violations": [...]}`;
/// `detail` and `violations` are omitted when empty.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
    pub violations: Vec<FieldViolation>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail, violations: Vec::new() }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(detail.into()))
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let detail = Some(e.to_string());
        match e {
            ServiceError::Validation(violations) => Self {
                status: StatusCode::BAD_REQUEST,
                title: "Validation Failed",
                detail,
                violations,
            },
            ServiceError::DuplicateKey(_) => Self::new(StatusCode::BAD_REQUEST, "Duplicate Key", detail),
            ServiceError::IdentityMismatch { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "Identity Mismatch", detail)
            }
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "Not Found", detail),
            ServiceError::Db(msg) => {
                error!(error = %msg, "storage failure");
                // Storage internals stay in the log.
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            warn!(status = %self.status, title = self.title, detail = ?self.detail, "request rejected");
        }
        let mut body = serde_json::json!({ "error": self.title });
        if let Some(detail) = self.detail {
            body["detail"] = serde_json::Value::String(detail);
        }
        if !self.violations.is_empty() {
            body["violations"] = serde_json::json!(self.violations);
        }
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
