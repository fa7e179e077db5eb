//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::logic::PipelineError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// Artifacts never loaded; the service is degraded
    ModelUnavailable,

    /// Request rejected by the validator; carries every violation
    ValidationFailed(Vec<String>),

    /// Internal consistency errors (should not occur in normal operation)
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match self {
            AppError::ModelUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Model artifacts are not available",
                None,
            ),
            AppError::ValidationFailed(errors) => {
                (StatusCode::BAD_REQUEST, "Invalid features provided", Some(errors))
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
            }
        };

        let mut body = json!({
            "error": error_message,
            "status": status.as_u16()
        });
        if let Some(details) = details {
            body["details"] = json!(details);
        }

        (status, Json(body)).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::ModelUnavailable => AppError::ModelUnavailable,
            PipelineError::Validation(errors) => AppError::ValidationFailed(errors),
            PipelineError::FieldMissing(_) | PipelineError::DimensionMismatch { .. } => {
                AppError::InternalError(err.to_string())
            }
        }
    }
}
