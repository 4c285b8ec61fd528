//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use machine_health_core::PipelineError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Request body could not be read as JSON
    #[error("{0}")]
    ValidationError(String),

    // Anything the pipeline reports
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Pipeline(PipelineError::Shape(_)) => StatusCode::BAD_REQUEST,
            AppError::Pipeline(PipelineError::InvalidFeature { .. })
            | AppError::Pipeline(PipelineError::Prediction { .. })
            | AppError::Pipeline(PipelineError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Pipeline(PipelineError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::Pipeline(PipelineError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Pipeline(err @ PipelineError::Shape(_)) => err.to_string(),
            AppError::Pipeline(err) => {
                tracing::error!("Error during prediction: {}", err);
                err.to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
