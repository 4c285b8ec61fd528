//! Batch prediction handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use machine_health_core::BatchResult;

use crate::{AppError, AppResult, AppState};

/// Run a batch of readings through every model
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<BatchResult>> {
    let Json(payload) = payload.map_err(|rejection| AppError::ValidationError(rejection.body_text()))?;

    match payload.as_array() {
        Some(readings) => tracing::info!("Received batch of {} readings", readings.len()),
        None => tracing::info!("Received non-array prediction payload"),
    }

    let result = state.pipeline.process(payload).await?;

    tracing::debug!(
        "Batch result: {} ({})",
        result.analysis_summary.machine_condition,
        if result.analysis_summary.is_healthy() { "healthy" } else { "unhealthy" }
    );

    Ok(Json(result))
}
