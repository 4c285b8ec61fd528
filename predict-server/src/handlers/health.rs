//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    models: Vec<String>,
    worker_limit: usize,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        models: state.pipeline.registry().names().map(str::to_string).collect(),
        worker_limit: state.pipeline.config().worker_limit,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
