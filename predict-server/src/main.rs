//! Machine Health Prediction Server
//!
//! Accepts batches of sensor readings and returns aggregated model
//! predictions, per-feature modes and a health summary.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  MACHINE HEALTH SERVER                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────────────────────────────┐  │
//! │  │  API      │   │  Pipeline (machine-health-core)      │  │
//! │  │  (Axum)   │──▶│  fan-out → aggregate → modes → rules │  │
//! │  └───────────┘   └──────────────────┬───────────────────┘  │
//! │                                     ▼                       │
//! │                          ┌─────────────────────┐           │
//! │                          │  Model Registry     │           │
//! │                          │  (manifest.json)    │           │
//! │                          └─────────────────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use machine_health_core::{load_registry, Pipeline};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging (JSON lines in production)
    let json_logs = config.is_production();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "machine_health_server=debug,machine_health_core=debug,tower_http=debug".into()
        }))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .init();

    tracing::info!("Machine Health server starting ({})...", config.environment);

    // Load models
    let registry = load_registry(&config.models_path)
        .with_context(|| format!("Failed to load models from {}", config.models_path.display()))?;
    tracing::info!(
        "Models: {}",
        registry.names().collect::<Vec<_>>().join(", ")
    );

    // Build application state
    let pipeline = Pipeline::new(Arc::new(registry), config.pipeline_config());
    let state = AppState {
        pipeline: Arc::new(pipeline),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
