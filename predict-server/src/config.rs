//! Configuration module

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use machine_health_core::constants::{
    default_worker_limit, DEFAULT_MODELS_PATH, DEFAULT_REQUEST_TIMEOUT_SECS, MAX_BATCH_LEN,
};
use machine_health_core::PipelineConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Model manifest location
    pub models_path: PathBuf,

    /// Concurrent model invocations allowed across all requests
    pub worker_limit: usize,

    /// Per-request deadline in seconds (0 disables it)
    pub request_timeout_secs: u64,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),

            models_path: env::var("MODELS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODELS_PATH)),

            worker_limit: env::var("WORKER_LIMIT")
                .ok()
                .and_then(|w| w.parse().ok())
                .filter(|w| *w > 0)
                .unwrap_or_else(default_worker_limit),

            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Limits handed to the prediction pipeline
    pub fn pipeline_config(&self) -> PipelineConfig {
        let timeout = (self.request_timeout_secs > 0)
            .then(|| Duration::from_secs(self.request_timeout_secs));

        PipelineConfig {
            max_batch_len: MAX_BATCH_LEN,
            worker_limit: self.worker_limit,
            request_timeout: timeout,
        }
    }
}
