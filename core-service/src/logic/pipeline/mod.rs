//! Pipeline Module
//!
//! Batch orchestration: validate, fan out every model per reading, fan in,
//! aggregate across the batch, extract feature modes, analyze health.
//!
//! ## Structure
//! - `types`: `Reading`, `Batch`, `BatchResult`
//! - `config`: `PipelineConfig`
//! - `fanout`: per-reading concurrent model execution
//! - `aggregate`: mean / mode per model
//! - `modes`: first-seen mode per raw feature
//! - `orchestrator`: `Pipeline` and its state machine
//!
//! ## Usage
//! ```ignore
//! let registry = Arc::new(load_registry("models/manifest.json")?);
//! let pipeline = Pipeline::new(registry, PipelineConfig::default());
//!
//! let result = pipeline.process(payload).await?;
//! println!("{}", result.analysis_summary.machine_condition);
//! ```

pub mod types;
pub mod config;
pub mod fanout;
pub mod aggregate;
pub mod modes;
pub mod orchestrator;


pub use types::{AggregatedResult, Batch, BatchResult, ModeValues, Reading, ReadingPredictions};
pub use config::PipelineConfig;
pub use fanout::FanOutExecutor;
pub use aggregate::{aggregate_predictions, aggregate_series};
pub use modes::{extract_modes, float_mode, most_common};
pub use orchestrator::{Pipeline, PipelineState};
