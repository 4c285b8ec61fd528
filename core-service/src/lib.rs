//! Machine Health Core
//!
//! Batch prediction pipeline for multi-sensor condition monitoring.
//!
//! A batch of readings runs through five models (temperature, vibration,
//! magnetic flux, audible sound, ultra sound). Per-reading outputs are
//! aggregated across the batch, the mode of every raw feature is taken, and
//! a rule-based health report is derived from those modes.

pub mod constants;
pub mod error;
pub mod logic;

pub use error::{
    FeatureError, InferenceError, ManifestError, PipelineError, PipelineResult, RegistryError,
    ShapeError,
};

pub use logic::model::{
    load_registry, Band, BandedClassifier, LinearRegressor, ModelManifest, ModelRegistry,
    ModelSpec, OutputKind, Prediction, Predictor,
};

pub use logic::pipeline::{Batch, BatchResult, Pipeline, PipelineConfig, Reading};

pub use logic::health::{HealthReport, MachineCondition, OverallHealth};
