//! Error types for the prediction pipeline

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Main error type returned by a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The batch itself is malformed; nothing was invoked
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// A required feature is missing or not numeric for one model
    #[error("Invalid input for {model}_model: {source}")]
    InvalidFeature {
        model: String,
        #[source]
        source: FeatureError,
    },

    /// The model itself failed while predicting
    #[error("Prediction failed for {model}_model: {source}")]
    Prediction {
        model: String,
        #[source]
        source: InferenceError,
    },

    /// The per-request deadline expired
    #[error("Prediction timed out after {0:?}")]
    Timeout(Duration),

    /// Unexpected failure during fan-out, aggregation or analysis
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// Name of the model the error is attributed to, if any
    pub fn model(&self) -> Option<&str> {
        match self {
            PipelineError::InvalidFeature { model, .. } | PipelineError::Prediction { model, .. } => {
                Some(model.as_str())
            }
            _ => None,
        }
    }
}

/// Batch shape violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Input must be an array")]
    NotAnArray,

    #[error("Input array exceeds maximum length of {max}")]
    TooLong { len: usize, max: usize },

    #[error("Input array cannot be empty")]
    Empty,

    #[error("Reading at index {index} must be an object")]
    NotAnObject { index: usize },
}

/// A single feature could not be read from a reading
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    #[error("missing feature '{0}'")]
    Missing(String),

    #[error("feature '{name}' is not numeric: {value}")]
    NotNumeric { name: String, value: String },
}

/// Failure raised by a predictor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("expected {expected} input values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("{0}")]
    Model(String),
}

/// Registry construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("model '{0}' is registered twice")]
    DuplicateModel(String),

    #[error("model '{0}' declares no input features")]
    NoFeatures(String),
}

/// Model manifest loading errors
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("manifest does not define model '{0}'")]
    MissingModel(String),

    #[error("manifest defines model '{0}' more than once")]
    DuplicateModel(String),

    #[error("manifest defines unknown model '{0}'")]
    UnknownModel(String),

    #[error("model '{model}' expects {expected} weights, manifest has {actual}")]
    WidthMismatch {
        model: String,
        expected: usize,
        actual: usize,
    },

    #[error("failed to load predictor for '{model}': {source}")]
    Predictor {
        model: String,
        #[source]
        source: InferenceError,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
