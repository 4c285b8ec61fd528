//! Model Module - predictor contract, built-in models and the registry
//!
//! ## Structure
//! - `predictor`: `Predictor` trait and the `Prediction` tagged value
//! - `builtin`: weight-vector models (linear, banded)
//! - `registry`: `ModelSpec` and `ModelRegistry`
//! - `manifest`: JSON manifest → standard registry
//! - `onnx`: ONNX Runtime predictor (feature `onnx`)

pub mod predictor;
pub mod builtin;
pub mod registry;
pub mod manifest;
#[cfg(feature = "onnx")]
pub mod onnx;

// Re-export common types
pub use predictor::{OutputKind, Prediction, Predictor};
pub use builtin::{Band, BandedClassifier, LinearRegressor};
pub use registry::{ModelRegistry, ModelSpec};
pub use manifest::{load_registry, ModelEntry, ModelManifest, PredictorDef};
#[cfg(feature = "onnx")]
pub use onnx::OnnxRegressor;
