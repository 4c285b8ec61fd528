//! ONNX Runtime predictor
//!
//! Loads an exported regressor and runs it on a `1 x width` f32 tensor.
//! Only compiled with the `onnx` feature.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use crate::error::InferenceError;

use super::predictor::{OutputKind, Prediction, Predictor};

/// ONNX session wrapped as a numeric predictor.
///
/// `Session::run` needs exclusive access, so invocations of the same model
/// are serialized; different models still run in parallel.
pub struct OnnxRegressor {
    session: Mutex<Session>,
    output_name: String,
    width: usize,
}

impl OnnxRegressor {
    pub fn load(path: &Path, width: usize) -> Result<Self, InferenceError> {
        log::info!("Loading ONNX model from: {}", path.display());

        if !path.exists() {
            return Err(InferenceError::Model(format!("Model not found: {}", path.display())));
        }

        let session = Session::builder()
            .map_err(|e| InferenceError::Model(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError::Model(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(path)
            .map_err(|e| InferenceError::Model(format!("Failed to load model: {}", e)))?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError::Model("No output defined".to_string()))?;

        log::info!("ONNX model loaded successfully ({} inputs)", width);

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            width,
        })
    }
}

impl Predictor for OnnxRegressor {
    fn predict(&self, input: &[f64]) -> Result<Prediction, InferenceError> {
        if input.len() != self.width {
            return Err(InferenceError::ShapeMismatch {
                expected: self.width,
                actual: input.len(),
            });
        }

        let data: Vec<f32> = input.iter().map(|v| *v as f32).collect();
        let input_array = Array2::<f32>::from_shape_vec((1, self.width), data)
            .map_err(|e| InferenceError::Model(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError::Model(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Model(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| InferenceError::Model("No output".to_string()))?;

        let (_, values) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Model(format!("Extract error: {}", e)))?;

        values
            .first()
            .map(|v| Prediction::Numeric(f64::from(*v)))
            .ok_or_else(|| InferenceError::Model("Empty output tensor".to_string()))
    }

    fn output_kind(&self) -> OutputKind {
        OutputKind::Numeric
    }

    fn describe(&self) -> &str {
        "onnx"
    }
}
