//! Built-in predictors
//!
//! Small deterministic models described entirely by a weight vector, so a
//! manifest can define them without any model runtime.

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

use super::predictor::{OutputKind, Prediction, Predictor};

/// `w · x + b`, checking the input width first
fn weighted_sum(weights: &[f64], bias: f64, input: &[f64]) -> Result<f64, InferenceError> {
    if weights.len() != input.len() {
        return Err(InferenceError::ShapeMismatch {
            expected: weights.len(),
            actual: input.len(),
        });
    }

    let sum: f64 = weights.iter().zip(input).map(|(w, x)| w * x).sum();
    Ok(sum + bias)
}

// ============================================================================
// LINEAR REGRESSOR
// ============================================================================

/// Numeric output: `w · x + b`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressor {
    weights: Vec<f64>,
    bias: f64,
}

impl LinearRegressor {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    pub fn width(&self) -> usize {
        self.weights.len()
    }
}

impl Predictor for LinearRegressor {
    fn predict(&self, input: &[f64]) -> Result<Prediction, InferenceError> {
        weighted_sum(&self.weights, self.bias, input).map(Prediction::Numeric)
    }

    fn output_kind(&self) -> OutputKind {
        OutputKind::Numeric
    }

    fn describe(&self) -> &str {
        "linear"
    }
}

// ============================================================================
// BANDED CLASSIFIER
// ============================================================================

/// Label for scores strictly below `below`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub below: f64,
    pub label: String,
}

/// Categorical output: scores `w · x + b`, then returns the label of the
/// first band (in declared order) whose bound exceeds the score.
#[derive(Debug, Clone, PartialEq)]
pub struct BandedClassifier {
    weights: Vec<f64>,
    bias: f64,
    bands: Vec<Band>,
    otherwise: String,
}

impl BandedClassifier {
    pub fn new(weights: Vec<f64>, bias: f64, bands: Vec<Band>, otherwise: impl Into<String>) -> Self {
        Self {
            weights,
            bias,
            bands,
            otherwise: otherwise.into(),
        }
    }

    pub fn width(&self) -> usize {
        self.weights.len()
    }

    fn label_for(&self, score: f64) -> &str {
        self.bands
            .iter()
            .find(|band| score < band.below)
            .map(|band| band.label.as_str())
            .unwrap_or(&self.otherwise)
    }
}

impl Predictor for BandedClassifier {
    fn predict(&self, input: &[f64]) -> Result<Prediction, InferenceError> {
        let score = weighted_sum(&self.weights, self.bias, input)?;
        Ok(Prediction::Categorical(self.label_for(score).to_string()))
    }

    fn output_kind(&self) -> OutputKind {
        OutputKind::Categorical
    }

    fn describe(&self) -> &str {
        "banded"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vibration_bands() -> BandedClassifier {
        BandedClassifier::new(
            vec![1.0; 3],
            0.0,
            vec![
                Band { below: 3.0, label: "normal".into() },
                Band { below: 6.0, label: "unbalance".into() },
            ],
            "fault",
        )
    }

    #[test]
    fn test_linear_regressor() {
        let model = LinearRegressor::new(vec![0.5, 0.5], 1.0);
        assert_eq!(model.predict(&[60.0, 70.0]), Ok(Prediction::Numeric(66.0)));
        assert_eq!(model.output_kind(), OutputKind::Numeric);
    }

    #[test]
    fn test_width_mismatch() {
        let model = LinearRegressor::new(vec![1.0, 1.0], 0.0);
        assert_eq!(
            model.predict(&[1.0]),
            Err(InferenceError::ShapeMismatch { expected: 2, actual: 1 })
        );
    }

    #[test]
    fn test_banded_classifier_bounds_are_exclusive() {
        let model = vibration_bands();
        assert_eq!(model.predict(&[0.5, 0.5, 0.5]), Ok(Prediction::from("normal")));
        assert_eq!(model.predict(&[1.0, 1.0, 1.0]), Ok(Prediction::from("unbalance")));
        assert_eq!(model.predict(&[3.0, 3.0, 3.0]), Ok(Prediction::from("fault")));
        assert_eq!(model.output_kind(), OutputKind::Categorical);
    }
}
