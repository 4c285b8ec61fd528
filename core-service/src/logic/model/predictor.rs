//! Predictor contract
//!
//! Models are opaque: each one takes a fixed-order numeric vector and returns
//! a single numeric or categorical value.

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

// ============================================================================
// PREDICTION
// ============================================================================

/// Kind of value a model produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Numeric,
    Categorical,
}

impl OutputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::Numeric => "numeric",
            OutputKind::Categorical => "categorical",
        }
    }
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One model output for one reading. Serialized untagged: a JSON number or
/// a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Prediction {
    Numeric(f64),
    Categorical(String),
}

impl Prediction {
    pub fn kind(&self) -> OutputKind {
        match self {
            Prediction::Numeric(_) => OutputKind::Numeric,
            Prediction::Categorical(_) => OutputKind::Categorical,
        }
    }

    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Prediction::Numeric(value) => Some(*value),
            Prediction::Categorical(_) => None,
        }
    }

    /// String form used when a series is aggregated as labels.
    /// Numbers keep their decimal point (`1.0`, not `1`).
    pub fn label(&self) -> String {
        match self {
            Prediction::Numeric(value) => format!("{:?}", value),
            Prediction::Categorical(label) => label.clone(),
        }
    }
}

impl From<f64> for Prediction {
    fn from(value: f64) -> Self {
        Prediction::Numeric(value)
    }
}

impl From<&str> for Prediction {
    fn from(label: &str) -> Self {
        Prediction::Categorical(label.to_string())
    }
}

// ============================================================================
// PREDICTOR TRAIT
// ============================================================================

/// A loaded model. Implementations must be safe to call from several worker
/// threads at once.
pub trait Predictor: Send + Sync {
    /// Run the model on one ordered input vector
    fn predict(&self, input: &[f64]) -> Result<Prediction, InferenceError>;

    /// The kind every successful `predict` call returns
    fn output_kind(&self) -> OutputKind;

    /// Short implementation name for logs
    fn describe(&self) -> &str {
        "predictor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_label_keeps_decimal_point() {
        assert_eq!(Prediction::Numeric(1.0).label(), "1.0");
        assert_eq!(Prediction::Numeric(2.5).label(), "2.5");
        assert_eq!(Prediction::from("normal").label(), "normal");
    }

    #[test]
    fn test_prediction_serializes_untagged() {
        let numeric = serde_json::to_value(Prediction::Numeric(65.0)).unwrap();
        let label = serde_json::to_value(Prediction::from("unbalance")).unwrap();

        assert_eq!(numeric, serde_json::json!(65.0));
        assert_eq!(label, serde_json::json!("unbalance"));
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Prediction::Numeric(0.0).kind(), OutputKind::Numeric);
        assert_eq!(Prediction::from("x").kind(), OutputKind::Categorical);
        assert_eq!(Prediction::from("x").as_numeric(), None);
    }
}
