//! Pipeline Types
//!
//! Readings, batches and the assembled batch result.
//! No processing logic beyond feature coercion and shape validation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FeatureError, ShapeError};
use crate::logic::health::HealthReport;
use crate::logic::model::Prediction;

/// Aggregated prediction per model name, in registry order
pub type AggregatedResult = IndexMap<String, Prediction>;

/// Most frequent value per raw feature, in first-declared order
pub type ModeValues = IndexMap<String, f64>;

/// Predictions of every model for one reading, in registry order
pub type ReadingPredictions = IndexMap<String, Prediction>;

// ============================================================================
// READING
// ============================================================================

/// One point-in-time sensor sample.
///
/// Values are kept as received and coerced to `f64` only when a model asks
/// for them, so a bad value fails the invocation that needs it rather than
/// the whole decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reading(Map<String, Value>);

impl Reading {
    /// Read one feature as a number
    pub fn feature(&self, name: &str) -> Result<f64, FeatureError> {
        let value = self
            .0
            .get(name)
            .ok_or_else(|| FeatureError::Missing(name.to_string()))?;

        coerce_f64(value).ok_or_else(|| FeatureError::NotNumeric {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Read several features, in the given order
    pub fn extract<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<f64>, FeatureError> {
        names.iter().map(|name| self.feature(name.as_ref())).collect()
    }
}

/// Numbers, numeric strings and booleans are accepted. Results are always
/// finite, so `"inf"` and `"nan"` are not numeric here.
fn coerce_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };
    number.filter(|n| n.is_finite())
}

// ============================================================================
// BATCH
// ============================================================================

/// A validated, non-empty, length-capped sequence of readings
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    readings: Vec<Reading>,
}

impl Batch {
    /// Validate a raw JSON payload.
    ///
    /// Checks run in a fixed order: array, length cap, emptiness, then each
    /// element's type.
    pub fn from_value(payload: Value, max_len: usize) -> Result<Self, ShapeError> {
        let Value::Array(items) = payload else {
            return Err(ShapeError::NotAnArray);
        };
        check_len(items.len(), max_len)?;

        let readings = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(fields) => Ok(Reading(fields)),
                _ => Err(ShapeError::NotAnObject { index }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { readings })
    }

    /// Validate already-decoded readings
    pub fn from_readings(readings: Vec<Reading>, max_len: usize) -> Result<Self, ShapeError> {
        check_len(readings.len(), max_len)?;
        Ok(Self { readings })
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Always false for a constructed batch
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reading> {
        self.readings.iter()
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }
}

fn check_len(len: usize, max_len: usize) -> Result<(), ShapeError> {
    if len > max_len {
        return Err(ShapeError::TooLong { len, max: max_len });
    }
    if len == 0 {
        return Err(ShapeError::Empty);
    }
    Ok(())
}

// ============================================================================
// RESULT
// ============================================================================

/// Full result of one batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub predictions: AggregatedResult,
    pub modes: ModeValues,
    #[serde(rename = "Analysis_summary")]
    pub analysis_summary: HealthReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reading(value: Value) -> Reading {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_feature_coercion() {
        let r = reading(json!({
            "a": 1.5,
            "b": 2,
            "c": " 3.25 ",
            "d": true,
        }));

        assert_eq!(r.feature("a"), Ok(1.5));
        assert_eq!(r.feature("b"), Ok(2.0));
        assert_eq!(r.feature("c"), Ok(3.25));
        assert_eq!(r.feature("d"), Ok(1.0));
    }

    #[test]
    fn test_feature_errors() {
        let r = reading(json!({"a": "hot", "b": null, "c": [1]}));

        assert_eq!(r.feature("missing"), Err(FeatureError::Missing("missing".into())));
        assert!(matches!(r.feature("a"), Err(FeatureError::NotNumeric { .. })));
        assert!(matches!(r.feature("b"), Err(FeatureError::NotNumeric { .. })));
        assert!(matches!(r.feature("c"), Err(FeatureError::NotNumeric { .. })));
    }

    #[test]
    fn test_non_finite_strings_rejected() {
        let r = reading(json!({"a": "inf", "b": "NaN", "c": "-infinity", "d": "1e400"}));

        for name in ["a", "b", "c", "d"] {
            assert!(
                matches!(r.feature(name), Err(FeatureError::NotNumeric { .. })),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_from_readings_checks_length() {
        let readings = vec![reading(json!({"a": 1})), reading(json!({"a": 2}))];

        assert_eq!(Batch::from_readings(Vec::new(), 10), Err(ShapeError::Empty));
        assert_eq!(
            Batch::from_readings(readings.clone(), 1),
            Err(ShapeError::TooLong { len: 2, max: 1 })
        );
        assert_eq!(Batch::from_readings(readings, 2).map(|batch| batch.len()), Ok(2));
    }

    #[test]
    fn test_extract_keeps_declared_order() {
        let r = reading(json!({"z": 3, "x": 1, "y": 2}));
        assert_eq!(r.extract(&["x", "y", "z"]), Ok(vec![1.0, 2.0, 3.0]));
        assert_eq!(r.extract(&["z", "x"]), Ok(vec![3.0, 1.0]));
    }

    #[test]
    fn test_batch_shape_checks() {
        assert_eq!(Batch::from_value(json!({"a": 1}), 10), Err(ShapeError::NotAnArray));
        assert_eq!(Batch::from_value(json!("text"), 10), Err(ShapeError::NotAnArray));
        assert_eq!(Batch::from_value(json!([]), 10), Err(ShapeError::Empty));
        assert_eq!(
            Batch::from_value(json!([{}, {}, {}]), 2),
            Err(ShapeError::TooLong { len: 3, max: 2 })
        );
        assert_eq!(
            Batch::from_value(json!([{}, 5]), 10),
            Err(ShapeError::NotAnObject { index: 1 })
        );

        let batch = Batch::from_value(json!([{"a": 1}, {"a": 2}]), 10).unwrap();
        assert_eq!(batch.len(), 2);
        assert!(!batch.is_empty());
    }

    #[test]
    fn test_length_cap_checked_before_element_types() {
        let payload = Value::Array(vec![json!(1); 5]);
        assert_eq!(
            Batch::from_value(payload, 4),
            Err(ShapeError::TooLong { len: 5, max: 4 })
        );
    }

    #[test]
    fn test_shape_messages() {
        assert_eq!(ShapeError::NotAnArray.to_string(), "Input must be an array");
        assert_eq!(ShapeError::Empty.to_string(), "Input array cannot be empty");
        assert_eq!(
            ShapeError::TooLong { len: 1801, max: 1800 }.to_string(),
            "Input array exceeds maximum length of 1800"
        );
    }
}
