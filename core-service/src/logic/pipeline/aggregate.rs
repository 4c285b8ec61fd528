//! Batch Aggregator
//!
//! Collapses each model's per-reading predictions into one value:
//! mean for numeric models, most common label otherwise.

use crate::error::{PipelineError, PipelineResult};
use crate::logic::model::{ModelRegistry, OutputKind, Prediction};

use super::modes::most_common;
use super::types::{AggregatedResult, ReadingPredictions};

/// Aggregate every registered model over the batch, in registry order
pub fn aggregate_predictions(
    registry: &ModelRegistry,
    per_reading: &[ReadingPredictions],
) -> PipelineResult<AggregatedResult> {
    registry
        .specs()
        .iter()
        .map(|spec| {
            let name = spec.name();
            let series = per_reading
                .iter()
                .map(|predictions| {
                    predictions.get(name).ok_or_else(|| {
                        PipelineError::Internal(format!("no prediction recorded for '{}'", name))
                    })
                })
                .collect::<PipelineResult<Vec<&Prediction>>>()?;

            let value = aggregate_series(spec.output_kind(), &series).ok_or_else(|| {
                PipelineError::Internal(format!("no predictions to aggregate for '{}'", name))
            })?;

            Ok((name.to_string(), value))
        })
        .collect()
}

/// Aggregate one model's series. `None` for an empty series.
///
/// A numeric model whose series contains a label falls back to the label
/// mode rather than failing.
pub fn aggregate_series(kind: OutputKind, series: &[&Prediction]) -> Option<Prediction> {
    if series.is_empty() {
        return None;
    }

    if kind == OutputKind::Numeric {
        let numbers: Option<Vec<f64>> = series.iter().map(|p| p.as_numeric()).collect();
        match numbers {
            Some(numbers) => return Some(Prediction::Numeric(mean(&numbers))),
            None => log::warn!("Numeric model produced a categorical value; aggregating by mode"),
        }
    }

    most_common(series.iter().map(|p| p.label())).map(Prediction::Categorical)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::{LinearRegressor, ModelSpec, Predictor};
    use std::sync::Arc;

    #[test]
    fn test_numeric_series_is_mean_not_mode() {
        let series = [
            Prediction::Numeric(1.0),
            Prediction::Numeric(1.0),
            Prediction::Numeric(4.0),
        ];
        let refs: Vec<&Prediction> = series.iter().collect();

        assert_eq!(aggregate_series(OutputKind::Numeric, &refs), Some(Prediction::Numeric(2.0)));
    }

    #[test]
    fn test_categorical_series_is_first_seen_mode() {
        let series = [
            Prediction::from("unbalance"),
            Prediction::from("normal"),
            Prediction::from("normal"),
            Prediction::from("unbalance"),
        ];
        let refs: Vec<&Prediction> = series.iter().collect();

        assert_eq!(
            aggregate_series(OutputKind::Categorical, &refs),
            Some(Prediction::from("unbalance"))
        );
    }

    #[test]
    fn test_mixed_series_falls_back_to_labels() {
        let series = [
            Prediction::Numeric(1.0),
            Prediction::from("1.0"),
            Prediction::from("spike"),
        ];
        let refs: Vec<&Prediction> = series.iter().collect();

        assert_eq!(aggregate_series(OutputKind::Numeric, &refs), Some(Prediction::from("1.0")));
    }

    #[test]
    fn test_categorical_model_with_numbers_uses_labels() {
        let series = [Prediction::Numeric(2.0), Prediction::Numeric(3.0), Prediction::Numeric(3.0)];
        let refs: Vec<&Prediction> = series.iter().collect();

        assert_eq!(
            aggregate_series(OutputKind::Categorical, &refs),
            Some(Prediction::from("3.0"))
        );
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(aggregate_series(OutputKind::Numeric, &[]), None);
    }

    #[test]
    fn test_aggregate_predictions_in_registry_order() {
        let mut registry = ModelRegistry::new();
        for name in ["b", "a"] {
            let predictor: Arc<dyn Predictor> = Arc::new(LinearRegressor::new(vec![1.0], 0.0));
            registry.register(ModelSpec::new(name, ["x"], predictor)).unwrap();
        }

        let per_reading: Vec<ReadingPredictions> = [(1.0, 10.0), (3.0, 20.0)]
            .into_iter()
            .map(|(a, b)| {
                let mut predictions = ReadingPredictions::new();
                predictions.insert("a".to_string(), Prediction::Numeric(a));
                predictions.insert("b".to_string(), Prediction::Numeric(b));
                predictions
            })
            .collect();

        let aggregated = aggregate_predictions(&registry, &per_reading).unwrap();
        let keys: Vec<&str> = aggregated.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(aggregated["a"], Prediction::Numeric(2.0));
        assert_eq!(aggregated["b"], Prediction::Numeric(15.0));
    }

    #[test]
    fn test_missing_prediction_is_internal() {
        let mut registry = ModelRegistry::new();
        let predictor: Arc<dyn Predictor> = Arc::new(LinearRegressor::new(vec![1.0], 0.0));
        registry.register(ModelSpec::new("a", ["x"], predictor)).unwrap();

        let result = aggregate_predictions(&registry, &[ReadingPredictions::new()]);
        assert!(matches!(result, Err(PipelineError::Internal(_))));
    }
}
