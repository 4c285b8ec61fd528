//! Model Registry
//!
//! Named predictors bound to their ordered input features.
//! Built once at startup and shared read-only afterwards.

use std::sync::Arc;

use crate::constants::STANDARD_MODELS;
use crate::error::{PipelineError, PipelineResult, RegistryError};
use crate::logic::pipeline::Reading;

use super::predictor::{OutputKind, Prediction, Predictor};

// ============================================================================
// MODEL SPEC
// ============================================================================

/// A named predictor plus its required features
pub struct ModelSpec {
    name: String,
    features: Vec<String>,
    predictor: Arc<dyn Predictor>,
}

impl ModelSpec {
    pub fn new<I, S>(name: impl Into<String>, features: I, predictor: Arc<dyn Predictor>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            features: features.into_iter().map(Into::into).collect(),
            predictor,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn output_kind(&self) -> OutputKind {
        self.predictor.output_kind()
    }

    /// Build this model's input vector from a reading
    pub fn prepare(&self, reading: &Reading) -> PipelineResult<Vec<f64>> {
        reading
            .extract(&self.features)
            .map_err(|source| PipelineError::InvalidFeature {
                model: self.name.clone(),
                source,
            })
    }

    /// Run the predictor on a prepared input vector
    pub fn predict(&self, input: &[f64]) -> PipelineResult<Prediction> {
        self.predictor
            .predict(input)
            .map_err(|source| PipelineError::Prediction {
                model: self.name.clone(),
                source,
            })
    }

    /// Single-reading prediction: extract, then predict
    pub fn invoke(&self, reading: &Reading) -> PipelineResult<Prediction> {
        let input = self.prepare(reading)?;
        self.predict(&input)
    }
}

impl std::fmt::Debug for ModelSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSpec")
            .field("name", &self.name)
            .field("features", &self.features)
            .field("output", &self.output_kind())
            .field("predictor", &self.predictor.describe())
            .finish()
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

#[derive(Debug, Default)]
pub struct ModelRegistry {
    specs: Vec<Arc<ModelSpec>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the five standard models, asking `build` for each predictor
    /// in registry order.
    pub fn try_standard_with<E, F>(mut build: F) -> Result<Self, E>
    where
        E: From<RegistryError>,
        F: FnMut(&str, &[&str]) -> Result<Arc<dyn Predictor>, E>,
    {
        let mut registry = Self::new();
        for &(name, features) in STANDARD_MODELS {
            let predictor = build(name, features)?;
            registry.register(ModelSpec::new(name, features.iter().copied(), predictor))?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, spec: ModelSpec) -> Result<(), RegistryError> {
        if spec.features.is_empty() {
            return Err(RegistryError::NoFeatures(spec.name));
        }
        if self.get(&spec.name).is_some() {
            return Err(RegistryError::DuplicateModel(spec.name));
        }

        log::debug!(
            "Registered model '{}' ({} output, {} features)",
            spec.name,
            spec.output_kind(),
            spec.features.len()
        );
        self.specs.push(Arc::new(spec));
        Ok(())
    }

    pub fn specs(&self) -> &[Arc<ModelSpec>] {
        &self.specs
    }

    pub fn get(&self, name: &str) -> Option<&Arc<ModelSpec>> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|spec| spec.name())
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Every feature any model consumes, deduplicated, first-declared order
    pub fn mode_features(&self) -> Vec<String> {
        let mut features: Vec<String> = Vec::new();
        for feature in self.specs.iter().flat_map(|spec| spec.features.iter()) {
            if !features.contains(feature) {
                features.push(feature.clone());
            }
        }
        features
    }
}
