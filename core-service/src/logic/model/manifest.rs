//! Model Manifest
//!
//! JSON description of the predictor behind each standard model.
//!
//! ```json
//! { "models": [
//!     { "name": "temperature",
//!       "predictor": { "type": "linear", "weights": [0.5, 0.5], "bias": 0.0 } }
//! ] }
//! ```
//!
//! Feature lists are not part of the manifest; they come from
//! [`crate::constants::STANDARD_MODELS`].

use std::collections::HashMap;
use std::path::Path;
#[cfg(feature = "onnx")]
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::STANDARD_MODELS;
use crate::error::ManifestError;

use super::builtin::{Band, BandedClassifier, LinearRegressor};
use super::predictor::Predictor;
use super::registry::ModelRegistry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    pub predictor: PredictorDef,
}

/// Predictor definition, tagged by `type`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PredictorDef {
    Linear {
        weights: Vec<f64>,
        #[serde(default)]
        bias: f64,
    },
    Banded {
        weights: Vec<f64>,
        #[serde(default)]
        bias: f64,
        bands: Vec<Band>,
        otherwise: String,
    },
    #[cfg(feature = "onnx")]
    Onnx { path: PathBuf },
}

impl PredictorDef {
    fn build(&self, model: &str, width: usize) -> Result<Arc<dyn Predictor>, ManifestError> {
        match self {
            PredictorDef::Linear { weights, bias } => {
                check_width(model, width, weights.len())?;
                Ok(Arc::new(LinearRegressor::new(weights.clone(), *bias)))
            }
            PredictorDef::Banded { weights, bias, bands, otherwise } => {
                check_width(model, width, weights.len())?;
                Ok(Arc::new(BandedClassifier::new(
                    weights.clone(),
                    *bias,
                    bands.clone(),
                    otherwise.clone(),
                )))
            }
            #[cfg(feature = "onnx")]
            PredictorDef::Onnx { path } => {
                let predictor = super::onnx::OnnxRegressor::load(path, width).map_err(|source| {
                    ManifestError::Predictor {
                        model: model.to_string(),
                        source,
                    }
                })?;
                Ok(Arc::new(predictor))
            }
        }
    }
}

fn check_width(model: &str, expected: usize, actual: usize) -> Result<(), ManifestError> {
    if expected != actual {
        return Err(ManifestError::WidthMismatch {
            model: model.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

impl ModelManifest {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    /// Build the standard registry.
    ///
    /// Every standard model must appear exactly once and nothing else may.
    pub fn into_registry(self) -> Result<ModelRegistry, ManifestError> {
        let mut defs: HashMap<String, PredictorDef> = HashMap::new();
        for entry in self.models {
            if !STANDARD_MODELS.iter().any(|(name, _)| *name == entry.name) {
                return Err(ManifestError::UnknownModel(entry.name));
            }
            if defs.contains_key(&entry.name) {
                return Err(ManifestError::DuplicateModel(entry.name));
            }
            defs.insert(entry.name, entry.predictor);
        }

        ModelRegistry::try_standard_with(|name, features| {
            let def = defs
                .get(name)
                .ok_or_else(|| ManifestError::MissingModel(name.to_string()))?;
            def.build(name, features.len())
        })
    }
}

impl FromStr for ModelManifest {
    type Err = ManifestError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Read a manifest file and build the standard registry from it
pub fn load_registry(path: impl AsRef<Path>) -> Result<ModelRegistry, ManifestError> {
    let path = path.as_ref();
    let registry = ModelManifest::from_path(path)?.into_registry()?;
    log::info!("Loaded {} models from {}", registry.len(), path.display());
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::{OutputKind, Prediction};
    use serde_json::json;
    use std::io::Write;

    fn manifest_json() -> serde_json::Value {
        json!({
            "models": [
                {"name": "temperature", "predictor": {"type": "linear", "weights": [0.5, 0.5]}},
                {"name": "vibration", "predictor": {
                    "type": "banded", "weights": [1.0, 1.0, 1.0],
                    "bands": [{"below": 3.0, "label": "normal"}], "otherwise": "fault"}},
                {"name": "magnetic_flux", "predictor": {"type": "linear", "weights": [1.0, 1.0, 1.0]}},
                {"name": "audible_sound", "predictor": {"type": "linear", "weights": [0.0, 0.0, 0.0, 1.0]}},
                {"name": "ultra_sound", "predictor": {"type": "linear", "weights": [0.0, 0.0, 0.0, 1.0], "bias": 2.0}}
            ]
        })
    }

    fn parse(value: serde_json::Value) -> Result<ModelRegistry, ManifestError> {
        value.to_string().parse::<ModelManifest>()?.into_registry()
    }

    #[test]
    fn test_manifest_builds_standard_registry() {
        let registry = parse(manifest_json()).unwrap();

        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get("vibration").unwrap().output_kind(), OutputKind::Categorical);
        assert_eq!(registry.get("temperature").unwrap().output_kind(), OutputKind::Numeric);

        let ultra = registry.get("ultra_sound").unwrap();
        assert_eq!(ultra.predict(&[0.0, 0.0, 0.0, 40.0]).unwrap(), Prediction::Numeric(42.0));
    }

    #[test]
    fn test_missing_model() {
        let mut value = manifest_json();
        value["models"].as_array_mut().unwrap().remove(2);

        assert!(matches!(
            parse(value),
            Err(ManifestError::MissingModel(name)) if name == "magnetic_flux"
        ));
    }

    #[test]
    fn test_unknown_and_duplicate_models() {
        let mut unknown = manifest_json();
        unknown["models"][0]["name"] = json!("pressure");
        assert!(matches!(parse(unknown), Err(ManifestError::UnknownModel(name)) if name == "pressure"));

        let mut duplicate = manifest_json();
        duplicate["models"][1]["name"] = json!("temperature");
        assert!(matches!(
            parse(duplicate),
            Err(ManifestError::DuplicateModel(name)) if name == "temperature"
        ));
    }

    #[test]
    fn test_width_mismatch_rejected_at_load() {
        let mut value = manifest_json();
        value["models"][0]["predictor"]["weights"] = json!([1.0, 1.0, 1.0]);

        assert!(matches!(
            parse(value),
            Err(ManifestError::WidthMismatch { model, expected: 2, actual: 3 }) if model == "temperature"
        ));
    }

    #[test]
    fn test_load_registry_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", manifest_json()).unwrap();

        let registry = load_registry(file.path()).unwrap();
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_load_registry_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_registry(dir.path().join("absent.json"));
        assert!(matches!(result, Err(ManifestError::Io { .. })));
    }
}
