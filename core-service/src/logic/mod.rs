//! Logic Module - prediction pipeline, models and health rules
//!
//! - `model/` - predictor contract, built-in predictors, registry, manifest
//! - `pipeline/` - batch validation, fan-out, aggregation, orchestration
//! - `health/` - rule-based diagnosis from feature modes

pub mod model;
pub mod pipeline;
pub mod health;
