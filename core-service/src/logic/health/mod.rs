//! Health Module
//!
//! Rule-based diagnosis from the batch's mode values: machine condition,
//! temperature and vibration anomalies, overall health.
//!
//! ## Structure
//! - `types`: labels, `HealthInputs`, `HealthReport`
//! - `rules`: thresholds and band bounds
//! - `analyzer`: the lookups

pub mod types;
pub mod rules;
pub mod analyzer;

pub use types::{
    HealthInputs, HealthReport, MachineCondition, OverallHealth, TemperatureAnomaly,
    VibrationAnomaly,
};

pub use analyzer::{analyze, analyze_at, evaluate_condition, temperature_anomaly, vibration_anomaly};
